//! Lexical analysis (tokenization) for ECMAScript source code.
//!
//! The lexer transforms source text into tokens on demand. It owns the
//! line/column bookkeeping and cooks literal values while scanning.
//!
//! ## Structure
//!
//! - `scanner.rs` - Main `Scanner` struct: trivia, identifiers, strings,
//!   templates, regular expressions and the rescan entry points
//! - `token.rs` - `Token`, `TokenKind`, `TokenFlags` and span types
//! - `operators` - Punctuator scanning
//! - `literals` - Numeric literal scanning and value conversion
//! - `identifiers` - Unicode character classification
//!
//! ## Usage
//!
//! ```rust
//! use esgrove_parser::lexer::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new("let x = 42;");
//!
//! loop {
//!     let token = scanner.next_token().expect("valid token");
//!     if matches!(token.kind, TokenKind::Eof) {
//!         break;
//!     }
//!     println!("{:?}", token.kind);
//! }
//! ```

mod scanner;
mod token;

pub mod identifiers;
pub mod literals;
pub mod operators;

pub use scanner::{Scanner, position_at};
pub use token::{Position, SourceLocation, Span, Token, TokenFlags, TokenKind};

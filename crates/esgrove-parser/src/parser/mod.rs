//! Parser for ECMAScript source code.
//!
//! Transforms source text into an ESTree [`Program`](crate::ast::Program).
//! The parser pulls tokens from the scanner one at a time and asks it to
//! rescan where the grammar decides the meaning of `/` or `}`.
//!
//! ## Structure
//!
//! - `parser` - The `Parser` struct: token handling, spans, errors, entry
//! - `context` - The `Context` flag set passed by value to every production
//! - `scope` - The scope arena and redeclaration table
//! - `statements` - Statements, declarations, ASI and directive prologues
//! - `expressions` - Precedence climbing, unary/postfix, calls, literals
//! - `patterns` - Binding patterns and the expression-to-pattern cover grammar
//! - `functions` - Function declarations, expressions, methods and arrows
//! - `classes` - Class bodies and private names
//! - `modules` - `import` and `export`
//!
//! ## Usage
//!
//! ```rust
//! use esgrove_parser::parser::Parser;
//!
//! let mut parser = Parser::new("let x = 1 + 2;");
//! let program = parser.parse_program().expect("Should parse");
//! assert_eq!(program.body.len(), 1);
//! ```
//!
//! For modules:
//!
//! ```rust
//! use esgrove_parser::{ParseOptions, parser::Parser};
//!
//! let mut parser = Parser::with_options("export const x = 42;", ParseOptions::module());
//! let program = parser.parse_program().expect("Should parse");
//! ```

mod classes;
mod context;
mod expressions;
mod functions;
mod modules;
#[allow(clippy::module_inception)]
mod parser;
mod patterns;
mod scope;
mod statements;

pub use context::Context;
pub use parser::Parser;
pub use patterns::{CoverGrammar, TargetMode};
pub use scope::{Binding, BindingKind, ScopeConflict, ScopeFlags, ScopeFrame, ScopeId, ScopeTracker};

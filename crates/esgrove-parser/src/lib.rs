// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # esgrove-parser
//!
//! An ECMAScript parser that produces ESTree-shaped syntax trees.
//!
//! ## Overview
//!
//! This crate provides:
//! - An on-demand scanner with regular expression and template rescanning
//! - A recursive descent parser with precedence climbing and ASI
//! - Early errors: redeclarations, strict mode, invalid targets, private names
//! - Byte spans on every node and optional line/column locations
//! - ESTree JSON output with the `serde` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use esgrove_parser::{ParseOptions, parse};
//!
//! let program = parse("var x = 1;", ParseOptions::default()).expect("Should parse");
//! assert_eq!(program.body.len(), 1);
//!
//! let err = parse("var a; let a;", ParseOptions::default()).unwrap_err();
//! assert_eq!(err.kind(), Some(esgrove_parser::ErrorKind::DuplicateBinding));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;

#[cfg(feature = "async")]
pub mod async_parser;

pub use ast::Program;
pub use error::{Error, ErrorKind, Result, SyntaxError};
pub use options::{DEFAULT_MAX_DEPTH, PARSER_STACK_SIZE, ParseOptions};
pub use parser::Parser;

#[cfg(feature = "async")]
pub use async_parser::AsyncParser;
#[cfg(all(feature = "async", feature = "parallel"))]
pub use async_parser::ParallelParser;

/// Parses `source` with the given options.
///
/// The first syntax error aborts the parse.
pub fn parse(source: &str, options: ParseOptions) -> Result<Program> {
    Parser::with_options(source, options).parse_program()
}

/// Parses `source` as a sloppy-mode script.
pub fn parse_script(source: &str) -> Result<Program> {
    parse(source, ParseOptions::script())
}

/// Parses `source` as an ES module.
pub fn parse_module(source: &str) -> Result<Program> {
    parse(source, ParseOptions::module())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_and_module() {
        assert!(parse_script("with (a) {}").is_ok());
        assert!(parse_module("with (a) {}").is_err());
        assert_eq!(
            parse_module("export const a = 1;").map(|p| p.source_type),
            Ok(ast::SourceType::Module)
        );
    }

    #[test]
    fn test_strict_by_default() {
        let options = ParseOptions::default().with_strict(true);
        let err = parse("var eval;", options).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::StrictModeViolation));
    }

    #[test]
    fn test_error_position() {
        let err = parse_script("var a;\nlet a;").unwrap_err();
        let syntax = err.as_syntax().expect("syntax error");
        assert_eq!(syntax.kind, ErrorKind::DuplicateBinding);
        assert_eq!(syntax.line, 2);
        assert_eq!(syntax.column, 4);
        assert_eq!(syntax.offset, 11);
    }
}

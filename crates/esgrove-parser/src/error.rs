// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the parser.
//!
//! Every failure is fatal: the first error aborts the parse and is returned
//! to the caller together with its source position.

use std::fmt;
use thiserror::Error;

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, Error>;

/// The category of a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    /// Malformed token: bad escape, unterminated literal, invalid number
    LexicalError,
    /// A production met a token it cannot start or continue with
    UnexpectedToken,
    /// No statement terminator could be inserted
    AsiFailure,
    /// An expression with an ineligible shape used as a binding or assignment target
    InvalidTarget,
    /// A redeclaration conflict between bindings of the same name
    DuplicateBinding,
    /// A construct that is legal only in sloppy mode
    StrictModeViolation,
    /// Any other early error
    EarlyError,
}

impl ErrorKind {
    /// Returns the stable name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::LexicalError => "LexicalError",
            ErrorKind::UnexpectedToken => "UnexpectedToken",
            ErrorKind::AsiFailure => "ASIFailure",
            ErrorKind::InvalidTarget => "InvalidTarget",
            ErrorKind::DuplicateBinding => "DuplicateBinding",
            ErrorKind::StrictModeViolation => "StrictModeViolation",
            ErrorKind::EarlyError => "EarlyError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A syntax error with its position in the source.
///
/// `offset` is a byte offset; `line` is 1-based and `column` is a 0-based
/// count of UTF-16 code units from the start of the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("SyntaxError: {message} ({line}:{column})")]
pub struct SyntaxError {
    /// The error category
    pub kind: ErrorKind,
    /// Human readable description
    pub message: String,
    /// Byte offset of the offending position
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column (0-based, UTF-16 units)
    pub column: u32,
}

/// Errors returned by the parser entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The source text is not a valid program
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Reading a source file failed
    #[error("IOError: {0}")]
    Io(String),
}

impl Error {
    /// Returns the syntax error kind, if this is a syntax error.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Syntax(err) => Some(err.kind),
            Error::Io(_) => None,
        }
    }

    /// Returns the underlying syntax error, if any.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax(err) => Some(err),
            Error::Io(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

//! Error types for TOML parsing, serialization and deserialization.
//!
//! Every failure is reported through the single [`Error`] enum. Variants carry
//! the line and column of the offending input where one exists, and
//! [`Error::category`] sorts them into the four families a caller usually
//! cares about:
//!
//! - **Lex**: the text could not be split into tokens (stray character,
//!   unterminated string, integer out of range)
//! - **Parse**: the tokens do not form a valid document (unexpected token,
//!   duplicate key, redefined table, type conflict on a path)
//! - **Encode**: a Rust value has no TOML representation
//! - **Decode**: a parsed value does not fit the destination type
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlite::{parse, Category};
//!
//! let err = parse("hello = ").unwrap_err();
//! assert_eq!(err.category(), Category::Parse);
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The tokenizer met input it cannot split into tokens.
    #[error("Lex error at line {line}, column {col}: {msg}")]
    Lex { line: usize, col: usize, msg: String },

    /// Unexpected token
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Input ended in the middle of a construct.
    #[error("Unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// A key was assigned twice in the same table.
    #[error("Duplicate key `{key}` at line {line}, column {col}")]
    DuplicateKey { line: usize, col: usize, key: String },

    /// A table was declared twice, or a sealed table was reopened.
    #[error("Table `{table}` redefined at line {line}, column {col}: {reason}")]
    DuplicateTable {
        line: usize,
        col: usize,
        table: String,
        reason: String,
    },

    /// A key path runs into a value of the wrong kind.
    #[error("Type conflict at line {line}, column {col}: `{path}` is already defined as {found}")]
    TypeConflict {
        line: usize,
        col: usize,
        path: String,
        found: String,
    },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Type mismatch during deserialization
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A value of the right kind but outside the destination's range.
    #[error("Invalid value: expected {expected}, found {found}")]
    InvalidValue { expected: String, found: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

/// The family an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Io,
    Lex,
    Parse,
    Encode,
    Decode,
}

impl Error {
    /// Creates a tokenizer error at the given position.
    pub fn lex(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::Lex {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
        }
    }

    pub fn duplicate_key(line: usize, col: usize, key: &str) -> Self {
        Error::DuplicateKey {
            line,
            col,
            key: key.to_string(),
        }
    }

    pub fn duplicate_table(line: usize, col: usize, table: &str, reason: &str) -> Self {
        Error::DuplicateTable {
            line,
            col,
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn type_conflict(line: usize, col: usize, path: &str, found: &str) -> Self {
        Error::TypeConflict {
            line,
            col,
            path: path.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a type mismatch error when deserialization fails due to incompatible types.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for values that have no TOML form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the family this error belongs to.
    ///
    /// `Custom` errors come from serde derive code (missing fields, unknown
    /// variants) and are therefore counted as decode failures.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Error::Io(_) => Category::Io,
            Error::Lex { .. } => Category::Lex,
            Error::Syntax { .. }
            | Error::UnexpectedEof { .. }
            | Error::DuplicateKey { .. }
            | Error::DuplicateTable { .. }
            | Error::TypeConflict { .. } => Category::Parse,
            Error::UnsupportedType(_) => Category::Encode,
            Error::TypeMismatch { .. } | Error::InvalidValue { .. } | Error::Custom(_) => {
                Category::Decode
            }
        }
    }

    /// Line and column of the offending input, if the error has one.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Lex { line, col, .. }
            | Error::Syntax { line, col, .. }
            | Error::UnexpectedEof { line, col, .. }
            | Error::DuplicateKey { line, col, .. }
            | Error::DuplicateTable { line, col, .. }
            | Error::TypeConflict { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::UnsupportedType(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Error::TypeMismatch {
            expected: exp.to_string(),
            found: unexp.to_string(),
        }
    }

    fn invalid_value(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Error::InvalidValue {
            expected: exp.to_string(),
            found: unexp.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

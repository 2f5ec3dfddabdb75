//! Error types for parsing, lookup, coercion and loading

use std::io;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ConfError>;

/// Top-level error returned by every fallible operation.
#[derive(Debug, Error)]
pub enum ConfError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid parse options: {message}")]
    Options { message: String },
}

impl ConfError {
    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        ConfError::Io {
            path: path.into(),
            source,
        }
    }

    /// Line number the error points at, for syntax errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfError::Syntax(e) => Some(e.line()),
            _ => None,
        }
    }
}

/// Malformed input text. Every variant carries the 1-based line number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("line {line}: missing ':' separator in '{text}'")]
    MissingSeparator { line: usize, text: String },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("line {line}: empty value for key '{key}'")]
    EmptyValue { line: usize, key: String },

    #[error("line {line}: key '{key}' has no value at end of input")]
    DanglingKey { line: usize, key: String },

    #[error("line {line}: malformed array key '{key}'")]
    MalformedKey { line: usize, key: String },

    #[error("line {line}: empty section name")]
    EmptySectionName { line: usize },

    #[error("line {line}: duplicate section '{name}' (first declared at line {first})")]
    DuplicateSection {
        line: usize,
        name: String,
        first: usize,
    },
}

impl SyntaxError {
    pub fn line(&self) -> usize {
        match self {
            SyntaxError::MissingSeparator { line, .. }
            | SyntaxError::EmptyKey { line }
            | SyntaxError::EmptyValue { line, .. }
            | SyntaxError::DanglingKey { line, .. }
            | SyntaxError::MalformedKey { line, .. }
            | SyntaxError::EmptySectionName { line }
            | SyntaxError::DuplicateSection { line, .. } => *line,
        }
    }
}

/// A key or section that is not registered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no key '{key}' in section '{section}'")]
    MissingKey { key: String, section: String },

    #[error("no section '{name}'")]
    MissingSection { name: String },
}

/// A value that cannot be coerced to the requested type.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("value '{value}' of '{key}' is not an integer: {source}")]
    InvalidInt {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("value '{value}' of '{key}' is not a float: {source}")]
    InvalidFloat {
        key: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("item is not an array, key: {key}")]
    NotArray { key: String },

    #[error("array separator of '{key}' must be a single character before ']'")]
    BadSeparator { key: String },

    #[error("value {value} of field '{field}' does not fit in {type_name}")]
    OutOfRange {
        field: String,
        value: String,
        type_name: &'static str,
    },

    #[error("field '{field}' has unsupported type {type_name}")]
    Unsupported {
        field: String,
        type_name: &'static str,
    },
}

/// Misuse of the loader by the caller rather than a problem in the data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field not settable, field: {field}")]
    ReadOnlyField { field: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_reports_line() {
        let err: ConfError = SyntaxError::EmptyValue {
            line: 7,
            key: "port".into(),
        }
        .into();
        assert_eq!(err.line(), Some(7));
        assert_eq!(err.to_string(), "line 7: empty value for key 'port'");
    }

    #[test]
    fn test_lookup_error_has_no_line() {
        let err: ConfError = LookupError::MissingSection {
            name: "server".into(),
        }
        .into();
        assert_eq!(err.line(), None);
        assert_eq!(err.to_string(), "no section 'server'");
    }

    #[test]
    fn test_duplicate_section_message_names_first_line() {
        let err = SyntaxError::DuplicateSection {
            line: 9,
            name: "db".into(),
            first: 3,
        };
        assert_eq!(
            err.to_string(),
            "line 9: duplicate section 'db' (first declared at line 3)"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;

        let err = ConfError::io(
            "missing.conf",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("missing.conf"));
        assert!(err.source().is_some());
    }
}

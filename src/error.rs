//! Error types for trueno-wave operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-wave operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The dump text could not be recognized at all.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },
}

/// Fatal outcome of parsing: the input is not a value-change dump at all.
///
/// Malformed lines inside an otherwise recognizable dump never produce this;
/// they become [`crate::dump::ParseWarning`]s instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input was empty or contained only whitespace.
    #[error("input is empty")]
    Empty,

    /// Input had content but no declaration or body markers.
    #[error("no declaration or body section found in {lines} non-blank lines")]
    Unrecognized {
        /// Number of non-blank lines scanned.
        lines: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_parse_error_converts() {
        let err: Error = ParseError::Unrecognized { lines: 3 }.into();
        assert!(matches!(err, Error::Parse(ParseError::Unrecognized { lines: 3 })));
        assert!(err.to_string().contains("3 non-blank lines"));
    }

    #[test]
    fn test_config_parse_mentions_line() {
        let err = Error::ConfigParse {
            line: 7,
            message: "bad indent".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
    }
}

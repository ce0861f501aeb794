//! Non-fatal parse diagnostics.

use std::fmt;
use thiserror::Error;

/// What went wrong on a line the parser skipped or repaired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// `$timescale` body could not be parsed; `1ns` is used.
    #[error("malformed timescale '{0}', defaulting to 1ns")]
    MalformedTimescale(String),

    /// No `$timescale` section in the whole dump; `1ns` is used.
    #[error("no timescale declared, defaulting to 1ns")]
    MissingTimescale,

    /// `$var` line missing fields or with a non-positive width.
    #[error("malformed variable declaration '{0}'")]
    MalformedVar(String),

    /// `$var` reused an identifier that is already declared.
    #[error("identifier '{identifier}' already declared as '{existing}', ignoring '{name}'")]
    DuplicateIdentifier {
        /// Repeated identifier token.
        identifier: String,
        /// Name of the first declaration.
        existing: String,
        /// Name of the ignored declaration.
        name: String,
    },

    /// Value change references an identifier never declared.
    #[error("value change for undeclared identifier '{0}'")]
    UnknownIdentifier(String),

    /// Scalar value change targets a multi-bit signal.
    #[error("scalar value change for {width}-bit signal '{name}'")]
    ScalarChangeOnVector {
        /// Signal display name.
        name: String,
        /// Declared width.
        width: u32,
    },

    /// Vector or real value change; not decoded.
    #[error("unsupported vector change '{0}'")]
    UnsupportedVectorChange(String),

    /// `#` line whose time is not a non-negative integer.
    #[error("malformed time marker '{0}'")]
    MalformedTime(String),

    /// `#` line earlier than the current time; the cursor is not moved.
    #[error("time {time} precedes current time {current}, ignoring")]
    TimeWentBackwards {
        /// Rejected time.
        time: u64,
        /// Time cursor that stays in effect.
        current: u64,
    },

    /// Anything else that is not blank and not a `$` keyword.
    #[error("unrecognized line '{0}'")]
    UnrecognizedLine(String),

    /// Input ended inside a `$...` section with no closing `$end`.
    #[error("section '{0}' not terminated by $end")]
    UnterminatedSection(String),
}

/// A warning attached to its 1-based source line (0 for end-of-input checks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number; 0 when the warning concerns the whole input.
    pub line: usize,
    /// Warning detail.
    pub kind: WarningKind,
}

impl ParseWarning {
    /// Create a warning for `line`.
    #[must_use]
    pub const fn new(line: usize, kind: WarningKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "line {}: {}", self.line, self.kind)
        }
    }
}

//! Error types for validation, persistence and the shell.

use crate::schema::FieldKind;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single field of a candidate was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    Missing,
    WrongType { expected: FieldKind },
    Empty,
    NotPositive,
}

/// A rejected field, named so the user can fix the data file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub violation: Violation,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field;
        match self.violation {
            Violation::Missing => write!(f, "{field} is required"),
            Violation::WrongType { expected } => {
                write!(f, "{field} must be {}", expected.expectation())
            }
            Violation::Empty => write!(f, "{field} must not be empty"),
            Violation::NotPositive => write!(f, "{field} must be greater than zero"),
        }
    }
}

/// Rejection of one candidate by the validator.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ValidationError {
    #[error("record must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("{}", join_violations(.0))]
    Fields(Vec<FieldViolation>),

    /// Schema keywords the field table has no name for.
    #[error("record failed schema: {}", .0.join("; "))]
    Schema(Vec<String>),
}

impl ValidationError {
    /// Field violations carried by the error; empty unless the field table
    /// named the failure.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ValidationError::NotAnObject { .. } | ValidationError::Schema(_) => &[],
            ValidationError::Fields(violations) => violations,
        }
    }

    /// True when the named field is among the rejected ones.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations().iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures of the persistence layer. None of them touch the catalog.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{origin} is not a JSON array of records: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to encode records: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by the interactive shell.
///
/// Everything except `Console` is reported to the user and the loop carries on.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} needs a file name (none given and no --file configured)")]
    MissingPath { command: &'static str },

    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),
}

impl ShellError {
    /// Console failures end the session; everything else is recoverable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Console(_))
    }
}

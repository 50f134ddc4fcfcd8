use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between argument errors
/// and failures raised while resolving a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the relationship was resolved and printed
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (fixture error, unknown record, load failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by record models and their references.
///
/// The view never translates these: whatever the record model returns is
/// handed to the caller of `compute` (or to the host's failure channel)
/// unchanged.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Unknown relationship '{relationship}' on {record}\n\n💡 Hint: Declare the relationship on the record before reading it")]
    UnknownRelationship {
        record: String,
        relationship: String,
    },

    #[error("Record not found: {identifier}\n\n💡 Hint: Push the record (or include it) before referencing it")]
    UnknownRecord { identifier: String },

    #[error("Invalid record identifier: '{value}'\nReason: {reason}\n\n💡 Hint: Use the form <type>:<id>, e.g. person:1")]
    InvalidRecordIdentifier { value: String, reason: String },

    #[error("Failed to fetch '{relationship}' of {record}\nDetails: {details}")]
    FetchFailed {
        record: String,
        relationship: String,
        details: String,
    },

    #[error("Invalid fixture: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    FixtureError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

//! Error types for the Gridlink command line

use thiserror::Error;

/// Problems with the command-line arguments.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("{option} requires {what}")]
    MissingValue {
        option: &'static str,
        what: &'static str,
    },

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Expected ID=FILE, got {0}")]
    BadSheetSpec(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

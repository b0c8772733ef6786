//! Error types for Gridlink core.

use gridlink_engine::engine::LangError;
use thiserror::Error;

/// Errors that can occur while interpreting or executing instructions.
#[derive(Error, Debug)]
pub enum GridlinkError {
    #[error("I cannot parse {input}: {message}")]
    Parse { input: String, message: String },

    #[error("I cannot interpret {input}: {message}")]
    Semantic { input: String, message: String },

    #[error("{id} already added to {worksheet}")]
    DuplicateLink { worksheet: String, id: String },

    #[error("Missing endpoint: {0}")]
    MissingEndpoint(String),

    #[error("Worksheet already exists: {0}")]
    DuplicateWorksheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worksheet file error at line {line}: {message}")]
    Storage { line: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

/// Broad failure classes surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ParseFailure,
    SemanticFailure,
    DuplicateLink,
    MissingEndpoint,
    Other,
}

impl GridlinkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridlinkError::Parse { .. } => ErrorKind::ParseFailure,
            GridlinkError::Semantic { .. } => ErrorKind::SemanticFailure,
            GridlinkError::DuplicateLink { .. } => ErrorKind::DuplicateLink,
            GridlinkError::MissingEndpoint(_) => ErrorKind::MissingEndpoint,
            _ => ErrorKind::Other,
        }
    }

    pub(crate) fn missing_worksheet(id: &str) -> Self {
        GridlinkError::MissingEndpoint(format!("no worksheet with id {}", id))
    }
}

impl From<LangError> for GridlinkError {
    fn from(err: LangError) -> Self {
        match err {
            LangError::Parse { input, message } => GridlinkError::Parse { input, message },
            LangError::Semantic { input, message } => GridlinkError::Semantic { input, message },
        }
    }
}

impl From<toml::de::Error> for GridlinkError {
    fn from(err: toml::de::Error) -> Self {
        GridlinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GridlinkError>;

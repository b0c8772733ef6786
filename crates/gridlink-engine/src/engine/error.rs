//! Failures of the two language stages.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LangError {
    /// The grammar did not match.
    #[error("I cannot parse {input}: {message}")]
    Parse { input: String, message: String },

    /// The grammar matched but the result has no meaning.
    #[error("I cannot interpret {input}: {message}")]
    Semantic { input: String, message: String },
}

impl LangError {
    pub fn parse(input: &str, message: impl Into<String>) -> Self {
        LangError::Parse {
            input: input.to_string(),
            message: message.into(),
        }
    }

    pub fn semantic(input: &str, message: impl Into<String>) -> Self {
        LangError::Semantic {
            input: input.to_string(),
            message: message.into(),
        }
    }

    /// The string that failed.
    pub fn input(&self) -> &str {
        match self {
            LangError::Parse { input, .. } | LangError::Semantic { input, .. } => input,
        }
    }
}

pub type ParseResult<T> = Result<T, LangError>;

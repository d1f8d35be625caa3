//! Error types for the summarization pipeline
//!
//! Upstream model failures are not errors here: they travel as
//! [`Completion::Failed`](crate::llm::Completion) text. Only misuse reaches the caller.

use crate::text::chunking::ChunkingError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("Chunking configuration rejected: {0}")]
    Chunking(#[from] ChunkingError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Input text is empty")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, SummaryError>;

impl SummaryError {
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Chunking(e) => e.category(),
            Self::Configuration(_) => "configuration",
            Self::EmptyInput => "empty_input",
        }
    }
}

//! Error types for word-window chunking

/// Error types for chunking operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkingError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for chunking operations
pub type Result<T> = std::result::Result<T, ChunkingError>;

impl ChunkingError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = ChunkingError::configuration("overlap too large");
        assert!(matches!(error, ChunkingError::Configuration(_)));
        assert_eq!(error.to_string(), "Configuration error: overlap too large");
        assert_eq!(error.category(), "configuration");
    }
}

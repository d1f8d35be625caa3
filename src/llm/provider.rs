use async_trait::async_trait;
use std::sync::Arc;

/// Trait for LLM providers. Each backend implements this.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a single-turn prompt and return the completion text.
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, LlmError>;
}

#[async_trait]
impl<P: LlmProvider + ?Sized> LlmProvider for Arc<P> {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, LlmError> {
        (**self).complete(prompt, max_tokens, temperature).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

impl LlmError {
    pub fn category(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Api { .. } => "api",
            Self::Parse(_) => "parse",
            Self::NotConfigured(_) => "not_configured",
        }
    }
}

/// Outcome of one model call, with failures kept as data
///
/// Pipeline stages hand this back instead of an error so one failed call
/// never discards the work already done on other chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Completed(String),
    Failed { reason: String },
}

impl Completion {
    pub const FAILURE_PREFIX: &'static str = "⚠️ Sorry, the AI summary failed:";

    pub fn from_result(result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => Completion::Completed(text),
            Err(e) => Completion::Failed {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Completion::Failed { .. })
    }

    /// The completion text, or a visibly flagged placeholder naming the failure
    pub fn into_text(self) -> String {
        match self {
            Completion::Completed(text) => text,
            Completion::Failed { reason } => format!("{} {}", Self::FAILURE_PREFIX, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_from_result() {
        let ok = Completion::from_result(Ok("summary".to_string()));
        assert!(!ok.is_failed());
        assert_eq!(ok.into_text(), "summary");

        let failed = Completion::from_result(Err(LlmError::Api {
            status: 429,
            body: "quota exceeded".to_string(),
        }));
        assert!(failed.is_failed());
        assert_eq!(
            failed.into_text(),
            "⚠️ Sorry, the AI summary failed: API error: 429: quota exceeded"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(LlmError::Parse("x".into()).category(), "parse");
        assert_eq!(
            LlmError::NotConfigured("OPENAI_API_KEY not set".into()).to_string(),
            "provider not configured: OPENAI_API_KEY not set"
        );
    }
}

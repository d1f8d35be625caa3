//! Language-model call boundary
//!
//! The summarizer only needs one capability: send a prompt with an output
//! budget and a sampling temperature, get completion text or a failure back.

pub mod openai;
pub mod provider;

pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::{Completion, LlmError, LlmProvider};

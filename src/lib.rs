//! Hierarchical book summarization
//!
//! Books too long for one model call are split into overlapping word
//! windows, each window is summarized, the summaries are reduced to one
//! master summary, and a final pass rewrites it in a caller-chosen style.

pub mod extract;
pub mod llm;
pub mod samples;
pub mod summary;
pub mod text;
pub mod util;

pub use extract::{ExtractError, SourceFormat};
pub use llm::{Completion, LlmError, LlmProvider, OpenAiConfig, OpenAiProvider};
pub use summary::{BookDigest, BookSummarizer, SummarizerConfig, SummaryError, SummaryPath};
pub use text::stats::TextStatistics;

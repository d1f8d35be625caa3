//! Hierarchical summarization pipeline
//!
//! chunk splitter -> chunk summarizer -> master-summary reducer -> style pass

pub mod config;
pub mod error;
pub mod progress;
pub mod prompt;
pub mod summarizer;

pub use config::SummarizerConfig;
pub use error::SummaryError;
pub use progress::{ChannelProgress, LogProgress, NoopProgress, ProgressObserver, ProgressUpdate};
pub use prompt::DEFAULT_STYLE_PROMPT;
pub use summarizer::{BookDigest, BookSummarizer, SummaryPath};

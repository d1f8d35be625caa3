//! Word-window text chunking for bounded-context summarization
//!
//! Splits a book into overlapping chunks of at most `chunk_size` words so
//! that each chunk fits a single model request. Consecutive chunks share
//! `overlap_size` words to keep narrative continuity across the split.

pub mod chunker;
pub mod config;
pub mod error;
pub mod sliding_window;
pub mod types;

// Re-export main public interfaces
pub use chunker::WordChunker;
pub use config::ChunkingConfig;
pub use error::{ChunkingError, Result};
pub use sliding_window::SlidingWindowCalculator;
pub use types::{ChunkPosition, TextChunk};

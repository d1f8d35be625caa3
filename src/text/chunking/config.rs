//! Configuration for word-window chunking

use serde::Deserialize;

use super::error::{ChunkingError, Result};

/// Configuration for splitting a word sequence into overlapping chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum words per chunk
    pub chunk_size: usize,
    /// Words repeated between consecutive chunks
    pub overlap_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            overlap_size: Self::DEFAULT_OVERLAP_SIZE,
        }
    }
}

impl ChunkingConfig {
    // sized to stay inside the context window of gpt-4o-mini class models
    pub const DEFAULT_CHUNK_SIZE: usize = 100_000;
    pub const DEFAULT_OVERLAP_SIZE: usize = 1_000;

    pub fn new(chunk_size: usize, overlap_size: usize) -> Self {
        Self {
            chunk_size,
            overlap_size,
        }
    }

    /// Words the window start advances by after each non-final chunk
    pub fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.overlap_size)
    }

    /// Validate configuration settings
    ///
    /// A zero stride would never advance the window, so `overlap_size` must
    /// stay strictly below `chunk_size`.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ChunkingError::configuration(
                "chunk_size must be greater than 0",
            ));
        }

        if self.overlap_size >= self.chunk_size {
            return Err(ChunkingError::configuration(format!(
                "overlap_size ({}) must be less than chunk_size ({})",
                self.overlap_size, self.chunk_size
            )));
        }

        Ok(())
    }

    /// Whether a text of `word_count` words needs to be split at all
    pub fn requires_chunking(&self, word_count: usize) -> bool {
        word_count > self.chunk_size
    }
}

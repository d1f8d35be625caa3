//! Word chunker: turns a word sequence into overlapping text chunks

use super::{
    config::ChunkingConfig,
    error::Result,
    sliding_window::SlidingWindowCalculator,
    types::TextChunk,
};
use tracing::debug;

/// Splits word sequences into overlapping, word-count-bounded chunks
#[derive(Debug, Clone)]
pub struct WordChunker {
    config: ChunkingConfig,
}

impl WordChunker {
    /// Create a chunker, rejecting configurations that could not make progress
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split whitespace-delimited text and chunk it
    pub fn chunk_text(&self, text: &str) -> Result<Vec<TextChunk>> {
        let words = crate::text::split_words(text);
        self.chunk_words(&words)
    }

    /// Chunk an already split word sequence
    ///
    /// Input no longer than `chunk_size` yields exactly one chunk holding every word.
    pub fn chunk_words(&self, words: &[&str]) -> Result<Vec<TextChunk>> {
        let windows = SlidingWindowCalculator::calculate_sliding_windows(
            words.len(),
            self.config.chunk_size,
            self.config.overlap_size,
        )?;

        debug!(
            word_count = words.len(),
            chunk_size = self.config.chunk_size,
            overlap_size = self.config.overlap_size,
            chunks = windows.len(),
            "computed chunk windows"
        );

        let chunks = windows
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| {
                TextChunk::new(words[start..end].join(" "), start, end, index)
            })
            .collect();
        Ok(chunks)
    }
}

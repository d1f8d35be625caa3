//! Summarizer tuning knobs
//!
//! Token budgets, temperatures and the input ceiling are policy, not
//! behavior: every value can be overridden from `BOOK_DIGEST_*` environment
//! variables or by the caller.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::text::chunking::ChunkingConfig;

use super::error::SummaryError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummarizerConfig {
    /// Maximum words per chunk; also the short-path threshold
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Words repeated between consecutive chunks
    #[serde(default = "default_overlap_size")]
    pub overlap_size: usize,
    /// Hard ceiling on input words, applied before anything else. `None` or 0 disables it.
    #[serde(default = "default_max_input_words")]
    pub max_input_words: Option<usize>,
    #[serde(default = "default_chunk_summary_max_tokens")]
    pub chunk_summary_max_tokens: u32,
    #[serde(default = "default_master_summary_max_tokens")]
    pub master_summary_max_tokens: u32,
    #[serde(default = "default_style_max_tokens")]
    pub style_max_tokens: u32,
    /// Used for chunk summaries and the reduction
    #[serde(default = "default_factual_temperature")]
    pub factual_temperature: f32,
    /// Used for the style pass
    #[serde(default = "default_style_temperature")]
    pub style_temperature: f32,
    /// Chunk summary requests allowed in flight at once
    #[serde(default = "default_chunk_concurrency")]
    pub chunk_concurrency: usize,
}

fn default_chunk_size() -> usize {
    ChunkingConfig::DEFAULT_CHUNK_SIZE
}
fn default_overlap_size() -> usize {
    ChunkingConfig::DEFAULT_OVERLAP_SIZE
}
fn default_max_input_words() -> Option<usize> {
    Some(SummarizerConfig::DEFAULT_MAX_INPUT_WORDS)
}
fn default_chunk_summary_max_tokens() -> u32 {
    1_000
}
fn default_master_summary_max_tokens() -> u32 {
    800
}
fn default_style_max_tokens() -> u32 {
    500
}
fn default_factual_temperature() -> f32 {
    0.3
}
fn default_style_temperature() -> f32 {
    0.8
}
fn default_chunk_concurrency() -> usize {
    1
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap_size: default_overlap_size(),
            max_input_words: default_max_input_words(),
            chunk_summary_max_tokens: default_chunk_summary_max_tokens(),
            master_summary_max_tokens: default_master_summary_max_tokens(),
            style_max_tokens: default_style_max_tokens(),
            factual_temperature: default_factual_temperature(),
            style_temperature: default_style_temperature(),
            chunk_concurrency: default_chunk_concurrency(),
        }
    }
}

impl SummarizerConfig {
    // five full chunks at the default chunk size
    pub const DEFAULT_MAX_INPUT_WORDS: usize = 500_000;

    pub fn from_env() -> Result<Self> {
        envy::prefixed("BOOK_DIGEST_")
            .from_env::<SummarizerConfig>()
            .context("cannot read summarizer config from env:")
    }

    pub fn chunking(&self) -> ChunkingConfig {
        ChunkingConfig::new(self.chunk_size, self.overlap_size)
    }

    pub fn input_ceiling(&self) -> Option<usize> {
        self.max_input_words.filter(|&n| n > 0)
    }

    pub fn validate(&self) -> Result<(), SummaryError> {
        self.chunking().validate()?;

        if self.chunk_concurrency == 0 {
            return Err(SummaryError::configuration(
                "chunk_concurrency must be greater than 0",
            ));
        }

        for (name, budget) in [
            ("chunk_summary_max_tokens", self.chunk_summary_max_tokens),
            ("master_summary_max_tokens", self.master_summary_max_tokens),
            ("style_max_tokens", self.style_max_tokens),
        ] {
            if budget == 0 {
                return Err(SummaryError::configuration(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        for (name, temperature) in [
            ("factual_temperature", self.factual_temperature),
            ("style_temperature", self.style_temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(SummaryError::configuration(format!(
                    "{name} must be within 0.0..=2.0, got {temperature}"
                )));
            }
        }

        Ok(())
    }
}

//! Hierarchical book summarizer
//!
//! Long books are split into overlapping chunks, each chunk is summarized
//! with its position in the book, the chunk summaries are reduced into one
//! master summary, and the master summary is restyled with the caller's
//! prompt. Books that fit in one chunk are restyled directly.

use std::borrow::Cow;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::{
    config::SummarizerConfig,
    error::{Result, SummaryError},
    progress::{ProgressObserver, ProgressUpdate},
    prompt,
};
use crate::llm::{Completion, LlmProvider};
use crate::text::chunking::{ChunkPosition, TextChunk, WordChunker};
use crate::text::{BoundedText, split_words, truncate_words};

/// Which route a book took through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPath {
    /// Raw text restyled in a single call
    Direct,
    /// Chunked, summarized per chunk, reduced, then restyled
    Chunked { chunks: usize },
}

/// Result of one `process_book` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDigest {
    /// Styled summary, or a flagged failure message if the style pass failed
    pub summary: String,
    pub path: SummaryPath,
    /// Words in the input before the safety ceiling was applied
    pub word_count: usize,
    pub truncated: bool,
    /// Model calls whose output was replaced by a failure placeholder
    pub failed_calls: usize,
}

pub struct BookSummarizer<P: LlmProvider> {
    provider: P,
    config: SummarizerConfig,
    chunker: WordChunker,
}

impl<P: LlmProvider> BookSummarizer<P> {
    /// Fails fast on invalid sizing so no model call is ever made with it
    pub fn new(provider: P, config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        let chunker = WordChunker::new(config.chunking())?;
        Ok(Self {
            provider,
            config,
            chunker,
        })
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    async fn model_response(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Completion {
        let result = self.provider.complete(prompt, max_tokens, temperature).await;
        if let Err(e) = &result {
            warn!(category = e.category(), "model call failed: {}", e);
        }
        Completion::from_result(result)
    }

    pub fn create_chunks(&self, words: &[&str]) -> Result<Vec<TextChunk>> {
        Ok(self.chunker.chunk_words(words)?)
    }

    /// Summarize one chunk; `chunk_number` is 1-based
    pub async fn summarize_chunk(
        &self,
        chunk: &str,
        chunk_number: usize,
        total_chunks: usize,
    ) -> Completion {
        let position = ChunkPosition::of(chunk_number, total_chunks);
        debug!(chunk_number, total_chunks, ?position, "summarizing chunk");
        self.model_response(
            &prompt::chunk_summary_prompt(chunk, position),
            self.config.chunk_summary_max_tokens,
            self.config.factual_temperature,
        )
        .await
    }

    /// Reduce ordered chunk summaries into one narrative
    pub async fn create_master_summary<S: AsRef<str>>(&self, chunk_summaries: &[S]) -> Completion {
        self.model_response(
            &prompt::master_summary_prompt(chunk_summaries),
            self.config.master_summary_max_tokens,
            self.config.factual_temperature,
        )
        .await
    }

    pub async fn style_summary(&self, master_summary: &str, style_prompt: &str) -> Completion {
        self.model_response(
            &prompt::style_summary_prompt(style_prompt, master_summary),
            self.config.style_max_tokens,
            self.config.style_temperature,
        )
        .await
    }

    /// Short path: restyle source text that fits in one chunk
    pub async fn style_text(&self, book_text: &str, style_prompt: &str) -> Completion {
        self.model_response(
            &prompt::style_text_prompt(style_prompt, book_text),
            self.config.style_max_tokens,
            self.config.style_temperature,
        )
        .await
    }

    fn bound_input<'a>(&self, book_text: &'a str) -> BoundedText<'a> {
        match self.config.input_ceiling() {
            Some(max_words) => truncate_words(book_text, max_words),
            None => BoundedText {
                text: Cow::Borrowed(book_text),
                original_word_count: split_words(book_text).len(),
                truncated: false,
            },
        }
    }

    /// Drive a book through the pipeline to one styled summary
    ///
    /// Upstream failures never surface here: they are folded into the text
    /// as flagged placeholders. Only empty input is rejected.
    pub async fn process_book(
        &self,
        book_text: &str,
        style_prompt: &str,
        progress: &dyn ProgressObserver,
    ) -> Result<BookDigest> {
        if book_text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        let bounded = self.bound_input(book_text);
        if bounded.truncated {
            warn!(
                original_words = bounded.original_word_count,
                max_words = self.config.input_ceiling(),
                "input exceeds word ceiling, truncating"
            );
        }
        let text: &str = &bounded.text;
        let words = split_words(text);

        if !self.config.chunking().requires_chunking(words.len()) {
            info!(words = words.len(), "book fits in one chunk, restyling directly");
            progress.on_progress(ProgressUpdate::new(1, 1, "Transforming style..."));
            let styled = self.style_text(text, style_prompt).await;
            let failed_calls = usize::from(styled.is_failed());
            return Ok(BookDigest {
                summary: styled.into_text(),
                path: SummaryPath::Direct,
                word_count: bounded.original_word_count,
                truncated: bounded.truncated,
                failed_calls,
            });
        }

        let chunks = self.create_chunks(&words)?;
        let total_chunks = chunks.len();
        let total_steps = total_chunks + 2;
        info!(
            words = words.len(),
            total_chunks,
            concurrency = self.config.chunk_concurrency,
            "summarizing book in chunks"
        );

        // buffered() yields in submission order, so summary i always belongs to chunk i
        let chunk_summaries: Vec<Completion> = stream::iter(chunks.iter())
            .map(|chunk| self.summarize_chunk(&chunk.content, chunk.number(), total_chunks))
            .buffered(self.config.chunk_concurrency)
            .enumerate()
            .map(|(i, summary)| {
                progress.on_progress(ProgressUpdate::new(
                    i + 1,
                    total_steps,
                    format!("Summarized section {} of {}", i + 1, total_chunks),
                ));
                summary
            })
            .collect()
            .await;

        let mut failed_calls = chunk_summaries.iter().filter(|c| c.is_failed()).count();
        let chunk_summaries: Vec<String> = chunk_summaries
            .into_iter()
            .map(Completion::into_text)
            .collect();

        progress.on_progress(ProgressUpdate::new(
            total_chunks + 1,
            total_steps,
            "Combining sections into master summary...",
        ));
        let master = self.create_master_summary(&chunk_summaries).await;
        failed_calls += usize::from(master.is_failed());

        progress.on_progress(ProgressUpdate::new(
            total_steps,
            total_steps,
            "Transforming style...",
        ));
        let styled = self.style_summary(&master.into_text(), style_prompt).await;
        failed_calls += usize::from(styled.is_failed());

        if failed_calls > 0 {
            warn!(failed_calls, "book summarized with placeholder sections");
        }

        Ok(BookDigest {
            summary: styled.into_text(),
            path: SummaryPath::Chunked {
                chunks: total_chunks,
            },
            word_count: bounded.original_word_count,
            truncated: bounded.truncated,
            failed_calls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::summary::progress::NoopProgress;
    use crate::util::tracing::tracing_init_test;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct RecordedCall {
        prompt: String,
        max_tokens: u32,
        temperature: f32,
    }

    type Responder = Box<dyn Fn(&str) -> std::result::Result<String, LlmError> + Send + Sync>;
    type Delay = Box<dyn Fn(&str) -> Duration + Send + Sync>;

    /// In-memory provider answering from a closure and recording every call
    struct ScriptedProvider {
        calls: Mutex<Vec<RecordedCall>>,
        respond: Responder,
        delay: Delay,
    }

    impl ScriptedProvider {
        fn new(
            respond: impl Fn(&str) -> std::result::Result<String, LlmError> + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                respond: Box::new(respond),
                delay: Box::new(|_| Duration::ZERO),
            })
        }

        fn with_delay(
            respond: impl Fn(&str) -> std::result::Result<String, LlmError> + Send + Sync + 'static,
            delay: impl Fn(&str) -> Duration + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                respond: Box::new(respond),
                delay: Box::new(delay),
            })
        }

        fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn complete(
            &self,
            prompt: &str,
            max_tokens: u32,
            temperature: f32,
        ) -> std::result::Result<String, LlmError> {
            self.calls.lock().unwrap().push(RecordedCall {
                prompt: prompt.to_string(),
                max_tokens,
                temperature,
            });
            let delay = (self.delay)(prompt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            (self.respond)(prompt)
        }
    }

    /// Progress observer that keeps every update
    #[derive(Default)]
    struct RecordingProgress(Mutex<Vec<ProgressUpdate>>);

    impl ProgressObserver for RecordingProgress {
        fn on_progress(&self, update: ProgressUpdate) {
            self.0.lock().unwrap().push(update);
        }
    }

    fn first_chunk_word(prompt: &str) -> Option<&str> {
        prompt
            .split("Text section:\n")
            .nth(1)
            .and_then(|t| t.split_whitespace().next())
    }

    /// Chunk prompts answer `S[<first word>]`, the reduction `MASTER`, the style pass `STYLED(...)`
    fn book_responder(prompt: &str) -> std::result::Result<String, LlmError> {
        if let Some(word) = first_chunk_word(prompt) {
            Ok(format!("S[{word}]"))
        } else if prompt.starts_with("Below are summaries") {
            Ok("MASTER".to_string())
        } else if let Some(rest) = prompt.split("Book summary: ").nth(1) {
            Ok(format!("STYLED({rest})"))
        } else {
            Ok("STYLED(raw)".to_string())
        }
    }

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    fn small_chunks() -> SummarizerConfig {
        SummarizerConfig {
            chunk_size: 10,
            overlap_size: 2,
            ..SummarizerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_sizing_fails_before_any_call() {
        let provider = ScriptedProvider::new(book_responder);
        let config = SummarizerConfig {
            chunk_size: 10,
            overlap_size: 10,
            ..SummarizerConfig::default()
        };
        let result = BookSummarizer::new(provider.clone(), config);
        assert!(matches!(result, Err(SummaryError::Chunking(_))));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let provider = ScriptedProvider::new(book_responder);
        let summarizer = BookSummarizer::new(provider.clone(), SummarizerConfig::default()).unwrap();
        let result = summarizer.process_book(" \n\t ", "Be fun.", &NoopProgress).await;
        assert_eq!(result, Err(SummaryError::EmptyInput));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_short_book_takes_direct_path() {
        let provider = ScriptedProvider::new(book_responder);
        let summarizer = BookSummarizer::new(provider.clone(), SummarizerConfig::default()).unwrap();
        let progress = RecordingProgress::default();
        let text = words(500);

        let digest = summarizer.process_book(&text, "Be fun.", &progress).await.unwrap();

        assert_eq!(digest.path, SummaryPath::Direct);
        assert_eq!(digest.summary, "STYLED(raw)");
        assert_eq!(digest.word_count, 500);
        assert!(!digest.truncated);
        assert_eq!(digest.failed_calls, 0);

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, prompt::style_text_prompt("Be fun.", &text));
        assert_eq!(calls[0].max_tokens, 500);
        assert_eq!(calls[0].temperature, 0.8);

        let updates = progress.0.lock().unwrap().clone();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].fraction(), 1.0);
    }

    #[tokio::test]
    async fn test_long_book_is_chunked_reduced_and_styled() {
        tracing_init_test(tracing::Level::DEBUG);
        let provider = ScriptedProvider::new(book_responder);
        let summarizer = BookSummarizer::new(provider.clone(), small_chunks()).unwrap();

        // 25 words at 10/2 -> [0,10) [8,18) [16,25)
        let digest = summarizer
            .process_book(&words(25), "Be fun.", &NoopProgress)
            .await
            .unwrap();

        assert_eq!(digest.path, SummaryPath::Chunked { chunks: 3 });
        assert_eq!(digest.summary, "STYLED(MASTER)");
        assert_eq!(digest.failed_calls, 0);

        let calls = provider.calls();
        assert_eq!(calls.len(), 5);

        assert!(calls[0].prompt.starts_with("This is the beginning of the book."));
        assert!(calls[1].prompt.starts_with("This is part 2 of 3 of the book."));
        assert!(calls[2].prompt.starts_with("This is the end of the book."));
        assert_eq!(first_chunk_word(&calls[0].prompt), Some("w0"));
        assert_eq!(first_chunk_word(&calls[1].prompt), Some("w8"));
        assert_eq!(first_chunk_word(&calls[2].prompt), Some("w16"));
        for call in &calls[..3] {
            assert_eq!(call.max_tokens, 1_000);
            assert_eq!(call.temperature, 0.3);
        }

        assert!(
            calls[3]
                .prompt
                .ends_with("Section 1: S[w0]\n\nSection 2: S[w8]\n\nSection 3: S[w16]")
        );
        assert_eq!(calls[3].max_tokens, 800);
        assert_eq!(calls[3].temperature, 0.3);

        // the style pass only ever sees the master summary
        assert_eq!(calls[4].prompt, "Be fun.\n\nBook summary: MASTER");
        assert_eq!(calls[4].max_tokens, 500);
        assert_eq!(calls[4].temperature, 0.8);
    }

    #[tokio::test]
    async fn test_failed_chunk_becomes_placeholder_section() {
        tracing_init_test(tracing::Level::DEBUG);
        let provider = ScriptedProvider::new(|prompt| {
            if prompt.starts_with("This is part 2 of 3") {
                Err(LlmError::Api {
                    status: 500,
                    body: "upstream exploded".to_string(),
                })
            } else {
                book_responder(prompt)
            }
        });
        let summarizer = BookSummarizer::new(provider.clone(), small_chunks()).unwrap();

        let digest = summarizer
            .process_book(&words(25), "Be fun.", &NoopProgress)
            .await
            .unwrap();

        assert_eq!(digest.summary, "STYLED(MASTER)");
        assert_eq!(digest.failed_calls, 1);

        let master_prompt = &provider.calls()[3].prompt;
        assert!(master_prompt.contains("Section 1: S[w0]"));
        assert!(master_prompt.contains(
            "Section 2: ⚠️ Sorry, the AI summary failed: API error: 500: upstream exploded"
        ));
        assert!(master_prompt.contains("Section 3: S[w16]"));
    }

    #[tokio::test]
    async fn test_every_stage_failing_still_returns_text() {
        let provider = ScriptedProvider::new(|_| Err(LlmError::Parse("no content".to_string())));
        let summarizer = BookSummarizer::new(provider.clone(), small_chunks()).unwrap();

        let digest = summarizer
            .process_book(&words(25), "Be fun.", &NoopProgress)
            .await
            .unwrap();

        assert_eq!(digest.failed_calls, 5);
        assert_eq!(
            digest.summary,
            "⚠️ Sorry, the AI summary failed: failed to parse response: no content"
        );
        // the failed reduction still flowed into the style pass as text
        assert!(provider.calls()[4].prompt.contains("Book summary: ⚠️ Sorry"));
    }

    #[tokio::test]
    async fn test_progress_over_chunk_count_plus_two_steps() {
        let provider = ScriptedProvider::new(book_responder);
        let summarizer = BookSummarizer::new(provider, small_chunks()).unwrap();
        let progress = RecordingProgress::default();

        summarizer
            .process_book(&words(25), "Be fun.", &progress)
            .await
            .unwrap();

        let updates = progress.0.lock().unwrap().clone();
        assert_eq!(
            updates.iter().map(|u| (u.step, u.total)).collect::<Vec<_>>(),
            vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]
        );
        assert!(updates.windows(2).all(|w| w[0].fraction() < w[1].fraction()));
        assert_eq!(updates.last().unwrap().fraction(), 1.0);
        assert_eq!(updates[1].label, "Summarized section 2 of 3");
    }

    #[tokio::test]
    async fn test_truncation_safety_valve() {
        tracing_init_test(tracing::Level::DEBUG);
        let provider = ScriptedProvider::new(book_responder);
        let config = SummarizerConfig {
            max_input_words: Some(80_000),
            ..SummarizerConfig::default()
        };
        let summarizer = BookSummarizer::new(provider.clone(), config).unwrap();
        let text = words(90_000);

        let digest = summarizer.process_book(&text, "Be fun.", &NoopProgress).await.unwrap();

        assert!(digest.truncated);
        assert_eq!(digest.word_count, 90_000);
        assert_eq!(digest.path, SummaryPath::Direct);

        let expected = format!("{}...", words(80_000));
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, prompt::style_text_prompt("Be fun.", &expected));
    }

    #[tokio::test]
    async fn test_truncation_applies_before_chunking_decision() {
        let provider = ScriptedProvider::new(book_responder);
        let config = SummarizerConfig {
            max_input_words: Some(15),
            ..small_chunks()
        };
        let summarizer = BookSummarizer::new(provider.clone(), config).unwrap();

        // 15 kept words at 10/2 -> [0,10) [8,15)
        let digest = summarizer
            .process_book(&words(40), "Be fun.", &NoopProgress)
            .await
            .unwrap();

        assert!(digest.truncated);
        assert_eq!(digest.path, SummaryPath::Chunked { chunks: 2 });
        let calls = provider.calls();
        assert!(calls[1].prompt.ends_with("w13 w14..."));
    }

    #[tokio::test]
    async fn test_concurrent_chunks_keep_section_order() {
        tracing_init_test(tracing::Level::DEBUG);
        // earlier chunks answer slower, so completions arrive in reverse
        let provider = ScriptedProvider::with_delay(book_responder, |prompt| {
            match first_chunk_word(prompt) {
                Some("w0") => Duration::from_millis(60),
                Some("w8") => Duration::from_millis(30),
                _ => Duration::ZERO,
            }
        });
        let config = SummarizerConfig {
            chunk_concurrency: 3,
            ..small_chunks()
        };
        let summarizer = BookSummarizer::new(provider.clone(), config).unwrap();
        let progress = RecordingProgress::default();

        summarizer
            .process_book(&words(25), "Be fun.", &progress)
            .await
            .unwrap();

        let calls = provider.calls();
        let master = calls
            .iter()
            .find(|c| c.prompt.starts_with("Below are summaries"))
            .unwrap();
        assert!(
            master
                .prompt
                .ends_with("Section 1: S[w0]\n\nSection 2: S[w8]\n\nSection 3: S[w16]")
        );

        let steps: Vec<_> = progress.0.lock().unwrap().iter().map(|u| u.step).collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_stage_methods_directly() {
        let provider = ScriptedProvider::new(book_responder);
        let summarizer = BookSummarizer::new(provider.clone(), small_chunks()).unwrap();

        let chunk = summarizer.summarize_chunk("Juliet wakes up.", 1, 1).await;
        assert_eq!(chunk, Completion::Completed("S[Juliet]".to_string()));
        assert!(
            provider.calls()[0]
                .prompt
                .starts_with("This is the beginning of the book.")
        );

        let master = summarizer.create_master_summary(&["a", "b"]).await;
        assert_eq!(master.into_text(), "MASTER");

        let chunks = summarizer
            .create_chunks(&split_words(&words(12)))
            .unwrap();
        assert_eq!(chunks.len(), 2);
    }
}

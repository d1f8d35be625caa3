use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;

use book_digest::extract;
use book_digest::llm::{OpenAiConfig, OpenAiProvider};
use book_digest::samples::{self, SAMPLE_BOOKS};
use book_digest::summary::{
    BookSummarizer, ChannelProgress, DEFAULT_STYLE_PROMPT, ProgressUpdate, SummarizerConfig,
    SummaryPath,
};
use book_digest::text::stats::{TextStatistics, format_common_words};
use book_digest::util::tracing::{shutdown_tracer_provider, tracing_init_from_env};

/// Summarize a book (EPUB, PDF or TXT) in a style of your choosing.
#[derive(Parser, Debug)]
#[command(name = "book-digest", version, about)]
struct Cli {
    /// Book file to summarize (.epub, .pdf or .txt).
    #[arg(conflicts_with_all = ["text", "sample"])]
    file: Option<PathBuf>,

    /// Book text given directly instead of a file.
    #[arg(long, conflicts_with = "sample")]
    text: Option<String>,

    /// Built-in sample book, by title or slug (see --list-samples).
    #[arg(long)]
    sample: Option<String>,

    /// List the built-in sample books and exit.
    #[arg(long)]
    list_samples: bool,

    /// File containing the style instructions for the final pass.
    #[arg(long, env = "BOOK_DIGEST_STYLE_PROMPT_FILE")]
    style_prompt_file: Option<PathBuf>,

    /// Maximum words per chunk.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Words shared by consecutive chunks.
    #[arg(long)]
    overlap_size: Option<usize>,

    /// Input word ceiling; 0 disables it.
    #[arg(long)]
    max_input_words: Option<usize>,

    /// Chunk summaries requested concurrently.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Print text statistics only, without calling the model.
    #[arg(long)]
    stats_only: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut SummarizerConfig) {
        if let Some(n) = self.chunk_size {
            config.chunk_size = n;
        }
        if let Some(n) = self.overlap_size {
            config.overlap_size = n;
        }
        if let Some(n) = self.max_input_words {
            config.max_input_words = Some(n);
        }
        if let Some(n) = self.concurrency {
            config.chunk_concurrency = n;
        }
    }

    async fn load_text(&self) -> Result<String> {
        if let Some(path) = &self.file {
            let path = path.clone();
            return tokio::task::spawn_blocking(move || extract::extract_text_from_path(&path))
                .await
                .context("text extraction task failed")?
                .map_err(Into::into);
        }
        if let Some(name) = &self.sample {
            return match samples::find_sample(name) {
                Some(book) => Ok(book.text.to_string()),
                None => bail!(
                    "unknown sample {:?}; available: {}",
                    name,
                    SAMPLE_BOOKS
                        .iter()
                        .map(|b| b.slug())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            };
        }
        match &self.text {
            Some(text) if !text.trim().is_empty() => Ok(text.clone()),
            Some(_) => bail!("--text is empty"),
            None => bail!("no input: pass a book file, --text or --sample"),
        }
    }

    async fn load_style_prompt(&self) -> Result<String> {
        match &self.style_prompt_file {
            Some(path) => {
                let prompt = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("cannot read style prompt {:?}", path))?;
                if prompt.trim().is_empty() {
                    bail!("style prompt file {:?} is empty", path);
                }
                Ok(prompt)
            }
            None => Ok(DEFAULT_STYLE_PROMPT.to_string()),
        }
    }
}

fn print_statistics(stats: &TextStatistics) {
    println!("## Book statistics");
    println!();
    println!("- Word count: {}", stats.word_count);
    println!(
        "- Estimated reading time: {} minutes",
        stats.reading_time_minutes
    );
    println!();
    println!("### Most common words");
    println!();
    println!("{}", format_common_words(&stats.common_words));
}

fn print_samples() {
    println!("Sample books:");
    for book in SAMPLE_BOOKS {
        println!("- {} ({})", book.title, book.slug());
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.list_samples {
        print_samples();
        return Ok(());
    }

    let text = cli.load_text().await?;
    let stats = TextStatistics::from_text(&text);

    if cli.stats_only {
        print_statistics(&stats);
        return Ok(());
    }

    let style_prompt = cli.load_style_prompt().await?;
    let mut config = SummarizerConfig::from_env()?;
    cli.apply_overrides(&mut config);
    let provider = OpenAiProvider::from_config(&OpenAiConfig::from_env()?)?;
    info!(model = provider.model(), words = stats.word_count, "summarizing book");

    let summarizer = BookSummarizer::new(provider, config)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<ProgressUpdate>();
    let printer = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            eprintln!(
                "[{:>3.0}%] {}",
                update.fraction() * 100.0,
                update.label
            );
        }
    });

    let progress = ChannelProgress::new(tx);
    let digest = summarizer
        .process_book(&text, &style_prompt, &progress)
        .await?;
    drop(progress);
    let _ = printer.await;

    if digest.truncated {
        eprintln!(
            "note: input had {} words and was truncated before summarizing",
            digest.word_count
        );
    }
    if digest.failed_calls > 0 {
        eprintln!("warning: {} model call(s) failed", digest.failed_calls);
    }
    let route = match digest.path {
        SummaryPath::Direct => "direct".to_string(),
        SummaryPath::Chunked { chunks } => format!("{chunks} chunks"),
    };
    info!(route = %route, failed_calls = digest.failed_calls, "summary complete");

    println!("## Summary");
    println!();
    println!("{}", digest.summary);
    println!();
    print_statistics(&stats);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init_from_env().await?;
    let cli = Cli::parse();
    let result = run(cli).await;
    shutdown_tracer_provider();
    result
}

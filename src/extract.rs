//! Plain-text extraction from uploaded books
//!
//! The summarizer only consumes decoded text; this module is the adapter
//! from EPUB, PDF and TXT files to that text. Page and chapter structure is
//! not preserved.

use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::util::encoding;

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported file type: '{extension}' (supported: .epub, .pdf, .txt)")]
    UnsupportedFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error processing EPUB file: {0}")]
    Epub(String),

    #[error("Error processing PDF file: {0}")]
    Pdf(String),

    #[error("No readable text found in {format} file")]
    NoText { format: SourceFormat },
}

impl ExtractError {
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::Io(_) => "io",
            Self::Epub(_) => "epub",
            Self::Pdf(_) => "pdf",
            Self::NoText { .. } => "no_text",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Epub,
    Pdf,
    Txt,
}

impl SourceFormat {
    /// Detect the format from a file name's extension, case-insensitively
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "epub" => Ok(SourceFormat::Epub),
            "pdf" => Ok(SourceFormat::Pdf),
            "txt" => Ok(SourceFormat::Txt),
            _ => Err(ExtractError::UnsupportedFormat {
                extension: if extension.is_empty() {
                    String::new()
                } else {
                    format!(".{extension}")
                },
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Epub => "epub",
            SourceFormat::Pdf => "pdf",
            SourceFormat::Txt => "txt",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Read a book from disk and return its text
pub fn extract_text_from_path(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    info!(path = %path.display(), %format, bytes = bytes.len(), "extracting book text");
    extract_text(format, &bytes)
}

/// Decode raw file contents of a known format into text
pub fn extract_text(format: SourceFormat, bytes: &[u8]) -> Result<String> {
    let text = match format {
        SourceFormat::Txt => extract_txt(bytes),
        SourceFormat::Epub => extract_epub(bytes)?,
        SourceFormat::Pdf => extract_pdf(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractError::NoText { format });
    }
    debug!(%format, chars = text.len(), "extracted text");
    Ok(text)
}

/// UTF-8 first, then charset detection, then Latin-1 which never fails
fn extract_txt(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => match encoding::decode_to_utf8(bytes) {
            Ok(decoded) => {
                debug!(
                    charset = %decoded.charset,
                    confidence = decoded.confidence,
                    "decoded non utf-8 text"
                );
                decoded.text
            }
            Err(e) => {
                warn!("charset detection failed, decoding as latin-1: {:?}", e);
                bytes.iter().map(|&b| b as char).collect()
            }
        },
    }
}

fn extract_epub(bytes: &[u8]) -> Result<String> {
    let mut doc = epub::doc::EpubDoc::from_reader(Cursor::new(bytes.to_vec()))
        .map_err(|e| ExtractError::Epub(e.to_string()))?;

    let mut combined = String::new();
    let mut documents = 0usize;
    loop {
        if let Some((content, _mime)) = doc.get_current_str() {
            documents += 1;
            combined.push_str(&html_to_text(&content));
            combined.push('\n');
        }
        if !doc.go_next() {
            break;
        }
    }

    debug!(documents, chars = combined.len(), "parsed epub spine");
    Ok(combined)
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

// wide enough that no hard line breaks are baked into paragraphs
const HTML_TEXT_WIDTH: usize = 10_000;

/// Render an XHTML document as plain text
///
/// Falls back to the raw markup if the document cannot be rendered.
pub fn html_to_text(html: &str) -> String {
    match html2text::from_read(html.as_bytes(), HTML_TEXT_WIDTH) {
        Ok(text) => text,
        Err(e) => {
            warn!("html2text failed, keeping raw document: {e}");
            html.to_string()
        }
    }
}

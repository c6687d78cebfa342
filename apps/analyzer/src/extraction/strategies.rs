//! Extraction strategies — pluggable text providers tried by `DocumentExtractor`.
//!
//! Ordered by fidelity:
//! 1. `PdfExtractStrategy`     — `pdf-extract`, layout-aware, handles font encodings.
//! 2. `LopdfTextStrategy`      — `lopdf` per-page text extraction.
//! 3. `ContentStreamStrategy`  — raw scan of text-showing operators in page content streams.
//! 4. `RawBytesStrategy`       — printable-ASCII scan of the bytes themselves (last resort).
//!
//! Third-party parsers are run behind `catch_unwind`: a panic inside a parser is
//! an ordinary strategy failure, not a crash of the analysis.

use std::panic::{self, AssertUnwindSafe};

use lopdf::content::Content;
use lopdf::{Document, Object};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::extractor::{ExtractionMethod, ExtractionQuality};
use super::page_marker;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("failed to load document: {0}")]
    Load(String),

    #[error("failed to extract text: {0}")]
    Extract(String),

    #[error("parser panicked: {0}")]
    Panicked(String),
}

/// Text produced by one strategy, before the acceptance threshold is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyOutput {
    pub text: String,
    pub page_count: usize,
}

/// A single way of pulling text out of document bytes.
///
/// Implementations are stateless; the extractor owns them as `Box<dyn ExtractionStrategy>`.
pub trait ExtractionStrategy: Send + Sync {
    fn method(&self) -> ExtractionMethod;

    /// Quality label reported when this strategy's output is accepted.
    fn quality(&self) -> ExtractionQuality;

    /// Output is accepted only if its trimmed length exceeds this many characters.
    fn min_chars(&self) -> usize;

    fn extract(&self, bytes: &[u8]) -> Result<StrategyOutput, StrategyError>;
}

// ────────────────────────────────────────────────────────────────────────────
// pdf-extract
// ────────────────────────────────────────────────────────────────────────────

pub struct PdfExtractStrategy;

impl ExtractionStrategy for PdfExtractStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::PdfExtract
    }

    fn quality(&self) -> ExtractionQuality {
        ExtractionQuality::Excellent
    }

    fn min_chars(&self) -> usize {
        200
    }

    fn extract(&self, bytes: &[u8]) -> Result<StrategyOutput, StrategyError> {
        let raw = guarded(|| pdf_extract::extract_text_from_mem(bytes))?
            .map_err(|e| StrategyError::Extract(e.to_string()))?;

        // pdf-extract separates pages with form feeds, sometimes with a trailing one.
        let mut pages: Vec<&str> = raw.split('\x0c').collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        let page_count = guarded(|| load_document(bytes).map(|doc| doc.get_pages().len()))
            .ok()
            .and_then(Result::ok)
            .unwrap_or(pages.len());
        Ok(StrategyOutput {
            text: join_pages(pages.into_iter()),
            page_count,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// lopdf text extraction
// ────────────────────────────────────────────────────────────────────────────

pub struct LopdfTextStrategy;

impl ExtractionStrategy for LopdfTextStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::LopdfText
    }

    fn quality(&self) -> ExtractionQuality {
        ExtractionQuality::Good
    }

    fn min_chars(&self) -> usize {
        200
    }

    fn extract(&self, bytes: &[u8]) -> Result<StrategyOutput, StrategyError> {
        guarded(|| {
            let doc = load_document(bytes)?;
            let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
            let page_count = page_numbers.len();

            let mut pages = Vec::with_capacity(page_count);
            for page_number in page_numbers {
                match doc.extract_text(&[page_number]) {
                    Ok(text) => pages.push(text),
                    Err(e) => debug!("lopdf: skipping page {page_number}: {e}"),
                }
            }

            Ok(StrategyOutput {
                text: join_pages(pages.iter().map(String::as_str)),
                page_count,
            })
        })?
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content-stream scan
// ────────────────────────────────────────────────────────────────────────────

/// Decodes each page's content stream and collects the string operands of the
/// text-showing operators. Ignores font encodings, so it only reads documents
/// whose strings are (close to) Latin-1 or UTF-16BE.
pub struct ContentStreamStrategy;

/// `TJ` kerning adjustments more negative than this are treated as word gaps.
const TJ_SPACE_THRESHOLD: f64 = -200.0;

impl ExtractionStrategy for ContentStreamStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::ContentStream
    }

    fn quality(&self) -> ExtractionQuality {
        ExtractionQuality::Basic
    }

    fn min_chars(&self) -> usize {
        100
    }

    fn extract(&self, bytes: &[u8]) -> Result<StrategyOutput, StrategyError> {
        guarded(|| {
            let doc = load_document(bytes)?;
            let pages = doc.get_pages();
            let page_count = pages.len();

            let mut page_texts = Vec::with_capacity(page_count);
            for (page_number, page_id) in pages {
                let content = doc
                    .get_page_content(page_id)
                    .map_err(|e| StrategyError::Extract(format!("page {page_number}: {e}")))?;
                let content = Content::decode(&content)
                    .map_err(|e| StrategyError::Extract(format!("page {page_number}: {e}")))?;
                page_texts.push(text_from_operations(&content));
            }

            Ok(StrategyOutput {
                text: join_pages(page_texts.iter().map(String::as_str)),
                page_count,
            })
        })?
    }
}

fn text_from_operations(content: &Content) -> String {
    let mut text = String::new();
    for op in &content.operations {
        match op.operator.as_str() {
            "Tj" | "'" => {
                if op.operator == "'" {
                    text.push('\n');
                }
                if let Some(Object::String(bytes, _)) = op.operands.last() {
                    text.push_str(&decode_pdf_string(bytes));
                }
            }
            "\"" => {
                text.push('\n');
                if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                    text.push_str(&decode_pdf_string(bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
                            Object::Integer(n) if (*n as f64) < TJ_SPACE_THRESHOLD => {
                                text.push(' ')
                            }
                            Object::Real(n) if f64::from(*n) < TJ_SPACE_THRESHOLD => {
                                text.push(' ')
                            }
                            _ => {}
                        }
                    }
                }
            }
            "Td" | "TD" | "T*" | "ET" => text.push('\n'),
            "Tm" => text.push(' '),
            _ => {}
        }
    }
    text
}

/// UTF-16BE when the string carries a byte-order mark, Latin-1 otherwise.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Raw bytes
// ────────────────────────────────────────────────────────────────────────────

/// Treats the buffer as text. Only useful for plain-text uploads or
/// uncompressed PDFs; a result with too few readable words is discarded.
pub struct RawBytesStrategy;

/// Minimum number of words (>2 letters, alphabetic only) for raw text to count.
const MIN_READABLE_WORDS: usize = 50;

static NON_PRINTABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\x20-\x7E\n\r\t]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

impl ExtractionStrategy for RawBytesStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::RawBytes
    }

    fn quality(&self) -> ExtractionQuality {
        ExtractionQuality::Poor
    }

    fn min_chars(&self) -> usize {
        50
    }

    fn extract(&self, bytes: &[u8]) -> Result<StrategyOutput, StrategyError> {
        let decoded = String::from_utf8_lossy(bytes);
        let printable = NON_PRINTABLE.replace_all(&decoded, " ");
        let text = WHITESPACE_RUN.replace_all(&printable, " ").trim().to_string();

        let readable_words = text
            .split_whitespace()
            .filter(|w| w.len() > 2 && w.chars().all(char::is_alphabetic))
            .count();
        debug!("raw bytes: {readable_words} readable words");

        if readable_words <= MIN_READABLE_WORDS {
            return Ok(StrategyOutput::default());
        }
        Ok(StrategyOutput {
            text,
            page_count: 0,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn load_document(bytes: &[u8]) -> Result<Document, StrategyError> {
    Document::load_mem(bytes).map_err(|e| StrategyError::Load(e.to_string()))
}

/// Concatenates non-empty pages, each preceded by a page marker.
fn join_pages<'a>(pages: impl Iterator<Item = &'a str>) -> String {
    let mut text = String::new();
    for (index, page) in pages.enumerate() {
        if page.trim().is_empty() {
            continue;
        }
        text.push_str(&page_marker(index + 1));
        text.push_str(page);
    }
    text
}

/// Runs a parser call, converting a panic into `StrategyError::Panicked`.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, StrategyError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        StrategyError::Panicked(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::test_pdf::build_pdf;

    #[test]
    fn test_content_stream_reads_generated_pdf() {
        let pdf = build_pdf(&[&["Senior Software Engineer", "Python and Rust"]]);
        let output = ContentStreamStrategy.extract(&pdf).unwrap();
        assert_eq!(output.page_count, 1);
        assert!(output.text.contains("Senior Software Engineer"));
        assert!(output.text.contains("Python and Rust"));
        assert!(output.text.contains("--- Page 1 ---"));
    }

    #[test]
    fn test_content_stream_counts_pages() {
        let pdf = build_pdf(&[&["First page"], &["Second page"]]);
        let output = ContentStreamStrategy.extract(&pdf).unwrap();
        assert_eq!(output.page_count, 2);
        assert!(output.text.contains("--- Page 2 ---"));
        assert!(output.text.find("First page") < output.text.find("Second page"));
    }

    #[test]
    fn test_lopdf_rejects_non_pdf() {
        let err = LopdfTextStrategy.extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, StrategyError::Load(_) | StrategyError::Panicked(_)));
    }

    #[test]
    fn test_pdf_extract_never_panics_on_garbage() {
        // Either an error or an empty page; the call itself must return.
        let result = PdfExtractStrategy.extract(&[0x25, 0x50, 0x44, 0x46, 0x00, 0xFF]);
        if let Ok(output) = result {
            assert!(output.text.trim().is_empty());
        }
    }

    #[test]
    fn test_raw_bytes_requires_readable_words() {
        let short = RawBytesStrategy.extract(b"just a handful of words here").unwrap();
        assert!(short.text.is_empty());

        let long_text = "experienced engineer building reliable systems ".repeat(20);
        let long = RawBytesStrategy.extract(long_text.as_bytes()).unwrap();
        assert!(long.text.starts_with("experienced engineer"));
        assert!(!long.text.contains("  "));
    }

    #[test]
    fn test_raw_bytes_strips_binary_noise() {
        let mut bytes = "resume text with several words ".repeat(15).into_bytes();
        bytes.extend_from_slice(&[0x00, 0x01, 0xC3, 0x28, 0x7F]);
        let output = RawBytesStrategy.extract(&bytes).unwrap();
        assert!(output.text.chars().all(|c| (' '..='~').contains(&c)));
    }

    #[test]
    fn test_decode_pdf_string_utf16() {
        let bytes = [0xFE, 0xFF, 0x00, 0x52, 0x00, 0x75, 0x00, 0x73, 0x00, 0x74];
        assert_eq!(decode_pdf_string(&bytes), "Rust");
        assert_eq!(decode_pdf_string(b"Go"), "Go");
    }

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let text = join_pages(["alpha", "   ", "gamma"].into_iter());
        assert!(text.contains("--- Page 1 ---"));
        assert!(!text.contains("--- Page 2 ---"));
        assert!(text.contains("--- Page 3 ---\ngamma"));
    }

    #[test]
    fn test_guarded_captures_panic_message() {
        let err = guarded(|| -> u8 { panic!("boom") }).unwrap_err();
        assert!(matches!(err, StrategyError::Panicked(ref m) if m == "boom"));
    }
}

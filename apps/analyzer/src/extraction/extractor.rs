use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::strategies::{
    ContentStreamStrategy, ExtractionStrategy, LopdfTextStrategy, PdfExtractStrategy,
    RawBytesStrategy,
};

/// Identifies the strategy that produced (or attempted to produce) the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    PdfExtract,
    LopdfText,
    ContentStream,
    RawBytes,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionMethod::PdfExtract => "pdf_extract",
            ExtractionMethod::LopdfText => "lopdf_text",
            ExtractionMethod::ContentStream => "content_stream",
            ExtractionMethod::RawBytes => "raw_bytes",
        };
        f.write_str(name)
    }
}

/// Fidelity grade of the accepted extraction. Ordered best → worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionQuality {
    Excellent,
    Good,
    Basic,
    Poor,
    Failed,
}

/// Outcome of running the fallback chain over one document.
///
/// `method_used` is `Some` exactly when `text` is non-empty and passed the
/// winning strategy's threshold; otherwise `quality` is `Failed` and `text` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub method_used: Option<ExtractionMethod>,
    pub page_count: usize,
    pub quality: ExtractionQuality,
    pub attempted_methods: Vec<ExtractionMethod>,
    pub errors: Vec<String>,
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        self.method_used.is_some()
    }
}

/// Runs strategies in priority order until one yields enough text.
pub struct DocumentExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::standard()
    }
}

impl DocumentExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// The standard chain: pdf-extract → lopdf text → content streams → raw bytes.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(PdfExtractStrategy),
            Box::new(LopdfTextStrategy),
            Box::new(ContentStreamStrategy),
            Box::new(RawBytesStrategy),
        ])
    }

    /// Never fails: strategy errors are collected into `errors`, and an exhausted
    /// chain yields `quality = Failed` with empty text.
    pub fn extract(&self, bytes: &[u8]) -> ExtractionResult {
        let mut attempted_methods = Vec::with_capacity(self.strategies.len());
        let mut errors = Vec::new();
        let mut page_count = 0;

        for strategy in &self.strategies {
            let method = strategy.method();
            attempted_methods.push(method);
            info!("Attempting text extraction with {method}");

            match strategy.extract(bytes) {
                Ok(output) => {
                    if output.page_count > 0 {
                        page_count = output.page_count;
                    }
                    let length = output.text.trim().chars().count();
                    if length > strategy.min_chars() {
                        info!("{method}: extracted {length} characters");
                        return ExtractionResult {
                            text: output.text,
                            method_used: Some(method),
                            page_count,
                            quality: strategy.quality(),
                            attempted_methods,
                            errors,
                        };
                    }
                    info!(
                        "{method}: {length} characters is below the {} character threshold",
                        strategy.min_chars()
                    );
                }
                Err(e) => {
                    let message = format!("{method} extraction failed: {e}");
                    warn!("{message}");
                    errors.push(message);
                }
            }
        }

        error!("All text extraction methods failed");
        ExtractionResult {
            text: String::new(),
            method_used: None,
            page_count,
            quality: ExtractionQuality::Failed,
            attempted_methods,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::strategies::{StrategyError, StrategyOutput};
    use crate::extraction::test_pdf::build_pdf;

    struct Fixed {
        method: ExtractionMethod,
        min_chars: usize,
        outcome: Result<&'static str, &'static str>,
    }

    impl ExtractionStrategy for Fixed {
        fn method(&self) -> ExtractionMethod {
            self.method
        }
        fn quality(&self) -> ExtractionQuality {
            match self.method {
                ExtractionMethod::PdfExtract => ExtractionQuality::Excellent,
                ExtractionMethod::LopdfText => ExtractionQuality::Good,
                ExtractionMethod::ContentStream => ExtractionQuality::Basic,
                ExtractionMethod::RawBytes => ExtractionQuality::Poor,
            }
        }
        fn min_chars(&self) -> usize {
            self.min_chars
        }
        fn extract(&self, _bytes: &[u8]) -> Result<StrategyOutput, StrategyError> {
            match self.outcome {
                Ok(text) => Ok(StrategyOutput {
                    text: text.to_string(),
                    page_count: 1,
                }),
                Err(msg) => Err(StrategyError::Extract(msg.to_string())),
            }
        }
    }

    fn fixed(
        method: ExtractionMethod,
        min_chars: usize,
        outcome: Result<&'static str, &'static str>,
    ) -> Box<dyn ExtractionStrategy> {
        Box::new(Fixed {
            method,
            min_chars,
            outcome,
        })
    }

    #[test]
    fn test_error_does_not_stop_the_chain() {
        let extractor = DocumentExtractor::new(vec![
            fixed(ExtractionMethod::PdfExtract, 5, Err("corrupt xref")),
            fixed(ExtractionMethod::LopdfText, 5, Ok("plenty of text here")),
        ]);
        let result = extractor.extract(b"%PDF");
        assert_eq!(result.method_used, Some(ExtractionMethod::LopdfText));
        assert_eq!(result.quality, ExtractionQuality::Good);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("corrupt xref"));
        assert_eq!(
            result.attempted_methods,
            vec![ExtractionMethod::PdfExtract, ExtractionMethod::LopdfText]
        );
    }

    #[test]
    fn test_short_text_falls_through_to_next_strategy() {
        let extractor = DocumentExtractor::new(vec![
            fixed(ExtractionMethod::PdfExtract, 50, Ok("too short")),
            fixed(ExtractionMethod::ContentStream, 3, Ok("too short")),
        ]);
        let result = extractor.extract(b"");
        assert_eq!(result.method_used, Some(ExtractionMethod::ContentStream));
        assert_eq!(result.quality, ExtractionQuality::Basic);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        let extractor =
            DocumentExtractor::new(vec![fixed(ExtractionMethod::PdfExtract, 5, Ok("  12345  "))]);
        let result = extractor.extract(b"");
        assert_eq!(result.quality, ExtractionQuality::Failed);
        assert!(result.text.is_empty());
        assert!(result.method_used.is_none());
    }

    #[test]
    fn test_empty_input_fails_without_panicking() {
        let result = DocumentExtractor::standard().extract(&[]);
        assert_eq!(result.quality, ExtractionQuality::Failed);
        assert!(result.text.is_empty());
        assert!(!result.is_success());
        assert_eq!(result.attempted_methods.len(), 4);
    }

    #[test]
    fn test_unstructured_bytes_fail() {
        let inputs: [&[u8]; 3] = [b"hello", &[0u8; 512], b"%PDF-1.4 truncated garbage"];
        for bytes in inputs {
            let result = DocumentExtractor::standard().extract(bytes);
            assert_eq!(result.quality, ExtractionQuality::Failed);
            assert_eq!(result.text, "");
        }
    }

    #[test]
    fn test_generated_pdf_is_extracted() {
        let line = "Senior Software Engineer with Python, Rust and AWS experience";
        let lines = [line; 8];
        let pdf = build_pdf(&[&lines]);

        let result = DocumentExtractor::standard().extract(&pdf);
        assert!(result.is_success(), "errors: {:?}", result.errors);
        assert_ne!(result.quality, ExtractionQuality::Failed);
        assert_eq!(result.page_count, 1);
        assert!(result.text.contains("Python"));
    }

    #[test]
    fn test_quality_ordering() {
        assert!(ExtractionQuality::Excellent < ExtractionQuality::Poor);
        assert!(ExtractionQuality::Basic < ExtractionQuality::Failed);
    }
}

// Document text extraction: an ordered fallback chain of strategies over raw PDF bytes.
// Strategy failures are recorded, never raised; the chain is the only retry mechanism.

pub mod extractor;
pub mod strategies;

pub use extractor::{DocumentExtractor, ExtractionMethod, ExtractionQuality, ExtractionResult};
pub use strategies::{ExtractionStrategy, StrategyError, StrategyOutput};

/// Marker inserted between pages. The normalizer strips it again.
pub fn page_marker(page_number: usize) -> String {
    format!("\n--- Page {page_number} ---\n")
}

#[cfg(test)]
pub(crate) mod test_pdf;

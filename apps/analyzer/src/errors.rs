use thiserror::Error;

/// Terminal failures of a single analysis call.
///
/// Strategy-level extraction errors never surface here: the extractor records
/// them in `ExtractionResult::errors` and moves on. Only the outcomes below abort
/// the whole analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Skill catalog error: {0}")]
    Catalog(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Stable machine-readable code, used in log lines and the demo's error output.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Extraction(_) => "EXTRACTION_FAILURE",
            AnalysisError::Validation(_) => "VALIDATION_FAILURE",
            AnalysisError::Catalog(_) => "CATALOG_ERROR",
            AnalysisError::Io(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            AnalysisError::Extraction("x".into()).code(),
            AnalysisError::Validation("x".into()).code(),
            AnalysisError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "x")).code(),
        ];
        assert_eq!(codes, ["EXTRACTION_FAILURE", "VALIDATION_FAILURE", "IO_ERROR"]);
    }

    #[test]
    fn test_display_includes_message() {
        let err = AnalysisError::Validation("text too short".to_string());
        assert_eq!(err.to_string(), "Validation error: text too short");
    }
}

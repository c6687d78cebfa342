// Orchestration: one configurable pipeline from document bytes to the full report.
// The `Fidelity` knob trades per-skill detail for speed.

pub mod pipeline;
pub mod report;

use serde::{Deserialize, Serialize};

pub use pipeline::{Analyzer, RawDocument, MIN_TEXT_CHARS};
pub use report::{AnalysisMetadata, AnalysisReport, ExtractedData, ExtractionDetails, SkillsAnalysis};

/// How much detail an analysis computes.
///
/// `Fast` skips context snippets, per-skill years, sentence segmentation and
/// interview questions. Scores and recommendations are identical in both modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fidelity {
    #[default]
    Full,
    Fast,
}

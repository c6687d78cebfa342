//! `Analyzer` — runs every stage over one document and assembles the report.
//!
//! extract → validate → normalize → match skills → classify experience →
//! recommend roles → advise → interview questions → score
//!
//! Only extraction and validation can fail. Every later stage is a total
//! function of its inputs, so once text is accepted a report is always produced.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use super::report::{AnalysisMetadata, AnalysisReport, ExtractedData, ExtractionDetails, SkillsAnalysis};
use super::Fidelity;
use crate::advice::{advise, interview_questions};
use crate::errors::AnalysisError;
use crate::experience::classify;
use crate::extraction::DocumentExtractor;
use crate::preprocessing::{normalize, RegexSentenceSegmenter, SentenceSegmenter};
use crate::recommendations::recommend;
use crate::scoring::score;
use crate::skills::{match_skills, SkillCatalog};

/// Inputs and extracted or cleaned texts shorter than this are rejected.
pub const MIN_TEXT_CHARS: usize = 50;

/// A document submitted for analysis.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Vec<u8>>, filename: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            filename,
        }
    }
}

/// Stateless between calls; share one instance (or clones of its catalog) freely.
pub struct Analyzer {
    catalog: Arc<SkillCatalog>,
    extractor: DocumentExtractor,
    segmenter: Option<Box<dyn SentenceSegmenter>>,
    fidelity: Fidelity,
}

impl Analyzer {
    /// Standard extraction chain and the regex sentence segmenter.
    pub fn new(catalog: Arc<SkillCatalog>, fidelity: Fidelity) -> Self {
        Self {
            catalog,
            extractor: DocumentExtractor::standard(),
            segmenter: Some(Box::new(RegexSentenceSegmenter)),
            fidelity,
        }
    }

    pub fn with_extractor(mut self, extractor: DocumentExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// `None` disables sentence counting; reports then carry no sentence count.
    pub fn with_segmenter(mut self, segmenter: Option<Box<dyn SentenceSegmenter>>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn fidelity(&self) -> Fidelity {
        self.fidelity
    }

    /// Reads `path` and analyzes it, using the file name as the report's filename.
    pub fn analyze_path(&self, path: impl AsRef<Path>) -> Result<AnalysisReport, AnalysisError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.analyze(&RawDocument::new(bytes, filename))
    }

    pub fn analyze(&self, document: &RawDocument) -> Result<AnalysisReport, AnalysisError> {
        let started = Instant::now();
        let timestamp = Utc::now();
        let label = document.filename.as_deref().unwrap_or("<unnamed>");
        info!(
            "Starting {:?} analysis of {label} ({} bytes)",
            self.fidelity,
            document.bytes.len()
        );

        let extraction = self.extractor.extract(&document.bytes);
        if !extraction.is_success() {
            if document.bytes.len() < MIN_TEXT_CHARS {
                return Err(AnalysisError::Validation(format!(
                    "document is {} bytes; at least {MIN_TEXT_CHARS} are required",
                    document.bytes.len()
                )));
            }
            return Err(AnalysisError::Extraction(format!(
                "no extraction method produced usable text (tried {})",
                extraction
                    .attempted_methods
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        info!(
            "Extraction completed: {} characters, quality {:?}",
            extraction.text.chars().count(),
            extraction.quality
        );

        let segmenter = match (self.fidelity, self.segmenter.as_deref()) {
            (Fidelity::Fast, _) => None,
            (Fidelity::Full, None) => {
                warn!("No sentence segmenter configured, sentence count omitted");
                None
            }
            (Fidelity::Full, Some(segmenter)) => Some(segmenter),
        };
        let normalized = normalize(&extraction.text, segmenter);
        let cleaned_chars = normalized.text.trim().chars().count();
        if cleaned_chars < MIN_TEXT_CHARS {
            return Err(AnalysisError::Validation(format!(
                "extracted text is too short after cleaning ({cleaned_chars} characters)"
            )));
        }
        info!(
            "Text preprocessing completed: {} characters after cleaning",
            normalized.metadata.cleaned_length
        );

        let skills = match_skills(&normalized, &self.catalog, self.fidelity);
        info!(
            "Skills extraction completed: {} technical skills found",
            skills.technical_count()
        );

        let experience = classify(&normalized, &skills);
        info!(
            "Experience analysis completed: {} level with {}% confidence",
            experience.level, experience.confidence
        );

        let job_recommendations = recommend(&skills, &experience);
        info!("Generated {} job recommendations", job_recommendations.len());

        let improvement_suggestions = advise(&normalized, &skills, &experience);
        info!(
            "Generated {} improvement suggestions",
            improvement_suggestions.len()
        );

        let interview_questions = match self.fidelity {
            Fidelity::Full => interview_questions(&skills, &experience),
            Fidelity::Fast => Vec::new(),
        };

        let score_analysis = score(&skills, &experience, &normalized, extraction.quality);
        info!(
            "Overall score: {}/100 (grade {})",
            score_analysis.total, score_analysis.grade
        );

        let analysis_time_seconds = started.elapsed().as_secs_f64();
        info!("Analysis completed in {analysis_time_seconds:.2} seconds");

        Ok(AnalysisReport {
            analysis_metadata: AnalysisMetadata {
                filename: document.filename.clone(),
                analysis_time_seconds,
                analysis_timestamp: timestamp,
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                fidelity: self.fidelity,
                extraction_method: extraction.method_used,
                extraction_quality: extraction.quality,
            },
            extraction_details: ExtractionDetails::new(&extraction, &normalized),
            preprocessing_info: normalized.metadata.clone(),
            skills_analysis: SkillsAnalysis::from(&skills),
            experience_analysis: experience,
            score_analysis,
            job_recommendations,
            improvement_suggestions,
            interview_questions,
            extracted_data: ExtractedData {
                text_length: extraction.text.chars().count(),
                full_text: extraction.text,
                cleaned_text: normalized.text,
                filename: document.filename.clone(),
            },
        })
    }
}

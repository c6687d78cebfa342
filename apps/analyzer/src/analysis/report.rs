//! The aggregate report returned by one analysis. Every field group below is a
//! top-level key of the serialized JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Fidelity;
use crate::advice::{InterviewQuestion, Suggestion};
use crate::experience::ExperienceAssessment;
use crate::extraction::{ExtractionMethod, ExtractionQuality, ExtractionResult};
use crate::preprocessing::{NormalizedText, TextMetadata};
use crate::recommendations::JobRecommendation;
use crate::scoring::ScoreBreakdown;
use crate::skills::{PrimaryStack, SkillRecord, SkillSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_metadata: AnalysisMetadata,
    pub extraction_details: ExtractionDetails,
    pub preprocessing_info: TextMetadata,
    pub skills_analysis: SkillsAnalysis,
    pub experience_analysis: ExperienceAssessment,
    pub score_analysis: ScoreBreakdown,
    pub job_recommendations: Vec<JobRecommendation>,
    pub improvement_suggestions: Vec<Suggestion>,
    pub interview_questions: Vec<InterviewQuestion>,
    pub extracted_data: ExtractedData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub filename: Option<String>,
    pub analysis_time_seconds: f64,
    pub analysis_timestamp: DateTime<Utc>,
    pub analyzer_version: String,
    pub fidelity: Fidelity,
    pub extraction_method: Option<ExtractionMethod>,
    pub extraction_quality: ExtractionQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionDetails {
    pub original_text_length: usize,
    pub cleaned_text_length: usize,
    pub page_count: usize,
    pub methods_tried: Vec<ExtractionMethod>,
    pub extraction_errors: Vec<String>,
}

impl ExtractionDetails {
    pub fn new(extraction: &ExtractionResult, normalized: &NormalizedText) -> Self {
        Self {
            original_text_length: extraction.text.chars().count(),
            cleaned_text_length: normalized.metadata.cleaned_length,
            page_count: extraction.page_count,
            methods_tried: extraction.attempted_methods.clone(),
            extraction_errors: extraction.errors.clone(),
        }
    }
}

/// Matched skills in the grouped form plus the flattened per-category views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsAnalysis {
    /// category → subcategory → skill names.
    pub technical_skills: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    pub skill_details: Vec<SkillRecord>,
    pub soft_skills: Vec<String>,
    pub certifications: Vec<String>,
    pub industry_domains: Vec<String>,
    pub programming_languages: Vec<String>,
    pub frameworks_and_libraries: Vec<String>,
    pub databases: Vec<String>,
    pub cloud_platforms: Vec<String>,
    pub tools_and_technologies: Vec<String>,
    pub skill_confidence_scores: BTreeMap<String, u8>,
    pub years_of_experience: BTreeMap<String, u32>,
    pub primary_stack: Option<PrimaryStack>,
    pub total_technical_skills: usize,
}

impl From<&SkillSet> for SkillsAnalysis {
    fn from(skills: &SkillSet) -> Self {
        Self {
            technical_skills: skills.grouped(),
            skill_details: skills.technical.clone(),
            soft_skills: skills.soft_skills.clone(),
            certifications: skills.certifications.clone(),
            industry_domains: skills.industry_domains.clone(),
            programming_languages: skills.programming_languages(),
            frameworks_and_libraries: skills.frameworks_and_libraries(),
            databases: skills.databases(),
            cloud_platforms: skills.cloud_platforms(),
            tools_and_technologies: skills.tools_and_technologies(),
            skill_confidence_scores: skills
                .technical
                .iter()
                .map(|r| (r.name.clone(), r.confidence_score))
                .collect(),
            years_of_experience: skills
                .technical
                .iter()
                .filter_map(|r| Some((r.name.clone(), r.years_claimed?)))
                .collect(),
            primary_stack: skills.primary_stack,
            total_technical_skills: skills.technical_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub full_text: String,
    pub cleaned_text: String,
    pub text_length: usize,
    pub filename: Option<String>,
}

//! Improvement advice — a fixed checklist evaluated against the analysis.
//!
//! Checks run in priority order and every failing check contributes one
//! templated suggestion. The ATS formatting tip is unconditional, so the list
//! is never empty. Only the first [`MAX_SUGGESTIONS`] are returned.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::experience::{ExperienceAssessment, ExperienceLevel};
use crate::preprocessing::NormalizedText;
use crate::skills::SkillSet;

pub const MAX_SUGGESTIONS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub priority: Priority,
    pub text: String,
    pub impact: String,
    pub timeline: String,
    pub resources: Vec<String>,
}

static ACHIEVEMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d+%",
        r"increased.*?\d+",
        r"improved.*?\d+",
        r"reduced.*?\d+",
        r"saved.*?\$\d+",
        r"generated.*?\$\d+",
        r"managed.*?\$\d+",
        r"led.*?team.*?\d+",
        r"supervised.*?\d+",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?s){p}")).unwrap())
    .collect()
});

static PORTFOLIO_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"github\.com",
        r"gitlab\.com",
        r"portfolio",
        r"project.*?link",
        r"demo.*?link",
        r"live.*?site",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?s){p}")).unwrap())
    .collect()
});

/// Percentages, or a result verb followed by a number.
pub fn has_quantifiable_achievements(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ACHIEVEMENT_PATTERNS.iter().any(|p| p.is_match(&lowered))
}

/// Code-hosting URLs or portfolio/demo/project link mentions.
pub fn has_portfolio_links(text: &str) -> bool {
    let lowered = text.to_lowercase();
    PORTFOLIO_PATTERNS.iter().any(|p| p.is_match(&lowered))
}

fn suggestion(
    category: &str,
    priority: Priority,
    text: &str,
    impact: &str,
    timeline: &str,
    resources: &[&str],
) -> Suggestion {
    Suggestion {
        category: category.to_string(),
        priority,
        text: text.to_string(),
        impact: impact.to_string(),
        timeline: timeline.to_string(),
        resources: resources.iter().map(|r| r.to_string()).collect(),
    }
}

pub fn advise(
    normalized: &NormalizedText,
    skills: &SkillSet,
    experience: &ExperienceAssessment,
) -> Vec<Suggestion> {
    let text = normalized.text.as_str();
    let mut suggestions = Vec::new();

    if skills.programming_languages().len() < 2 {
        suggestions.push(suggestion(
            "Technical Skills",
            Priority::High,
            "Learn additional programming languages to increase versatility. Consider Python for data science or JavaScript for web development.",
            "Significantly increases job opportunities",
            "3-6 months",
            &["Online courses", "Coding bootcamps", "Practice projects"],
        ));
    }

    if skills.cloud_platforms().is_empty() {
        suggestions.push(suggestion(
            "Technical Skills",
            Priority::High,
            "Gain cloud computing experience with AWS, Azure, or Google Cloud. Cloud skills are in high demand.",
            "Opens opportunities in modern tech companies",
            "2-4 months",
            &["AWS Free Tier", "Azure Learning Path", "Google Cloud Training"],
        ));
    }

    if !has_quantifiable_achievements(text) {
        suggestions.push(suggestion(
            "Content Quality",
            Priority::High,
            "Add quantifiable achievements with specific metrics (e.g., \"Improved performance by 40%\", \"Led team of 5 developers\").",
            "Makes resume more compelling to recruiters",
            "1-2 weeks",
            &["Resume writing guides", "Achievement frameworks"],
        ));
    }

    if experience.level >= ExperienceLevel::Mid && !experience.has_leadership() {
        suggestions.push(suggestion(
            "Experience",
            Priority::Medium,
            "Highlight leadership experience, mentoring, or project management roles to demonstrate growth.",
            "Essential for senior-level positions",
            "Immediate (if experience exists)",
            &["Leadership frameworks", "Mentoring programs"],
        ));
    }

    if !has_portfolio_links(text) {
        suggestions.push(suggestion(
            "Portfolio",
            Priority::Medium,
            "Include links to GitHub profile, portfolio website, or notable projects to showcase your work.",
            "Provides concrete evidence of skills",
            "2-4 weeks",
            &["GitHub Pages", "Portfolio templates", "Project documentation"],
        ));
    }

    if skills.certifications.is_empty() {
        suggestions.push(suggestion(
            "Credentials",
            Priority::Medium,
            "Consider obtaining relevant certifications (AWS, Google Cloud, Microsoft, etc.) to validate your skills.",
            "Increases credibility and market value",
            "1-3 months per certification",
            &["Official certification programs", "Practice exams", "Study groups"],
        ));
    }

    suggestions.push(suggestion(
        "Format",
        Priority::Low,
        "Optimize resume for ATS (Applicant Tracking Systems) by using standard section headers and relevant keywords.",
        "Improves chances of passing initial screening",
        "1-2 days",
        &["ATS optimization guides", "Keyword research tools"],
    ));

    if skills.soft_skills.len() < 3 {
        suggestions.push(suggestion(
            "Soft Skills",
            Priority::Low,
            "Highlight soft skills like communication, teamwork, and problem-solving with specific examples.",
            "Demonstrates well-rounded professional profile",
            "Immediate",
            &["Soft skills assessment", "Professional development courses"],
        ));
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

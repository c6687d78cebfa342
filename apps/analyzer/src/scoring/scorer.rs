//! Resume scorer — five weighted sub-scores summed into a 0–100 total.
//!
//! | Sub-score            | Max | Rule                                                   |
//! |----------------------|-----|--------------------------------------------------------|
//! | technical_skills     | 30  | 30 / 25 / 20 / 10 at ≥15 / ≥10 / ≥5 / fewer skills      |
//! | experience_quality   | 25  | 15 + level bonus + 5 leadership + 5 confidence > 80     |
//! | content_structure    | 20  | 3 per detected section + 5 for 200–600 words           |
//! | achievements         | 15  | 15 with a quantified result, else 5                    |
//! | completeness         | 10  | 3 certifications + 4 portfolio + 3 for ≥3 soft skills  |
//!
//! `extraction_quality` (0–5) is reported alongside but never added to the total.

use serde::{Deserialize, Serialize};

use super::grade::Grade;
use crate::advice::{has_portfolio_links, has_quantifiable_achievements};
use crate::experience::{ExperienceAssessment, ExperienceLevel};
use crate::extraction::ExtractionQuality;
use crate::preprocessing::NormalizedText;
use crate::skills::SkillSet;

const MIN_DETAILED_WORDS: usize = 200;
const MAX_CONCISE_WORDS: usize = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub technical_skills: u8,
    pub experience_quality: u8,
    pub content_structure: u8,
    pub achievements: u8,
    pub completeness: u8,
    pub extraction_quality: u8,
    pub total: u8,
    pub grade: Grade,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

/// Accumulates strengths and improvement areas while sub-scores are computed.
#[derive(Default)]
struct Feedback {
    strengths: Vec<String>,
    areas_for_improvement: Vec<String>,
}

impl Feedback {
    fn strength(&mut self, text: &str) {
        self.strengths.push(text.to_string());
    }

    fn improve(&mut self, text: &str) {
        self.areas_for_improvement.push(text.to_string());
    }
}

pub fn score(
    skills: &SkillSet,
    experience: &ExperienceAssessment,
    normalized: &NormalizedText,
    extraction_quality: ExtractionQuality,
) -> ScoreBreakdown {
    let mut feedback = Feedback::default();
    let text = normalized.text.as_str();

    let technical_skills = technical_skills(skills.technical_count(), &mut feedback);
    let experience_quality = experience_quality(experience, &mut feedback);
    let content_structure = content_structure(normalized, &mut feedback);

    let achievements = if has_quantifiable_achievements(text) {
        feedback.strength("Quantifiable achievements included");
        15
    } else {
        feedback.improve("Add quantifiable achievements");
        5
    };

    let completeness = completeness(skills, text, &mut feedback);
    let extraction_quality = extraction_bonus(extraction_quality, &mut feedback);

    let sum = technical_skills as u32
        + experience_quality as u32
        + content_structure as u32
        + achievements as u32
        + completeness as u32;
    let total = sum.min(100) as u8;

    ScoreBreakdown {
        technical_skills,
        experience_quality,
        content_structure,
        achievements,
        completeness,
        extraction_quality,
        total,
        grade: Grade::from_total(total),
        strengths: feedback.strengths,
        areas_for_improvement: feedback.areas_for_improvement,
    }
}

fn technical_skills(count: usize, feedback: &mut Feedback) -> u8 {
    match count {
        n if n >= 15 => {
            feedback.strength("Excellent technical skill diversity");
            30
        }
        n if n >= 10 => {
            feedback.strength("Good technical skill range");
            25
        }
        n if n >= 5 => 20,
        _ => {
            feedback.improve("Limited technical skills listed");
            10
        }
    }
}

fn experience_quality(experience: &ExperienceAssessment, feedback: &mut Feedback) -> u8 {
    let mut points = 15;
    points += match experience.level {
        ExperienceLevel::Senior => 10,
        ExperienceLevel::Mid => 5,
        ExperienceLevel::Junior => 0,
    };
    if experience.has_leadership() {
        points += 5;
        feedback.strength("Leadership experience demonstrated");
    }
    if experience.confidence > 80 {
        points += 5;
    }
    points.min(25)
}

fn content_structure(normalized: &NormalizedText, feedback: &mut Feedback) -> u8 {
    let sections = normalized.metadata.detected_sections.len() as u8;
    let words = normalized.metadata.word_count;
    let mut points = sections * 3;
    if words < MIN_DETAILED_WORDS {
        feedback.improve("Resume lacks sufficient detail");
    } else if words > MAX_CONCISE_WORDS {
        feedback.improve("Resume may be too lengthy");
    } else {
        points += 5;
    }
    points.min(20)
}

fn completeness(skills: &SkillSet, text: &str, feedback: &mut Feedback) -> u8 {
    let mut points = 0;
    if !skills.certifications.is_empty() {
        points += 3;
        feedback.strength("Professional certifications listed");
    }
    if has_portfolio_links(text) {
        points += 4;
        feedback.strength("Portfolio/project links included");
    }
    if skills.soft_skills.len() >= 3 {
        points += 3;
    } else {
        feedback.improve("Include more soft skills");
    }
    points
}

fn extraction_bonus(quality: ExtractionQuality, feedback: &mut Feedback) -> u8 {
    match quality {
        ExtractionQuality::Excellent => 5,
        ExtractionQuality::Good => 3,
        ExtractionQuality::Basic => 1,
        ExtractionQuality::Poor | ExtractionQuality::Failed => {
            feedback.improve("PDF format may need optimization");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Fidelity;
    use crate::experience::classify;
    use crate::preprocessing::normalize;
    use crate::skills::{match_skills, SkillCatalog};

    fn run(text: &str, quality: ExtractionQuality) -> ScoreBreakdown {
        let catalog = SkillCatalog::new().unwrap();
        let normalized = normalize(text, None);
        let skills = match_skills(&normalized, &catalog, Fidelity::Full);
        let experience = classify(&normalized, &skills);
        score(&skills, &experience, &normalized, quality)
    }

    #[test]
    fn test_zero_skill_text_scores_ten_for_skills() {
        let s = run("I enjoy hiking and painting landscapes", ExtractionQuality::Excellent);
        assert_eq!(s.technical_skills, 10);
        assert!(s
            .areas_for_improvement
            .contains(&"Limited technical skills listed".to_string()));
    }

    #[test]
    fn test_minimal_text_breakdown() {
        // Junior (15), no sections, short text, no achievements, nothing complete.
        let s = run("I enjoy hiking and painting landscapes", ExtractionQuality::Poor);
        assert_eq!(s.experience_quality, 15);
        assert_eq!(s.content_structure, 0);
        assert_eq!(s.achievements, 5);
        assert_eq!(s.completeness, 0);
        assert_eq!(s.extraction_quality, 0);
        assert_eq!(s.total, 30);
        assert_eq!(s.grade, Grade::CMinus);
        assert_eq!(
            s.areas_for_improvement,
            vec![
                "Limited technical skills listed",
                "Resume lacks sufficient detail",
                "Add quantifiable achievements",
                "Include more soft skills",
                "PDF format may need optimization",
            ]
        );
    }

    #[test]
    fn test_extraction_quality_not_in_total() {
        let text = "Python developer";
        let excellent = run(text, ExtractionQuality::Excellent);
        let failed = run(text, ExtractionQuality::Failed);
        assert_eq!(excellent.extraction_quality, 5);
        assert_eq!(failed.extraction_quality, 0);
        assert_eq!(excellent.total, failed.total);
    }

    #[test]
    fn test_experience_quality_capped() {
        let text = "Senior engineer. Led team of 6.\n\
                    Python Java Go Rust Ruby PHP Scala Kotlin Swift Perl\n\
                    React Angular Vue HTML CSS\n\
                    MySQL PostgreSQL MongoDB Redis\n\
                    AWS Azure Docker Kubernetes Jenkins Terraform";
        let s = run(text, ExtractionQuality::Good);
        // 15 + 10 + 5 + 5 clamps to 25.
        assert_eq!(s.experience_quality, 25);
        assert_eq!(s.technical_skills, 30);
        assert!(s
            .strengths
            .contains(&"Excellent technical skill diversity".to_string()));
        assert!(s
            .strengths
            .contains(&"Leadership experience demonstrated".to_string()));
    }

    #[test]
    fn test_completeness_components() {
        let text = "AWS Certified. Portfolio at github.com/someone.\n\
                    Leadership, teamwork and communication.";
        let s = run(text, ExtractionQuality::Good);
        assert_eq!(s.completeness, 10);
        assert!(s
            .strengths
            .contains(&"Professional certifications listed".to_string()));
        assert!(s
            .strengths
            .contains(&"Portfolio/project links included".to_string()));
    }

    #[test]
    fn test_content_structure_rewards_sections_and_length() {
        let mut text = String::from(
            "Summary\nExperience\nEducation\nSkills\nProjects\nCertifications\n",
        );
        for _ in 0..50 {
            text.push_str("built reliable systems daily\n");
        }
        let s = run(&text, ExtractionQuality::Good);
        // 6 sections give 18, plus 5 for length, capped at 20.
        assert_eq!(s.content_structure, 20);
        assert!(s.total <= 100);
    }
}

//! Experience classifier — infers seniority from stated years, title keywords
//! and leadership claims, then adjusts confidence by skill breadth.
//!
//! Decision order (first match wins):
//! 1. max years ≥ 8, or any senior keyword → Senior, base confidence 70
//! 2. max years ≥ 3, or any mid keyword    → Mid, base confidence 60
//! 3. otherwise                            → Junior, base confidence 50
//!
//! A single senior keyword outranks any amount of skill breadth.
//!
//! Senior and mid keywords match as whole words, so "leadership" does not
//! count as "lead" and "associated" does not count as "associate". Only a
//! title word standing on its own promotes the level.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::preprocessing::NormalizedText;
use crate::skills::SkillSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAssessment {
    pub level: ExperienceLevel,
    /// 0–95.
    pub confidence: u8,
    /// Every plausible (1–50) year count stated in the text, in pattern order.
    pub years_observed: Vec<u32>,
    pub max_years: u32,
    pub leadership_mentions: Vec<String>,
    /// Number of distinct technical skills.
    pub technical_depth: usize,
    /// Number of skill categories with at least one skill.
    pub breadth: usize,
    pub indicators: Vec<String>,
}

impl ExperienceAssessment {
    pub fn has_leadership(&self) -> bool {
        !self.leadership_mentions.is_empty()
    }
}

const SENIOR_KEYWORDS: &[&str] = &[
    "senior",
    "lead",
    "principal",
    "architect",
    "manager",
    "director",
    "head of",
    "vp",
    "cto",
    "chief",
    "team lead",
    "technical lead",
    "staff engineer",
    "distinguished engineer",
];

const MID_KEYWORDS: &[&str] = &[
    "mid-level",
    "intermediate",
    "software engineer ii",
    "engineer ii",
    "associate",
    "specialist",
];

const MAX_PLAUSIBLE_YEARS: u32 = 50;

static YEARS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d+)\+?\s*years?\s*(?:of\s*)?(?:experience|exp)",
        r"(\d+)\+?\s*yrs?\s*(?:of\s*)?(?:experience|exp)",
        r"(?s)experience.*?(\d+)\+?\s*years?",
        r"(\d+)\+?\s*years?\s*in\s*(?:software|development|programming)",
        r"over\s*(\d+)\s*years?",
        r"more\s*than\s*(\d+)\s*years?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Leadership pattern → label prefix/suffix around the captured count.
static LEADERSHIP_PATTERNS: Lazy<Vec<(Regex, &'static str, &'static str)>> = Lazy::new(|| {
    [
        (r"\bled\s+(?:a\s+)?team\s+of\s+(\d+)", "Led team of ", ""),
        (
            r"\bmanaged\s+(\d+)\s+(?:developers|engineers|people)",
            "Managed ",
            " people",
        ),
        (r"\bmentored\s+(\d+)", "Mentored ", ""),
        (r"\bsupervised\s+(\d+)", "Supervised ", ""),
        (r"\bcoordinated\s+with\s+(\d+)", "Coordinated with ", ""),
    ]
    .into_iter()
    .map(|(p, prefix, suffix)| (Regex::new(p).unwrap(), prefix, suffix))
    .collect()
});

static SENIOR_PATTERN: Lazy<Regex> = Lazy::new(|| keyword_pattern(SENIOR_KEYWORDS));
static MID_PATTERN: Lazy<Regex> = Lazy::new(|| keyword_pattern(MID_KEYWORDS));

fn keyword_pattern(keywords: &[&str]) -> Regex {
    let alternatives: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))).unwrap()
}

pub fn classify(normalized: &NormalizedText, skills: &SkillSet) -> ExperienceAssessment {
    let text = normalized.text.to_lowercase();

    let years_observed = years_observed(&text);
    let max_years = years_observed.iter().copied().max().unwrap_or(0);
    let leadership_mentions = leadership_mentions(&text);
    let technical_depth = skills.technical_count();
    let breadth = skills.populated_categories();

    let mut indicators = Vec::new();
    let years_indicator = |fallback: &str| {
        if max_years > 0 {
            format!("Years: {max_years}")
        } else {
            fallback.to_string()
        }
    };

    let (level, base) = if max_years >= 8 || SENIOR_PATTERN.is_match(&text) {
        indicators.push(years_indicator("Senior keywords found"));
        (ExperienceLevel::Senior, 70)
    } else if max_years >= 3 || MID_PATTERN.is_match(&text) {
        indicators.push(years_indicator("Mid-level keywords found"));
        (ExperienceLevel::Mid, 60)
    } else {
        indicators.push("Limited experience indicators".to_string());
        (ExperienceLevel::Junior, 50)
    };

    let mut confidence: u32 = base;
    if technical_depth > 15 {
        confidence += 20;
        indicators.push(format!("High technical skill count: {technical_depth}"));
    } else if technical_depth > 8 {
        confidence += 10;
    }
    if !leadership_mentions.is_empty() {
        confidence += 15;
        indicators.extend(leadership_mentions.iter().cloned());
    }
    if breadth >= 4 {
        confidence += 10;
        indicators.push(format!("Broad technical expertise: {breadth} categories"));
    }

    ExperienceAssessment {
        level,
        confidence: confidence.min(95) as u8,
        years_observed,
        max_years,
        leadership_mentions,
        technical_depth,
        breadth,
        indicators,
    }
}

fn years_observed(text: &str) -> Vec<u32> {
    YEARS_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .filter(|years| (1..=MAX_PLAUSIBLE_YEARS).contains(years))
        .collect()
}

fn leadership_mentions(text: &str) -> Vec<String> {
    LEADERSHIP_PATTERNS
        .iter()
        .flat_map(|(pattern, prefix, suffix)| {
            pattern.captures_iter(text).filter_map(move |caps| {
                let count: u32 = caps.get(1)?.as_str().parse().ok()?;
                Some(format!("{prefix}{count}{suffix}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Fidelity;
    use crate::preprocessing::normalize;
    use crate::skills::{match_skills, SkillCatalog};

    fn assess(text: &str) -> ExperienceAssessment {
        let catalog = SkillCatalog::new().unwrap();
        let normalized = normalize(text, None);
        let skills = match_skills(&normalized, &catalog, Fidelity::Full);
        classify(&normalized, &skills)
    }

    #[test]
    fn test_senior_by_years() {
        let a = assess("Backend developer with 9 years of experience");
        assert_eq!(a.level, ExperienceLevel::Senior);
        assert_eq!(a.max_years, 9);
        assert!(a.indicators.contains(&"Years: 9".to_string()));
    }

    #[test]
    fn test_senior_keyword_outranks_low_years() {
        let a = assess("Principal developer, 1 year of experience");
        assert_eq!(a.level, ExperienceLevel::Senior);
        assert_eq!(a.confidence, 70);
    }

    #[test]
    fn test_mid_by_years_or_keyword() {
        assert_eq!(
            assess("Developer with 4 yrs experience").level,
            ExperienceLevel::Mid
        );
        assert_eq!(
            assess("Intermediate developer building web apps").level,
            ExperienceLevel::Mid
        );
    }

    #[test]
    fn test_junior_default() {
        let a = assess("Recent graduate who enjoys building web apps");
        assert_eq!(a.level, ExperienceLevel::Junior);
        assert_eq!(a.confidence, 50);
        assert_eq!(a.indicators, vec!["Limited experience indicators".to_string()]);
    }

    #[test]
    fn test_keywords_are_whole_words() {
        // "leadership" is not "lead", "misleading" is not "lead".
        let a = assess("Known for leadership and never misleading anyone");
        assert_eq!(a.level, ExperienceLevel::Junior);
    }

    #[test]
    fn test_years_stated_on_a_later_line() {
        let a = assess("Experience\nPlatform engineering at Acme Corp\n9 years");
        assert_eq!(a.years_observed, vec![9]);
        assert_eq!(a.level, ExperienceLevel::Senior);
    }

    #[test]
    fn test_multi_line_resume_layout() {
        let text = "Summary\n\
                    Backend engineer\n\
                    Skills\n\
                    C#\n\
                    JS\n\
                    Python\n\
                    Experience\n\
                    Acme Corp\n\
                    4 yrs of experience";
        let a = assess(text);
        assert_eq!(a.level, ExperienceLevel::Mid);
        assert_eq!(a.max_years, 4);
        assert_eq!(a.technical_depth, 3);
    }

    #[test]
    fn test_implausible_years_ignored() {
        let a = assess("Over 120 years of combined experience across 2019 projects");
        assert!(a.years_observed.iter().all(|y| (1..=50).contains(y)));
        assert_eq!(a.max_years, 0);
    }

    #[test]
    fn test_leadership_mentions() {
        let a = assess(
            "Led a team of 5 engineers. Managed 12 developers. Mentored 3 juniors. \
             Supervised 2 interns. Coordinated with 4 vendors.",
        );
        assert_eq!(
            a.leadership_mentions,
            vec![
                "Led team of 5",
                "Managed 12 people",
                "Mentored 3",
                "Supervised 2",
                "Coordinated with 4"
            ]
        );
        assert!(a.has_leadership());
    }

    #[test]
    fn test_confidence_adjustments_and_cap() {
        let text = "Senior engineer. Led team of 6.\n\
                    Python Java Go Rust Ruby PHP Scala Kotlin Swift Perl\n\
                    React Angular Vue HTML CSS\n\
                    MySQL PostgreSQL MongoDB Redis\n\
                    AWS Azure Docker Kubernetes Jenkins Terraform";
        let a = assess(text);
        assert_eq!(a.level, ExperienceLevel::Senior);
        assert!(a.technical_depth > 15);
        assert!(a.breadth >= 4);
        // 70 + 20 + 15 + 10 clamps to 95.
        assert_eq!(a.confidence, 95);
    }

    #[test]
    fn test_mid_breadth_bonus_only() {
        // Mid base 60, more than 8 skills gives +10, four categories gives +10.
        let text = "Engineer with 5 years of experience.\n\
                    Python Java Rust SQL\n\
                    React HTML CSS\n\
                    MySQL Redis\n\
                    Docker";
        let a = assess(text);
        assert_eq!(a.level, ExperienceLevel::Mid);
        assert_eq!(a.technical_depth, 10);
        assert_eq!(a.breadth, 4);
        assert_eq!(a.confidence, 80);
    }
}

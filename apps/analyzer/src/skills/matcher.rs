use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{
    CatalogSkill, KeywordGroup, Placement, SkillCatalog, CLOUD_PLATFORMS, DATABASES,
    DEVOPS_TOOLS, PROGRAMMING_LANGUAGES, WEB_TECHNOLOGIES,
};
use crate::analysis::Fidelity;
use crate::preprocessing::NormalizedText;

const MAX_SNIPPETS: usize = 3;
const SNIPPET_RADIUS: usize = 50;

/// A matched catalog skill. At most one per canonical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub confidence_score: u8,
    pub match_count: usize,
    pub context_snippets: Vec<String>,
    pub years_claimed: Option<u32>,
    pub placements: Vec<Placement>,
}

/// Technology family the resume leans toward, reported for information only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryStack {
    WebFullstack,
    DataScience,
    Mobile,
    Devops,
    Security,
}

const STACK_INDICATORS: &[(PrimaryStack, &[&str])] = &[
    (
        PrimaryStack::WebFullstack,
        &["javascript", "react", "angular", "vue", "node.js", "html", "css"],
    ),
    (
        PrimaryStack::DataScience,
        &["python", "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "r programming"],
    ),
    (
        PrimaryStack::Mobile,
        &["react native", "flutter", "swift", "kotlin", "ios", "android"],
    ),
    (
        PrimaryStack::Devops,
        &["docker", "kubernetes", "jenkins", "terraform", "ansible", "aws", "azure"],
    ),
    (
        PrimaryStack::Security,
        &["nmap", "wireshark", "metasploit", "burp suite", "owasp", "penetration testing", "encryption"],
    ),
];

/// Everything the matcher found in one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    /// Catalog order.
    pub technical: Vec<SkillRecord>,
    pub soft_skills: Vec<String>,
    pub certifications: Vec<String>,
    pub industry_domains: Vec<String>,
    pub primary_stack: Option<PrimaryStack>,
}

impl SkillSet {
    pub fn technical_count(&self) -> usize {
        self.technical.len()
    }

    /// Names of skills placed anywhere under `category`, each listed once.
    pub fn names_in_category(&self, category: &str) -> Vec<String> {
        self.technical
            .iter()
            .filter(|r| r.placements.iter().any(|p| p.category == category))
            .map(|r| r.name.clone())
            .collect()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.technical
            .iter()
            .any(|r| r.placements.iter().any(|p| p.category == category))
    }

    pub fn programming_languages(&self) -> Vec<String> {
        self.names_in_category(PROGRAMMING_LANGUAGES)
    }

    pub fn frameworks_and_libraries(&self) -> Vec<String> {
        self.names_in_category(WEB_TECHNOLOGIES)
    }

    pub fn databases(&self) -> Vec<String> {
        self.names_in_category(DATABASES)
    }

    pub fn cloud_platforms(&self) -> Vec<String> {
        self.names_in_category(CLOUD_PLATFORMS)
    }

    pub fn tools_and_technologies(&self) -> Vec<String> {
        self.names_in_category(DEVOPS_TOOLS)
    }

    /// Number of distinct categories with at least one skill.
    pub fn populated_categories(&self) -> usize {
        self.grouped().len()
    }

    /// category → subcategory → names. A skill appears under every placement.
    pub fn grouped(&self) -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
        let mut grouped: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
        for record in &self.technical {
            for placement in &record.placements {
                grouped
                    .entry(placement.category.clone())
                    .or_default()
                    .entry(placement.subcategory.clone())
                    .or_default()
                    .push(record.name.clone());
            }
        }
        grouped
    }

    /// Lower-cased technical, soft-skill and certification names.
    pub fn all_names_lowercase(&self) -> Vec<String> {
        self.technical
            .iter()
            .map(|r| r.name.as_str())
            .chain(self.soft_skills.iter().map(String::as_str))
            .chain(self.certifications.iter().map(String::as_str))
            .map(str::to_lowercase)
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&SkillRecord> {
        self.technical.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

/// Confidence for a skill seen `match_count` times: 50 + 10 per match, capped at 95.
pub fn confidence_for(match_count: usize) -> u8 {
    match_count.saturating_mul(10).saturating_add(50).min(95) as u8
}

/// Scans `normalized.text` against every catalog table.
pub fn match_skills(
    normalized: &NormalizedText,
    catalog: &SkillCatalog,
    fidelity: Fidelity,
) -> SkillSet {
    let text = normalized.text.as_str();
    let lowered = text.to_lowercase();

    let technical: Vec<SkillRecord> = catalog
        .skills()
        .iter()
        .filter_map(|skill| match_skill(skill, text, &lowered, fidelity))
        .collect();
    debug!("matched {} technical skills", technical.len());

    let soft_skills = matching_labels(catalog.soft_skills(), text);
    let certifications = matching_labels(catalog.certifications(), text);
    let industry_domains = matching_labels(catalog.industry_domains(), text);
    let primary_stack = primary_stack(&technical);

    SkillSet {
        technical,
        soft_skills,
        certifications,
        industry_domains,
        primary_stack,
    }
}

fn match_skill(
    skill: &CatalogSkill,
    text: &str,
    lowered: &str,
    fidelity: Fidelity,
) -> Option<SkillRecord> {
    let mut positions: Vec<(usize, usize)> = Vec::new();
    for variant in &skill.variants {
        for m in variant.find_iter(text) {
            if is_whole_word(text, m.start(), m.end())
                && !positions.iter().any(|(start, _)| *start == m.start())
            {
                positions.push((m.start(), m.end()));
            }
        }
    }
    if positions.is_empty() {
        return None;
    }
    positions.sort_unstable();

    let (context_snippets, years_claimed) = match fidelity {
        Fidelity::Full => (
            positions
                .iter()
                .take(MAX_SNIPPETS)
                .map(|&(start, end)| snippet(text, start, end))
                .collect(),
            years_for(skill, lowered),
        ),
        Fidelity::Fast => (Vec::new(), None),
    };

    let primary = skill.primary();
    Some(SkillRecord {
        name: skill.name.clone(),
        category: primary.category.clone(),
        subcategory: primary.subcategory.clone(),
        confidence_score: confidence_for(positions.len()),
        match_count: positions.len(),
        context_snippets,
        years_claimed,
        placements: skill.placements.clone(),
    })
}

/// Neither neighbour of the match may be a word character.
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word(c));
    before_ok && after_ok
}

/// Up to `SNIPPET_RADIUS` characters either side of the match, trimmed.
fn snippet(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(SNIPPET_RADIUS - 1)
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(SNIPPET_RADIUS)
        .map_or(text.len(), |(i, _)| end + i);
    text[from..to].trim().to_string()
}

/// First parseable number from the skill's years patterns, tried in order.
fn years_for(skill: &CatalogSkill, lowered: &str) -> Option<u32> {
    skill.years_patterns.iter().find_map(|pattern| {
        pattern
            .captures(lowered)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

fn matching_labels(groups: &[KeywordGroup], text: &str) -> Vec<String> {
    groups
        .iter()
        .filter(|g| g.pattern.is_match(text))
        .map(|g| g.label.clone())
        .collect()
}

/// Family with the most indicator hits; earlier families win ties. `None` when
/// nothing indicates any family.
fn primary_stack(technical: &[SkillRecord]) -> Option<PrimaryStack> {
    let names: Vec<String> = technical.iter().map(|r| r.name.to_lowercase()).collect();
    let has_indicator = |indicator: &str| names.iter().any(|name| name.contains(indicator));

    let mut best: Option<(PrimaryStack, usize)> = None;
    for (stack, indicators) in STACK_INDICATORS {
        let hits = indicators.iter().filter(|i| has_indicator(i)).count();
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((*stack, hits));
        }
    }
    best.map(|(stack, _)| stack)
}

//! Text normalizer — turns raw extracted text into the cleaned text every
//! later stage reads.
//!
//! Steps, in order:
//! 1. Collapse every whitespace run, line breaks included, to one space.
//! 2. Replace characters outside the resume allow-list with a space.
//! 3. Strip `--- Page N ---` and `--- Table N on Page M ---` markers.
//! 4. Drop lines of ≤2 characters, or whose word/space characters make up
//!    no more than 30% of the line. After step 1 the text is a single line, so
//!    this only rejects a document that is nothing but noise; one-word list
//!    items like `C#` or `JS` survive.
//! 5. Count words and detect sections on the rejoined text.
//!
//! Multi-line patterns downstream (`python … 6 years`) therefore see one
//! continuous text.
//!
//! Output length never exceeds input length (every step only replaces a
//! character with a space or removes characters).

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::sentences::SentenceSegmenter;

/// A resume section, detected by keyword presence anywhere in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Awards,
}

const SECTION_KEYWORDS: &[(Section, &str)] = &[
    (Section::Contact, r"(?i)email|phone|address|linkedin|github"),
    (Section::Summary, r"(?i)summary|objective|profile|about"),
    (
        Section::Experience,
        r"(?i)experience|employment|work history|professional",
    ),
    (
        Section::Education,
        r"(?i)education|degree|university|college|school",
    ),
    (
        Section::Skills,
        r"(?i)skills|technologies|competencies|expertise",
    ),
    (Section::Projects, r"(?i)projects|portfolio|work samples"),
    (
        Section::Certifications,
        r"(?i)certifications|certificates|licenses",
    ),
    (
        Section::Awards,
        r"(?i)awards|achievements|honors|recognition",
    ),
];

static SECTION_PATTERNS: Lazy<Vec<(Section, Regex)>> = Lazy::new(|| {
    SECTION_KEYWORDS
        .iter()
        .map(|(section, pattern)| (*section, Regex::new(pattern).unwrap()))
        .collect()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"[^\w\s.,\-@\[\]{}/\\:;!?$%&*+=<>|~`'"#()]"##).unwrap()
});
static PAGE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"--- Page \d+ ---|--- Table \d+ on Page \d+ ---").unwrap()
});
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Line-level statistics and section flags for the cleaned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMetadata {
    pub original_length: usize,
    pub cleaned_length: usize,
    pub detected_sections: BTreeSet<Section>,
    pub word_count: usize,
    pub unique_word_count: usize,
    /// `None` when no segmenter ran.
    pub sentences: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedText {
    pub text: String,
    pub metadata: TextMetadata,
}

impl NormalizedText {
    pub fn has_section(&self, section: Section) -> bool {
        self.metadata.detected_sections.contains(&section)
    }
}

/// Cleans `raw` and computes its metadata. Lengths are in characters.
pub fn normalize(raw: &str, segmenter: Option<&dyn SentenceSegmenter>) -> NormalizedText {
    let original_length = raw.chars().count();

    let text = WHITESPACE.replace_all(raw, " ");
    let text = DISALLOWED.replace_all(&text, " ");
    let text = PAGE_MARKER.replace_all(&text, "");

    let cleaned: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| is_signal_line(line))
        .collect();
    let text = cleaned.join("\n");

    let lowered = text.to_lowercase();
    let words: Vec<&str> = WORD.find_iter(&lowered).map(|m| m.as_str()).collect();
    let unique_word_count = words.iter().collect::<HashSet<_>>().len();

    let detected_sections = SECTION_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&text))
        .map(|(section, _)| *section)
        .collect();

    let sentences = segmenter.and_then(|s| s.count_sentences(&text));

    NormalizedText {
        metadata: TextMetadata {
            original_length,
            cleaned_length: text.chars().count(),
            detected_sections,
            word_count: words.len(),
            unique_word_count,
            sentences,
        },
        text,
    }
}

/// Keeps lines longer than two characters whose word and space characters
/// exceed 30% of the line.
fn is_signal_line(line: &str) -> bool {
    let length = line.chars().count();
    if length <= 2 {
        return false;
    }
    let signal = NON_WORD.replace_all(line, "").chars().count();
    signal as f64 > length as f64 * 0.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::sentences::RegexSentenceSegmenter;

    #[test]
    fn test_collapses_all_whitespace() {
        let out = normalize("Jane   Doe\t\tEngineer\n\n\n  Python    developer  ", None);
        assert_eq!(out.text, "Jane Doe Engineer Python developer");
    }

    #[test]
    fn test_strips_page_and_table_markers() {
        let raw = "\n--- Page 1 ---\nSummary of work\n--- Table 2 on Page 1 ---\n--- Page 2 ---\nMore text here";
        let out = normalize(raw, None);
        assert!(!out.text.contains("Page"));
        assert_eq!(out.text, "Summary of work   More text here");
    }

    #[test]
    fn test_short_list_items_survive() {
        let out = normalize("Languages\nC#\nJS\nTS\nGo\n", None);
        assert_eq!(out.text, "Languages C# JS TS Go");
    }

    #[test]
    fn test_drops_short_and_symbol_heavy_text() {
        assert_eq!(normalize("ok", None).text, "");
        assert_eq!(normalize("  \n•\n  ", None).text, "");
        assert_eq!(normalize("----------====\n@@@@@@@@@a", None).text, "");
        assert_eq!(
            normalize("Real content\n----", None).text,
            "Real content ----"
        );
    }

    #[test]
    fn test_keeps_resume_punctuation() {
        let out = normalize("C++ and C# (5 years), email: a@b.com", None);
        assert_eq!(out.text, "C++ and C# (5 years), email: a@b.com");
    }

    #[test]
    fn test_replaces_disallowed_characters() {
        let out = normalize("Skills ★ Rust ✓ Go", None);
        assert_eq!(out.text, "Skills   Rust   Go");
    }

    #[test]
    fn test_output_never_longer_than_input() {
        let inputs = [
            "",
            "a",
            "   \n\n  ",
            "Résumé — Senior Engineer\n\n• Led team of 5\n--- Page 2 ---\n",
            "日本語のテキスト and English words",
        ];
        for raw in inputs {
            let out = normalize(raw, None);
            assert!(out.metadata.cleaned_length <= out.metadata.original_length);
        }
    }

    #[test]
    fn test_word_counts() {
        let out = normalize("Rust rust RUST go\nPython developer", None);
        assert!(!out.text.contains('\n'));
        assert_eq!(out.metadata.word_count, 6);
        assert_eq!(out.metadata.unique_word_count, 4);
    }

    #[test]
    fn test_detects_sections_case_insensitively() {
        let raw = "PROFESSIONAL EXPERIENCE\nEducation: State University\nTechnical Skills\nEmail me";
        let out = normalize(raw, None);
        assert!(out.has_section(Section::Experience));
        assert!(out.has_section(Section::Education));
        assert!(out.has_section(Section::Skills));
        assert!(out.has_section(Section::Contact));
        assert!(!out.has_section(Section::Awards));
        assert!(!out.has_section(Section::Certifications));
    }

    #[test]
    fn test_sentences_only_with_segmenter() {
        let raw = "Built things. Shipped things.";
        assert_eq!(normalize(raw, None).metadata.sentences, None);
        let seg = RegexSentenceSegmenter;
        assert_eq!(normalize(raw, Some(&seg)).metadata.sentences, Some(2));
    }
}

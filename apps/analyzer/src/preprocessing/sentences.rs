use once_cell::sync::Lazy;
use regex::Regex;

/// Optional sentence counting for `preprocessing_info.sentences`.
///
/// A segmenter that cannot handle the input returns `None`; the normalizer then
/// reports no sentence count instead of failing.
pub trait SentenceSegmenter: Send + Sync {
    fn count_sentences(&self, text: &str) -> Option<usize>;
}

/// Terminal punctuation followed by whitespace, or a line break.
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)|\n+").unwrap());

/// Splits on terminal punctuation and line breaks. Resume bullets rarely end
/// with a full stop, so every non-empty line counts as at least one sentence.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexSentenceSegmenter;

impl SentenceSegmenter for RegexSentenceSegmenter {
    fn count_sentences(&self, text: &str) -> Option<usize> {
        let count = SENTENCE_BREAK
            .split(text)
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .count();
        Some(count)
    }
}

// Text preprocessing: artifact stripping, low-signal line filtering, section detection.
// Everything here is a pure function of the extracted text.

pub mod normalizer;
pub mod sentences;

pub use normalizer::{normalize, NormalizedText, Section, TextMetadata};
pub use sentences::{RegexSentenceSegmenter, SentenceSegmenter};

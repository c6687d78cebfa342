//! Resume analyzer: extracts text from resume PDFs and derives skills, seniority,
//! role recommendations, improvement advice, interview questions and a quality score.
//!
//! The entry point is [`analysis::Analyzer`]; build one around a shared
//! [`skills::SkillCatalog`] and call [`analysis::Analyzer::analyze`].

pub mod advice;
pub mod analysis;
pub mod config;
pub mod errors;
pub mod experience;
pub mod extraction;
pub mod preprocessing;
pub mod recommendations;
pub mod scoring;
pub mod skills;

pub use analysis::{AnalysisReport, Analyzer, Fidelity, RawDocument};
pub use errors::AnalysisError;

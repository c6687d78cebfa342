// Skill matching: typed keyword catalog, canonical display names, whole-word matcher.
// The catalog is compiled once and shared read-only across analyses.

pub mod catalog;
pub mod matcher;
pub mod naming;

pub use catalog::{Placement, SkillCatalog};
pub use matcher::{confidence_for, match_skills, PrimaryStack, SkillRecord, SkillSet};

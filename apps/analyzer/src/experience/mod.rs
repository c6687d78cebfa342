// Seniority inference from stated years, title keywords and leadership claims.

pub mod classifier;

pub use classifier::{classify, ExperienceAssessment, ExperienceLevel};

// Resume quality scoring: weighted sub-scores, letter grade, strengths and gaps.

pub mod grade;
pub mod scorer;

pub use grade::Grade;
pub use scorer::{score, ScoreBreakdown};

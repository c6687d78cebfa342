// Job recommendations: per-family role generators with level-specific templates.
// Salary ranges are a static lookup keyed by (family, level).

pub mod roles;
pub mod salary;

pub use roles::{match_percentage, recommend, JobRecommendation, MAX_RECOMMENDATIONS};
pub use salary::{salary_range, RoleFamily};

// Candidate-facing advice: improvement checklist and tailored interview questions.

pub mod interview;
pub mod suggestions;

pub use interview::{interview_questions, Difficulty, InterviewQuestion, MAX_QUESTIONS};
pub use suggestions::{
    advise, has_portfolio_links, has_quantifiable_achievements, Priority, Suggestion,
    MAX_SUGGESTIONS,
};

use serde::{Deserialize, Serialize};

use crate::experience::{ExperienceAssessment, ExperienceLevel};
use crate::skills::catalog::{CLOUD_PLATFORMS, DATA_SCIENCE};
use crate::skills::SkillSet;

pub const MAX_QUESTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub skill_focus: String,
    pub follow_up: String,
}

/// (question, category, difficulty, skill focus, follow-up)
type QuestionTemplate = (&'static str, &'static str, Difficulty, &'static str, &'static str);

const SYSTEM_DESIGN: &[QuestionTemplate] = &[
    (
        "Design a scalable system for a social media platform that handles millions of users.",
        "System Design",
        Difficulty::Hard,
        "Architecture",
        "How would you handle data consistency and caching?",
    ),
    (
        "How would you approach optimizing a slow-performing database query?",
        "Technical",
        Difficulty::Medium,
        "Database Optimization",
        "What tools would you use to identify performance bottlenecks?",
    ),
];

const BEHAVIORAL: &[QuestionTemplate] = &[
    (
        "Tell me about a time when you had to learn a new technology quickly for a project.",
        "Behavioral",
        Difficulty::Medium,
        "Adaptability",
        "How do you typically approach learning new technologies?",
    ),
    (
        "Describe a challenging bug you encountered and how you debugged it.",
        "Behavioral",
        Difficulty::Medium,
        "Problem Solving",
        "What debugging strategies do you find most effective?",
    ),
    (
        "How do you handle disagreements with team members about technical decisions?",
        "Behavioral",
        Difficulty::Medium,
        "Communication",
        "Can you give an example of when you changed your mind based on feedback?",
    ),
];

const LEADERSHIP: &[QuestionTemplate] = &[
    (
        "How do you mentor junior developers and help them grow?",
        "Leadership",
        Difficulty::Medium,
        "Mentoring",
        "What's the most rewarding mentoring experience you've had?",
    ),
    (
        "Describe how you would handle a situation where your team is behind schedule on a critical project.",
        "Leadership",
        Difficulty::Hard,
        "Project Management",
        "How do you balance quality with delivery deadlines?",
    ),
];

const SITUATIONAL: &[QuestionTemplate] = &[
    (
        "How would you approach debugging a production issue that's affecting users?",
        "Situational",
        Difficulty::Medium,
        "Incident Response",
        "What steps would you take to prevent similar issues in the future?",
    ),
    (
        "If you had to choose between delivering a feature on time with technical debt or delaying for a cleaner implementation, what would you do?",
        "Situational",
        Difficulty::Hard,
        "Decision Making",
        "How do you communicate technical trade-offs to non-technical stakeholders?",
    ),
];

const MACHINE_LEARNING: QuestionTemplate = (
    "Explain the difference between supervised and unsupervised learning with examples.",
    "Technical",
    Difficulty::Medium,
    "Machine Learning",
    "When would you choose one approach over the other?",
);

const CLOUD_ARCHITECTURE: QuestionTemplate = (
    "How would you design a cloud architecture for high availability and disaster recovery?",
    "Technical",
    Difficulty::Hard,
    "Cloud Architecture",
    "What are the cost implications of your design choices?",
);

fn from_template(
    &(question, category, difficulty, skill_focus, follow_up): &QuestionTemplate,
) -> InterviewQuestion {
    InterviewQuestion {
        question: question.to_string(),
        category: category.to_string(),
        difficulty,
        skill_focus: skill_focus.to_string(),
        follow_up: follow_up.to_string(),
    }
}

/// Questions tailored to the candidate, most specific first, capped at [`MAX_QUESTIONS`].
pub fn interview_questions(
    skills: &SkillSet,
    experience: &ExperienceAssessment,
) -> Vec<InterviewQuestion> {
    let mut questions: Vec<InterviewQuestion> = skills
        .programming_languages()
        .into_iter()
        .take(2)
        .map(|language| InterviewQuestion {
            question: format!(
                "Explain your experience with {language} and describe a challenging project where you used it effectively."
            ),
            category: "Technical".to_string(),
            difficulty: Difficulty::Medium,
            follow_up: format!("What are some best practices you follow when working with {language}?"),
            skill_focus: language,
        })
        .collect();

    if experience.level >= ExperienceLevel::Mid {
        questions.extend(SYSTEM_DESIGN.iter().map(from_template));
    }
    questions.extend(BEHAVIORAL.iter().map(from_template));
    if experience.level == ExperienceLevel::Senior {
        questions.extend(LEADERSHIP.iter().map(from_template));
    }
    questions.extend(SITUATIONAL.iter().map(from_template));

    if skills.has_category(DATA_SCIENCE) {
        questions.push(from_template(&MACHINE_LEARNING));
    }
    if skills.has_category(CLOUD_PLATFORMS) {
        questions.push(from_template(&CLOUD_ARCHITECTURE));
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}

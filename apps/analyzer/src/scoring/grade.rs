use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter grade for a 0–100 total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
}

/// Lower bound (inclusive) → grade, best first.
const LADDER: &[(u8, Grade)] = &[
    (90, Grade::APlus),
    (85, Grade::A),
    (80, Grade::AMinus),
    (75, Grade::BPlus),
    (70, Grade::B),
    (65, Grade::BMinus),
    (60, Grade::CPlus),
    (55, Grade::C),
];

impl Grade {
    pub fn from_total(total: u8) -> Self {
        LADDER
            .iter()
            .find(|(floor, _)| total >= *floor)
            .map_or(Grade::CMinus, |(_, grade)| *grade)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

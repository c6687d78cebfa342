use serde::{Deserialize, Serialize};

use crate::experience::ExperienceLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFamily {
    SoftwareEngineer,
    DataScientist,
    DevopsEngineer,
    FrontendDeveloper,
    BackendDeveloper,
    FullstackDeveloper,
    MobileDeveloper,
    SecurityEngineer,
}

/// Used for any (family, level) pair missing from the table.
pub const DEFAULT_SALARY_RANGE: &str = "$60,000 - $120,000";

/// (family, junior, mid, senior), USD per year.
const SALARY_TABLE: &[(RoleFamily, &str, &str, &str)] = &[
    (
        RoleFamily::SoftwareEngineer,
        "$60,000 - $90,000",
        "$90,000 - $130,000",
        "$130,000 - $180,000",
    ),
    (
        RoleFamily::DataScientist,
        "$70,000 - $100,000",
        "$100,000 - $140,000",
        "$140,000 - $200,000",
    ),
    (
        RoleFamily::DevopsEngineer,
        "$65,000 - $95,000",
        "$95,000 - $135,000",
        "$135,000 - $185,000",
    ),
    (
        RoleFamily::FrontendDeveloper,
        "$55,000 - $80,000",
        "$80,000 - $115,000",
        "$115,000 - $160,000",
    ),
    (
        RoleFamily::BackendDeveloper,
        "$60,000 - $85,000",
        "$85,000 - $125,000",
        "$125,000 - $170,000",
    ),
    (
        RoleFamily::FullstackDeveloper,
        "$65,000 - $90,000",
        "$90,000 - $130,000",
        "$130,000 - $180,000",
    ),
    (
        RoleFamily::MobileDeveloper,
        "$60,000 - $85,000",
        "$85,000 - $120,000",
        "$120,000 - $165,000",
    ),
    (
        RoleFamily::SecurityEngineer,
        "$65,000 - $90,000",
        "$90,000 - $130,000",
        "$130,000 - $180,000",
    ),
];

pub fn salary_range(family: RoleFamily, level: ExperienceLevel) -> &'static str {
    SALARY_TABLE
        .iter()
        .find(|(f, ..)| *f == family)
        .map(|(_, junior, mid, senior)| match level {
            ExperienceLevel::Junior => *junior,
            ExperienceLevel::Mid => *mid,
            ExperienceLevel::Senior => *senior,
        })
        .unwrap_or(DEFAULT_SALARY_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_family_and_level() {
        assert_eq!(
            salary_range(RoleFamily::FrontendDeveloper, ExperienceLevel::Mid),
            "$80,000 - $115,000"
        );
        assert_eq!(
            salary_range(RoleFamily::DataScientist, ExperienceLevel::Senior),
            "$140,000 - $200,000"
        );
    }

    #[test]
    fn test_every_family_has_a_row() {
        let families = [
            RoleFamily::SoftwareEngineer,
            RoleFamily::DataScientist,
            RoleFamily::DevopsEngineer,
            RoleFamily::FrontendDeveloper,
            RoleFamily::BackendDeveloper,
            RoleFamily::FullstackDeveloper,
            RoleFamily::MobileDeveloper,
            RoleFamily::SecurityEngineer,
        ];
        for family in families {
            assert_ne!(
                salary_range(family, ExperienceLevel::Junior),
                DEFAULT_SALARY_RANGE
            );
        }
    }
}

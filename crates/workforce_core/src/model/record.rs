//! Person, job, award, organization and demographic records.
//!
//! # Responsibility
//! - Mirror the logical columns of the external tabular sources.
//! - Provide role seniority for award tie-breaks.
//!
//! # Invariants
//! - Records are immutable read models within a run; derived values are
//!   written to separate output tables.
//! - `RankedJob::category` always belongs to the ruleset that produced it.

use crate::model::category::Category;
use crate::model::year::deserialize_year;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable person identifier from the source tables.
pub type PersonId = u64;
/// Stable organization identifier (employers and award institutions).
pub type OrgId = u64;
/// Stable award identifier.
pub type AwardId = u64;

/// One employment record as it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub person_id: PersonId,
    #[serde(default)]
    pub employer_id: Option<OrgId>,
    /// Free-text job title, used only by the anomaly sweeps.
    #[serde(default)]
    pub title: String,
    /// Raw category label, e.g. `director_r` or `faculty`.
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub start_year: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub end_year: Option<i32>,
}

/// Job whose raw category has been normalized by a ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedJob {
    pub person_id: PersonId,
    pub employer_id: Option<OrgId>,
    pub title: String,
    pub category: Category,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

/// Role a person held on an award.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AwardRole {
    Pi,
    CoPi,
    FormerPi,
    FormerCoPi,
    InternalEvaluator,
    DayToDay,
    Other(String),
}

impl AwardRole {
    /// Seniority rank; lower is more senior.
    pub fn rank(&self) -> u32 {
        match self {
            Self::Pi => 1,
            Self::CoPi => 2,
            Self::FormerPi => 3,
            Self::FormerCoPi => 4,
            Self::InternalEvaluator => 5,
            Self::DayToDay => 6,
            Self::Other(_) => 7,
        }
    }

    /// Whether the role is one of the principal-investigator family.
    pub fn is_investigator(&self) -> bool {
        matches!(
            self,
            Self::Pi | Self::CoPi | Self::FormerPi | Self::FormerCoPi
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pi => "pi",
            Self::CoPi => "co-pi",
            Self::FormerPi => "former pi",
            Self::FormerCoPi => "former co-pi",
            Self::InternalEvaluator => "internal evaluator",
            Self::DayToDay => "day-to-day",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for AwardRole {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pi" => Self::Pi,
            "co-pi" => Self::CoPi,
            "former pi" => Self::FormerPi,
            "former co-pi" => Self::FormerCoPi,
            "internal evaluator" => Self::InternalEvaluator,
            "day-to-day" => Self::DayToDay,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for AwardRole {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<AwardRole> for String {
    fn from(value: AwardRole) -> Self {
        value.as_str().to_string()
    }
}

impl Display for AwardRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One person's participation in one award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub person_id: PersonId,
    pub award_id: AwardId,
    pub org_id: OrgId,
    pub role: AwardRole,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub start_year: Option<i32>,
    /// Funding program of the award (`it`, `non-it`, ...).
    #[serde(default)]
    pub award_type: Option<String>,
}

/// Which award programs an organization has received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgAwardType {
    #[serde(rename = "it only")]
    ItOnly,
    #[serde(rename = "non-it only")]
    NonItOnly,
    #[serde(rename = "it and non-it")]
    ItAndNonIt,
}

impl OrgAwardType {
    /// Whether the organization received at least one `it` award.
    pub fn is_it_site(self) -> bool {
        matches!(self, Self::ItOnly | Self::ItAndNonIt)
    }
}

/// Employer or award institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub org_id: OrgId,
    pub name: String,
    /// Carnegie classification id; present only for US universities.
    #[serde(default)]
    pub carnegie_id: Option<String>,
    #[serde(default)]
    pub award_type: Option<OrgAwardType>,
}

/// Demographic attributes of one person. Values are opaque buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographic {
    pub person_id: PersonId,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub race_ethnicity: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
}

/// One recorded move of a person between two organizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobilityEdge {
    pub person_id: PersonId,
    pub from_org_id: OrgId,
    pub to_org_id: OrgId,
}

#[cfg(test)]
mod tests {
    use super::AwardRole;

    #[test]
    fn award_role_parses_known_labels_case_insensitively() {
        assert_eq!(AwardRole::from("PI"), AwardRole::Pi);
        assert_eq!(AwardRole::from(" former co-pi "), AwardRole::FormerCoPi);
        assert_eq!(
            AwardRole::from("advisor"),
            AwardRole::Other("advisor".to_string())
        );
    }

    #[test]
    fn investigator_roles_outrank_support_roles() {
        assert!(AwardRole::Pi.rank() < AwardRole::CoPi.rank());
        assert!(AwardRole::FormerCoPi.rank() < AwardRole::DayToDay.rank());
        assert!(AwardRole::FormerPi.is_investigator());
        assert!(!AwardRole::InternalEvaluator.is_investigator());
    }
}

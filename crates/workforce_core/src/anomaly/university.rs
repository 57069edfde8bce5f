//! University classification of organizations.

use crate::model::record::Organization;
use serde::{Deserialize, Serialize};

const INSTITUTE_KEYWORD: &str = "institute";

/// Keyword lists deciding whether an organization is a university.
///
/// Anti-keywords are checked before keywords ("Cambridge Public Schools").
/// Institutes are universities only with a curated marker in their name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniversityRules {
    pub keywords: Vec<String>,
    pub anti_keywords: Vec<String>,
    pub institute_markers: Vec<String>,
}

impl Default for UniversityRules {
    fn default() -> Self {
        Self {
            keywords: to_strings(&[
                "university",
                "college",
                "school",
                "universitat",
                "universidad",
                "ecole",
            ]),
            anti_keywords: to_strings(&["colleges", "schools", "association"]),
            institute_markers: to_strings(&["india", "stockholm"]),
        }
    }
}

impl UniversityRules {
    /// Classifies one organization.
    ///
    /// 1. a Carnegie id marks a US university;
    /// 2. an anti-keyword in the name marks a non-university;
    /// 3. a keyword in the name marks a university;
    /// 4. "institute" plus a curated marker marks a university;
    /// 5. anything else is not a university.
    pub fn is_university(&self, org: &Organization) -> bool {
        if org
            .carnegie_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
        {
            return true;
        }

        let name = org.name.to_lowercase();
        if contains_any(&name, &self.anti_keywords) {
            return false;
        }
        if contains_any(&name, &self.keywords) {
            return true;
        }
        name.contains(INSTITUTE_KEYWORD) && contains_any(&name, &self.institute_markers)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| haystack.contains(needle.to_lowercase().as_str()))
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

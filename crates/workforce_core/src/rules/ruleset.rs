//! Ruleset declaration and validation.
//!
//! A ruleset is read-only configuration for one analysis: the precedence
//! table (category -> rank) and the prefix collapse rules used by the
//! normalizer. Two analyses use different rulesets, so call sites receive the
//! ruleset as data instead of hard-coding ranks.

use crate::model::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name of the six-category ruleset used for network composition figures.
pub const RULESET_NETWORK: &str = "network";
/// Name of the three-category ruleset used for leadership/mobility figures.
pub const RULESET_LEADERSHIP: &str = "leadership";

const BUILTIN_RULESETS: &[&str] = &[RULESET_NETWORK, RULESET_LEADERSHIP];

/// Returns built-in ruleset names.
pub fn builtin_rulesets() -> &'static [&'static str] {
    BUILTIN_RULESETS
}

/// Serializable ruleset declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetConfig {
    pub name: String,
    /// Precedence entries in declaration order; lower rank is more senior.
    pub precedence: Vec<PrecedenceEntry>,
    /// Prefix rules applied before exact category matching.
    #[serde(default)]
    pub collapse: Vec<CollapseRuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedenceEntry {
    pub category: String,
    pub rank: u32,
}

/// Maps every raw label starting with `prefix` to the category `into`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseRuleConfig {
    pub prefix: String,
    pub into: String,
}

/// Ruleset configuration errors. These are programmer/config mistakes and
/// are raised when the ruleset is built, never during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesetError {
    EmptyName,
    NoCategories,
    BlankCategory,
    DuplicateCategory(String),
    BlankPrefix,
    UnknownCollapseTarget { prefix: String, target: String },
    ShadowedCategory { category: String, prefix: String },
    UnknownBuiltin(String),
}

impl Display for RulesetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "ruleset name cannot be empty"),
            Self::NoCategories => write!(f, "ruleset must declare at least one category"),
            Self::BlankCategory => write!(f, "ruleset category name cannot be blank"),
            Self::DuplicateCategory(name) => write!(f, "duplicate ruleset category: `{name}`"),
            Self::BlankPrefix => write!(f, "collapse prefix cannot be blank"),
            Self::UnknownCollapseTarget { prefix, target } => write!(
                f,
                "collapse rule `{prefix}*` targets `{target}` which has no precedence entry"
            ),
            Self::ShadowedCategory { category, prefix } => write!(
                f,
                "category `{category}` is shadowed by collapse prefix `{prefix}`"
            ),
            Self::UnknownBuiltin(name) => write!(
                f,
                "unknown built-in ruleset `{name}`; expected {}",
                BUILTIN_RULESETS.join("|")
            ),
        }
    }
}

impl Error for RulesetError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CollapseRule {
    pub(crate) prefix: String,
    pub(crate) target: Category,
}

/// Validated, immutable ruleset.
///
/// # Invariants
/// - Category names are unique and non-blank.
/// - Every collapse target has a precedence entry.
/// - No category is shadowed by a collapse prefix pointing elsewhere, which
///   keeps normalization idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    name: String,
    pub(crate) precedence: Vec<(Category, u32)>,
    pub(crate) collapse: Vec<CollapseRule>,
}

impl Ruleset {
    /// Builds a ruleset from its declaration.
    ///
    /// # Errors
    /// - Returns `RulesetError` for blank names, empty or duplicate
    ///   categories, blank prefixes, collapse targets missing from the
    ///   precedence table and shadowed categories.
    pub fn from_config(config: RulesetConfig) -> Result<Self, RulesetError> {
        let name = config.name.trim();
        if name.is_empty() {
            return Err(RulesetError::EmptyName);
        }
        if config.precedence.is_empty() {
            return Err(RulesetError::NoCategories);
        }

        let mut seen = BTreeSet::<String>::new();
        let mut precedence = Vec::with_capacity(config.precedence.len());
        for entry in &config.precedence {
            let category = entry.category.trim();
            if category.is_empty() {
                return Err(RulesetError::BlankCategory);
            }
            if !seen.insert(category.to_string()) {
                return Err(RulesetError::DuplicateCategory(category.to_string()));
            }
            precedence.push((Category::new(category), entry.rank));
        }

        let mut collapse = Vec::with_capacity(config.collapse.len());
        for rule in &config.collapse {
            let prefix = rule.prefix.trim();
            if prefix.is_empty() {
                return Err(RulesetError::BlankPrefix);
            }
            let target = rule.into.trim();
            if !seen.contains(target) {
                return Err(RulesetError::UnknownCollapseTarget {
                    prefix: prefix.to_string(),
                    target: target.to_string(),
                });
            }
            collapse.push(CollapseRule {
                prefix: prefix.to_string(),
                target: Category::new(target),
            });
        }

        for (category, _) in &precedence {
            let first_match = collapse
                .iter()
                .find(|rule| category.as_str().starts_with(rule.prefix.as_str()));
            if let Some(rule) = first_match {
                if rule.target != *category {
                    return Err(RulesetError::ShadowedCategory {
                        category: category.to_string(),
                        prefix: rule.prefix.clone(),
                    });
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            precedence,
            collapse,
        })
    }

    /// Looks up a built-in ruleset by name.
    pub fn builtin(name: &str) -> Result<Self, RulesetError> {
        match name.trim().to_ascii_lowercase().as_str() {
            RULESET_NETWORK => Ok(Self::network()),
            RULESET_LEADERSHIP => Ok(Self::leadership()),
            other => Err(RulesetError::UnknownBuiltin(other.to_string())),
        }
    }

    /// admin > director > staff > chair > faculty > non-uni.
    ///
    /// Every `director*` label (e.g. `director_r`) collapses to `director`.
    pub fn network() -> Self {
        Self::trusted(
            RULESET_NETWORK,
            &[
                ("admin", 1),
                ("director", 2),
                ("staff", 3),
                ("chair", 4),
                ("faculty", 5),
                ("non-uni", 6),
            ],
            &[("director", "director")],
        )
    }

    /// admin > chair/director > faculty.
    ///
    /// `director*` and `chair*` labels collapse to `chair/director`.
    pub fn leadership() -> Self {
        Self::trusted(
            RULESET_LEADERSHIP,
            &[("admin", 1), ("chair/director", 2), ("faculty", 3)],
            &[("director", "chair/director"), ("chair", "chair/director")],
        )
    }

    // Built-in tables are validated by unit tests; construction skips the
    // fallible path.
    fn trusted(name: &str, precedence: &[(&str, u32)], collapse: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            precedence: precedence
                .iter()
                .map(|(category, rank)| (Category::new(*category), *rank))
                .collect(),
            collapse: collapse
                .iter()
                .map(|(prefix, target)| CollapseRule {
                    prefix: (*prefix).to_string(),
                    target: Category::new(*target),
                })
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.precedence.iter().map(|(category, _)| category)
    }

    /// Returns the category with exactly this name.
    pub fn category(&self, name: &str) -> Option<Category> {
        self.precedence
            .iter()
            .find(|(category, _)| category.as_str() == name)
            .map(|(category, _)| category.clone())
    }

    /// Returns the declaration this ruleset was built from.
    pub fn to_config(&self) -> RulesetConfig {
        RulesetConfig {
            name: self.name.clone(),
            precedence: self
                .precedence
                .iter()
                .map(|(category, rank)| PrecedenceEntry {
                    category: category.to_string(),
                    rank: *rank,
                })
                .collect(),
            collapse: self
                .collapse
                .iter()
                .map(|rule| CollapseRuleConfig {
                    prefix: rule.prefix.clone(),
                    into: rule.target.to_string(),
                })
                .collect(),
        }
    }
}

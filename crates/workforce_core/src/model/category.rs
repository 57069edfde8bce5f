//! Canonical job category.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Canonical job-title bucket of one ruleset (e.g. `admin`, `faculty`).
///
/// Constructed only by [`crate::rules::ruleset::Ruleset`], which guarantees membership
/// in its fixed category set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

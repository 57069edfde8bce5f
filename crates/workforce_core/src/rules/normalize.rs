//! Title normalization.
//!
//! # Invariants
//! - Prefix collapse is checked before exact matching (`director_r` ->
//!   `director`).
//! - Labels outside the ruleset are `Excluded`; callers drop those rows.
//! - `normalize(normalize(x)) == normalize(x)` for canonical `x`.

use crate::model::category::Category;
use crate::model::record::{Job, RankedJob};
use crate::rules::ruleset::Ruleset;
use log::debug;

/// Outcome of normalizing one raw category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Canonical(Category),
    Excluded,
}

impl Normalized {
    pub fn category(&self) -> Option<&Category> {
        match self {
            Self::Canonical(category) => Some(category),
            Self::Excluded => None,
        }
    }
}

impl Ruleset {
    /// Maps a raw category label to this ruleset's canonical category.
    pub fn normalize(&self, raw: &str) -> Normalized {
        let label = raw.trim();
        if let Some(rule) = self
            .collapse
            .iter()
            .find(|rule| label.starts_with(rule.prefix.as_str()))
        {
            return Normalized::Canonical(rule.target.clone());
        }

        match self.category(label) {
            Some(category) => Normalized::Canonical(category),
            None => Normalized::Excluded,
        }
    }
}

/// Jobs that survived normalization plus the number of dropped rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedJobs {
    pub jobs: Vec<RankedJob>,
    pub excluded: usize,
}

/// Normalizes every job, dropping rows whose category is excluded.
///
/// Produces a new collection; the input slice is never modified.
pub fn normalize_jobs(jobs: &[Job], ruleset: &Ruleset) -> NormalizedJobs {
    let mut ranked = Vec::with_capacity(jobs.len());
    let mut excluded = 0usize;

    for job in jobs {
        match ruleset.normalize(&job.category) {
            Normalized::Canonical(category) => ranked.push(RankedJob {
                person_id: job.person_id,
                employer_id: job.employer_id,
                title: job.title.clone(),
                category,
                start_year: job.start_year,
                end_year: job.end_year,
            }),
            Normalized::Excluded => excluded += 1,
        }
    }

    debug!(
        "event=jobs_normalize module=rules status=ok ruleset={} kept={} excluded={}",
        ruleset.name(),
        ranked.len(),
        excluded
    );

    NormalizedJobs {
        jobs: ranked,
        excluded,
    }
}

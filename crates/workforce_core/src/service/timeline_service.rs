//! Person timeline aggregation.
//!
//! # Responsibility
//! - Pick each person's first award.
//! - Resolve first job, first year in network, highest job and last job
//!   through the named cascades.
//!
//! # Invariants
//! - Source jobs and awards are never modified; results go to a separate
//!   `TimelineTable`.
//! - Output rows are sorted by person id and depend only on the inputs.

use crate::model::category::Category;
use crate::model::record::{Award, AwardId, AwardRole, OrgId, PersonId};
use crate::repo::workforce_repo::WorkforceRepository;
use crate::resolve::cascade::Cascade;
use crate::resolve::strategy::Direction;
use crate::rules::ruleset::Ruleset;
use log::info;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Instant;

/// Aggregation knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineOptions {
    /// Jobs starting after this year are ignored for `last_job` (unless no
    /// job starts on or before it).
    pub last_job_cutoff: Option<i32>,
}

/// The award through which a person entered the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstAward {
    pub award_id: AwardId,
    pub org_id: OrgId,
    pub start_year: i32,
    pub role: AwardRole,
}

/// Derived job summary for one person. `None` means unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonTimeline {
    pub person_id: PersonId,
    #[serde(skip)]
    pub first_award: Option<FirstAward>,
    pub first_job: Option<Category>,
    pub first_year_in_network: Option<i32>,
    pub highest_job: Option<Category>,
    pub last_job: Option<Category>,
}

/// Derived per-person table, sorted by person id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimelineTable {
    pub rows: Vec<PersonTimeline>,
}

impl TimelineTable {
    pub fn get(&self, person_id: PersonId) -> Option<&PersonTimeline> {
        self.rows
            .binary_search_by_key(&person_id, |row| row.person_id)
            .ok()
            .map(|index| &self.rows[index])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Picks the earliest dated award.
///
/// Awards in the earliest year collapse by organization (first row wins);
/// among the remaining organizations the most senior role wins, and the
/// earlier row wins on equal roles. Awards without a start year are ignored.
pub fn first_award(awards: &[Award]) -> Option<FirstAward> {
    let year = awards.iter().filter_map(|award| award.start_year).min()?;

    let mut seen_orgs = BTreeSet::new();
    let same_year = awards
        .iter()
        .filter(|award| award.start_year == Some(year))
        .filter(|award| seen_orgs.insert(award.org_id))
        .collect::<Vec<_>>();

    let award = same_year
        .into_iter()
        .min_by_key(|award| award.role.rank())?;
    Some(FirstAward {
        award_id: award.award_id,
        org_id: award.org_id,
        start_year: year,
        role: award.role.clone(),
    })
}

/// Timeline use-case service over a workforce repository.
pub struct TimelineService<R: WorkforceRepository> {
    repo: R,
    ruleset: Ruleset,
    options: TimelineOptions,
}

impl<R: WorkforceRepository> TimelineService<R> {
    pub fn new(repo: R, ruleset: Ruleset) -> Self {
        Self::with_options(repo, ruleset, TimelineOptions::default())
    }

    pub fn with_options(repo: R, ruleset: Ruleset, options: TimelineOptions) -> Self {
        Self {
            repo,
            ruleset,
            options,
        }
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Summarizes one person.
    ///
    /// Returns `None` when the person has no awards.
    pub fn summarize_person(&self, person_id: PersonId) -> Option<PersonTimeline> {
        let awards = self.repo.awards_for(person_id);
        if awards.is_empty() {
            return None;
        }
        let jobs = self.repo.jobs_for(person_id);
        let first_award = first_award(awards);

        let (first_job, first_year_in_network) = match &first_award {
            Some(award) => {
                match Cascade::first_job(award.org_id).resolve(
                    jobs,
                    Some(award.start_year),
                    &self.ruleset,
                ) {
                    // Falling back to the highest job means the person is
                    // taken to have entered the network in the award year.
                    Some(resolution) => (
                        Some(resolution.category),
                        resolution.year.or(Some(award.start_year)),
                    ),
                    None => (None, None),
                }
            }
            None => (
                Cascade::closest(Direction::OnOrBefore)
                    .resolve(jobs, None, &self.ruleset)
                    .map(|resolution| resolution.category),
                None,
            ),
        };

        let award_orgs = awards
            .iter()
            .map(|award| award.org_id)
            .collect::<BTreeSet<_>>();
        let highest_job = Cascade::highest_job(award_orgs)
            .resolve(jobs, first_year_in_network, &self.ruleset)
            .map(|resolution| resolution.category);

        let last_job = Cascade::last_job(self.options.last_job_cutoff)
            .resolve(jobs, self.options.last_job_cutoff, &self.ruleset)
            .map(|resolution| resolution.category);

        Some(PersonTimeline {
            person_id,
            first_award,
            first_job,
            first_year_in_network,
            highest_job,
            last_job,
        })
    }

    /// Summarizes every person with at least one award.
    ///
    /// # Side effects
    /// - Emits one `timeline_build` logging event with counts.
    pub fn summarize_all(&self) -> TimelineTable {
        let started_at = Instant::now();
        let rows = self
            .repo
            .people_with_awards()
            .into_iter()
            .filter_map(|person_id| self.summarize_person(person_id))
            .collect::<Vec<_>>();

        let unknown_first = rows.iter().filter(|row| row.first_job.is_none()).count();
        info!(
            "event=timeline_build module=service status=ok ruleset={} people={} unknown_first_job={} duration_ms={}",
            self.ruleset.name(),
            rows.len(),
            unknown_first,
            started_at.elapsed().as_millis()
        );

        TimelineTable { rows }
    }
}

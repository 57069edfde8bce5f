//! Candidate-producing strategies for temporal job resolution.
//!
//! Each strategy looks at one person's ranked jobs and either resolves a
//! category or reports no candidates. Strategies never fail: an empty
//! candidate set is the normal signal to fall back to the next step.

use crate::model::category::Category;
use crate::model::record::{OrgId, RankedJob};
use crate::rules::ruleset::Ruleset;
use std::collections::BTreeSet;

/// Side of the reference year a job start year must fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `start_year <= reference_year`.
    OnOrBefore,
    /// `start_year >= reference_year`.
    OnOrAfter,
}

impl Direction {
    /// Whether `start_year` satisfies the constraint. Unknown years never do.
    pub fn admits(self, start_year: Option<i32>, reference_year: Option<i32>) -> bool {
        match (start_year, reference_year) {
            (Some(start), Some(reference)) => match self {
                Self::OnOrBefore => start <= reference,
                Self::OnOrAfter => start >= reference,
            },
            _ => false,
        }
    }

    /// Picks the year closest to the reference among admitted years.
    fn closest(self, years: impl Iterator<Item = i32>) -> Option<i32> {
        match self {
            Self::OnOrBefore => years.max(),
            Self::OnOrAfter => years.min(),
        }
    }
}

/// Employer restriction applied before any year logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployerFilter {
    Any,
    One(OrgId),
    AnyOf(BTreeSet<OrgId>),
}

impl EmployerFilter {
    pub fn admits(&self, employer_id: Option<OrgId>) -> bool {
        match self {
            Self::Any => true,
            Self::One(expected) => employer_id == Some(*expected),
            Self::AnyOf(allowed) => employer_id.is_some_and(|id| allowed.contains(&id)),
        }
    }
}

/// One step of a fallback cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Jobs on the given side of the reference year, closest year wins.
    Closest {
        direction: Direction,
        employers: EmployerFilter,
    },
    /// Earliest dated job, ignoring the reference year.
    Earliest { employers: EmployerFilter },
    /// Latest dated job, ignoring the reference year.
    Latest,
    /// Most senior category among all jobs on the given side of the
    /// reference year.
    HighestWithin {
        direction: Direction,
        employers: EmployerFilter,
    },
    /// Most senior category over every job, dated or not.
    HighestOverall,
}

/// Category picked by a strategy and the start year it was picked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub category: Category,
    /// Start year of the selected jobs; `None` for the `Highest*` steps.
    pub year: Option<i32>,
}

impl Strategy {
    /// Applies this step to one person's jobs.
    pub fn apply(
        &self,
        jobs: &[RankedJob],
        reference_year: Option<i32>,
        ruleset: &Ruleset,
    ) -> Option<Pick> {
        match self {
            Self::Closest {
                direction,
                employers,
            } => {
                let candidates = jobs
                    .iter()
                    .filter(|job| employers.admits(job.employer_id))
                    .filter(|job| direction.admits(job.start_year, reference_year))
                    .collect::<Vec<_>>();
                let year = direction.closest(candidates.iter().filter_map(|job| job.start_year))?;
                pick_in_year(&candidates, year, ruleset)
            }
            Self::Earliest { employers } => {
                let candidates = jobs
                    .iter()
                    .filter(|job| employers.admits(job.employer_id))
                    .collect::<Vec<_>>();
                let year = candidates.iter().filter_map(|job| job.start_year).min()?;
                pick_in_year(&candidates, year, ruleset)
            }
            Self::Latest => {
                let candidates = jobs.iter().collect::<Vec<_>>();
                let year = candidates.iter().filter_map(|job| job.start_year).max()?;
                pick_in_year(&candidates, year, ruleset)
            }
            Self::HighestWithin {
                direction,
                employers,
            } => {
                let category = ruleset.highest_title(
                    jobs.iter()
                        .filter(|job| employers.admits(job.employer_id))
                        .filter(|job| direction.admits(job.start_year, reference_year))
                        .map(|job| &job.category),
                )?;
                Some(Pick {
                    category,
                    year: None,
                })
            }
            Self::HighestOverall => {
                let category = ruleset.highest_title(jobs.iter().map(|job| &job.category))?;
                Some(Pick {
                    category,
                    year: None,
                })
            }
        }
    }
}

/// Ranks the distinct categories of the jobs that start in `year`.
///
/// Tied jobs are visited by end year ascending (unknown last) so that
/// equal-rank categories resolve the same way on every run.
fn pick_in_year(candidates: &[&RankedJob], year: i32, ruleset: &Ruleset) -> Option<Pick> {
    let mut tied = candidates
        .iter()
        .filter(|job| job.start_year == Some(year))
        .copied()
        .collect::<Vec<_>>();
    tied.sort_by_key(|job| (job.end_year.is_none(), job.end_year));

    let mut distinct: Vec<&Category> = Vec::new();
    for job in tied {
        if !distinct.contains(&&job.category) {
            distinct.push(&job.category);
        }
    }

    let category = ruleset.highest_title(distinct)?;
    Some(Pick {
        category,
        year: Some(year),
    })
}

#[cfg(test)]
mod tests {
    use super::{Direction, EmployerFilter};
    use std::collections::BTreeSet;

    #[test]
    fn direction_compares_against_reference_inclusively() {
        assert!(Direction::OnOrBefore.admits(Some(2010), Some(2010)));
        assert!(Direction::OnOrBefore.admits(Some(2009), Some(2010)));
        assert!(!Direction::OnOrBefore.admits(Some(2011), Some(2010)));
        assert!(Direction::OnOrAfter.admits(Some(2011), Some(2010)));
        assert!(!Direction::OnOrAfter.admits(Some(2009), Some(2010)));
    }

    #[test]
    fn unknown_years_never_satisfy_a_direction() {
        for direction in [Direction::OnOrBefore, Direction::OnOrAfter] {
            assert!(!direction.admits(None, Some(2010)));
            assert!(!direction.admits(Some(2010), None));
        }
    }

    #[test]
    fn employer_filter_variants() {
        assert!(EmployerFilter::Any.admits(None));
        assert!(EmployerFilter::One(7).admits(Some(7)));
        assert!(!EmployerFilter::One(7).admits(None));
        let set = EmployerFilter::AnyOf(BTreeSet::from([1, 2]));
        assert!(set.admits(Some(2)));
        assert!(!set.admits(Some(3)));
    }
}

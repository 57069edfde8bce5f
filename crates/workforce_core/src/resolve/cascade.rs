//! Ordered fallback cascades.
//!
//! A cascade is a short list of strategies evaluated in order; the first step
//! that finds candidates wins. The first-job and generic closest-job cascades
//! differ in where the employer filter is dropped, and both variants are kept
//! as separate named constructors.

use crate::model::category::Category;
use crate::model::record::{OrgId, RankedJob};
use crate::resolve::strategy::{Direction, EmployerFilter, Strategy};
use crate::rules::ruleset::Ruleset;
use log::trace;
use std::collections::BTreeSet;

/// Result of a cascade: the category, the year it came from, and the index
/// of the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub category: Category,
    pub year: Option<i32>,
    pub step: usize,
}

/// Named ordered list of fallback strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    name: &'static str,
    steps: Vec<Strategy>,
}

impl Cascade {
    pub fn new(name: &'static str, steps: Vec<Strategy>) -> Self {
        Self { name, steps }
    }

    /// Closest job on one side of the reference year, else the most senior
    /// job ever held.
    pub fn closest(direction: Direction) -> Self {
        Self::new(
            "closest",
            vec![
                Strategy::Closest {
                    direction,
                    employers: EmployerFilter::Any,
                },
                Strategy::HighestOverall,
            ],
        )
    }

    /// Position held when entering the network through an award at
    /// `employer`.
    ///
    /// 1. closest job on or before the award year at the award institution;
    /// 2. earliest job at the award institution;
    /// 3. closest job on or before the award year anywhere;
    /// 4. most senior job ever held.
    pub fn first_job(employer: OrgId) -> Self {
        Self::new(
            "first_job",
            vec![
                Strategy::Closest {
                    direction: Direction::OnOrBefore,
                    employers: EmployerFilter::One(employer),
                },
                Strategy::Earliest {
                    employers: EmployerFilter::One(employer),
                },
                Strategy::Closest {
                    direction: Direction::OnOrBefore,
                    employers: EmployerFilter::Any,
                },
                Strategy::HighestOverall,
            ],
        )
    }

    /// Most senior position since entering the network, preferring jobs at
    /// the person's award institutions.
    pub fn highest_job(award_orgs: BTreeSet<OrgId>) -> Self {
        Self::new(
            "highest_job",
            vec![
                Strategy::HighestWithin {
                    direction: Direction::OnOrAfter,
                    employers: EmployerFilter::AnyOf(award_orgs),
                },
                Strategy::HighestWithin {
                    direction: Direction::OnOrAfter,
                    employers: EmployerFilter::Any,
                },
                Strategy::HighestOverall,
            ],
        )
    }

    /// Most recent position, optionally ignoring jobs that start after
    /// `cutoff`.
    ///
    /// When no job starts on or before the cutoff, the cutoff is dropped.
    pub fn last_job(cutoff: Option<i32>) -> Self {
        let mut steps = Vec::with_capacity(3);
        if cutoff.is_some() {
            steps.push(Strategy::Closest {
                direction: Direction::OnOrBefore,
                employers: EmployerFilter::Any,
            });
        }
        steps.push(Strategy::Latest);
        steps.push(Strategy::HighestOverall);
        Self::new("last_job", steps)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn steps(&self) -> &[Strategy] {
        &self.steps
    }

    /// Evaluates steps in order and returns the first non-empty result.
    ///
    /// Returns `None` when every step finds no candidates, which for the
    /// built-in cascades means the person has no ranked jobs.
    pub fn resolve(
        &self,
        jobs: &[RankedJob],
        reference_year: Option<i32>,
        ruleset: &Ruleset,
    ) -> Option<Resolution> {
        for (step, strategy) in self.steps.iter().enumerate() {
            if let Some(pick) = strategy.apply(jobs, reference_year, ruleset) {
                trace!(
                    "event=cascade_resolve module=resolve status=ok cascade={} step={}",
                    self.name,
                    step
                );
                return Some(Resolution {
                    category: pick.category,
                    year: pick.year,
                    step,
                });
            }
        }

        trace!(
            "event=cascade_resolve module=resolve status=empty cascade={}",
            self.name
        );
        None
    }
}

/// Returns the category of the job closest to `reference_year` on the given
/// side, falling back to the most senior job ever held.
///
/// `jobs` must belong to a single person. Returns `None` only when `jobs` is
/// empty.
pub fn closest_job(
    jobs: &[RankedJob],
    reference_year: i32,
    direction: Direction,
    ruleset: &Ruleset,
) -> Option<Category> {
    Cascade::closest(direction)
        .resolve(jobs, Some(reference_year), ruleset)
        .map(|resolution| resolution.category)
}

//! Institution changes of principal investigators.
//!
//! # Invariants
//! - Only jobs starting on or after the award year count as changes.
//! - Returning to an earlier employer is not a second change; employers are
//!   counted once.

use crate::model::category::Category;
use crate::model::record::{AwardId, AwardRole, MobilityEdge, OrgId, PersonId};
use crate::repo::workforce_repo::WorkforceRepository;
use crate::resolve::cascade::Cascade;
use crate::resolve::strategy::{Direction, EmployerFilter, Strategy};
use crate::rules::ruleset::Ruleset;
use log::info;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Counting unit for award-based figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountLevel {
    /// One row per person (first investigator award row kept).
    Person,
    /// One row per (person, award).
    Role,
}

/// Institution-change outcome for one counted award row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionChange {
    pub person_id: PersonId,
    pub award_id: AwardId,
    pub award_start_year: Option<i32>,
    pub role: AwardRole,
    pub gender: Option<String>,
    pub changed_institution: bool,
    /// Position in the first year on or after the award; `None` when the
    /// person has no dated job from then on.
    pub job: Option<Category>,
}

/// Stayed/moved counts for one (position, gender) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MobilityTally {
    pub stayed: usize,
    pub moved: usize,
}

fn job_after_award() -> Cascade {
    Cascade::new(
        "job_after_award",
        vec![Strategy::Closest {
            direction: Direction::OnOrAfter,
            employers: EmployerFilter::Any,
        }],
    )
}

/// Flags investigators whose jobs after the award span several employers.
pub fn institution_changes<R: WorkforceRepository>(
    repo: &R,
    ruleset: &Ruleset,
    level: CountLevel,
) -> Vec<InstitutionChange> {
    let cascade = job_after_award();
    let mut changes = Vec::new();

    for person_id in repo.people_with_awards() {
        let jobs = repo.jobs_for(person_id);
        let gender = repo
            .demographic(person_id)
            .and_then(|demographic| demographic.gender.clone());

        let mut seen_awards = BTreeSet::new();
        let counted = repo
            .awards_for(person_id)
            .iter()
            .filter(|award| award.role.is_investigator())
            .filter(|award| match level {
                CountLevel::Person => seen_awards.insert(None),
                CountLevel::Role => seen_awards.insert(Some(award.award_id)),
            })
            .collect::<Vec<_>>();

        for award in counted {
            let employers = jobs
                .iter()
                .filter(|job| Direction::OnOrAfter.admits(job.start_year, award.start_year))
                .map(|job| job.employer_id)
                .collect::<BTreeSet<Option<OrgId>>>();

            changes.push(InstitutionChange {
                person_id,
                award_id: award.award_id,
                award_start_year: award.start_year,
                role: award.role.clone(),
                gender: gender.clone(),
                changed_institution: employers.len() > 1,
                job: cascade
                    .resolve(jobs, award.start_year, ruleset)
                    .map(|resolution| resolution.category),
            });
        }
    }

    info!(
        "event=mobility_build module=service status=ok rows={} moved={}",
        changes.len(),
        changes
            .iter()
            .filter(|change| change.changed_institution)
            .count()
    );
    changes
}

/// Tallies stayed/moved rows per (position, gender).
///
/// Rows without a resolved job or a gender are left out.
pub fn tally_by_position_and_gender(
    changes: &[InstitutionChange],
) -> BTreeMap<(Category, String), MobilityTally> {
    let mut tally = BTreeMap::<(Category, String), MobilityTally>::new();
    for change in changes {
        let (Some(job), Some(gender)) = (&change.job, &change.gender) else {
            continue;
        };
        let cell = tally.entry((job.clone(), gender.clone())).or_default();
        if change.changed_institution {
            cell.moved += 1;
        } else {
            cell.stayed += 1;
        }
    }
    tally
}

/// Keeps moves whose origin and destination both received an `it` award.
///
/// Edges referencing organizations missing from the table are dropped.
pub fn it_site_moves<R: WorkforceRepository>(repo: &R) -> Vec<MobilityEdge> {
    let is_it_site = |org_id: OrgId| {
        repo.organization(org_id)
            .and_then(|org| org.award_type)
            .is_some_and(|award_type| award_type.is_it_site())
    };

    repo.mobility_edges()
        .iter()
        .filter(|edge| is_it_site(edge.from_org_id) && is_it_site(edge.to_org_id))
        .cloned()
        .collect()
}

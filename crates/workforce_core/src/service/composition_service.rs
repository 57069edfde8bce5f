//! Network composition dataset (discipline, gender, race/ethnicity and
//! position at first award).

use crate::model::category::Category;
use crate::model::record::{Award, AwardRole, PersonId};
use crate::repo::workforce_repo::WorkforceRepository;
use crate::resolve::cascade::closest_job;
use crate::resolve::strategy::Direction;
use crate::rules::ruleset::Ruleset;
use log::info;
use serde::Serialize;
use std::collections::BTreeSet;

/// Divisions kept in the composition figure.
pub const COMPOSITION_DIVISIONS: &[&str] = &["science", "social science", "engineering"];

/// One fully populated row of the composition dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionRow {
    pub person_id: PersonId,
    pub award_start_year: i32,
    pub job_category: Category,
    pub race_ethnicity: String,
    pub gender: String,
    pub division: String,
}

/// Builds one row per person: their position at their first award merged
/// with their demographics.
///
/// Internal evaluator and day-to-day roles are not counted as awards here.
/// People without a dated award, a resolvable job, or complete demographics
/// in a kept division are dropped.
pub fn network_composition<R: WorkforceRepository>(
    repo: &R,
    ruleset: &Ruleset,
) -> Vec<CompositionRow> {
    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for person_id in repo.people_with_awards() {
        match composition_row(repo, ruleset, person_id) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    info!(
        "event=composition_build module=service status=ok ruleset={} rows={} dropped={}",
        ruleset.name(),
        rows.len(),
        dropped
    );
    rows
}

fn composition_row<R: WorkforceRepository>(
    repo: &R,
    ruleset: &Ruleset,
    person_id: PersonId,
) -> Option<CompositionRow> {
    let award_start_year = earliest_counted_award(repo.awards_for(person_id))?;
    let job_category = closest_job(
        repo.jobs_for(person_id),
        award_start_year,
        Direction::OnOrBefore,
        ruleset,
    )?;

    let demographic = repo.demographic(person_id)?;
    let division = present(demographic.division.as_deref())?;
    if !COMPOSITION_DIVISIONS.contains(&division) {
        return None;
    }

    Some(CompositionRow {
        person_id,
        award_start_year,
        job_category,
        race_ethnicity: present(demographic.race_ethnicity.as_deref())?.to_string(),
        gender: present(demographic.gender.as_deref())?.to_string(),
        division: division.to_string(),
    })
}

fn earliest_counted_award(awards: &[Award]) -> Option<i32> {
    let mut seen = BTreeSet::new();
    awards
        .iter()
        .filter(|award| {
            !matches!(
                award.role,
                AwardRole::InternalEvaluator | AwardRole::DayToDay
            )
        })
        .filter(|award| seen.insert(award.award_id))
        .filter_map(|award| award.start_year)
        .min()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

//! Employer/category consistency sweep.
//!
//! A university-style position (faculty, chair, ...) at an organization that
//! is not a university is rewritten to `non-uni`. This is the only automatic
//! correction the anomaly pass makes.

use crate::anomaly::report::ReportSection;
use crate::anomaly::university::UniversityRules;
use crate::model::record::{Job, OrgId, Organization, PersonId};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};

/// Raw category label for positions outside universities.
pub const NON_UNI: &str = "non-uni";

/// Corrected jobs plus before/after `non-uni` counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencySweep {
    pub jobs: Vec<Job>,
    pub non_uni_before: usize,
    pub non_uni_after: usize,
    pub section: ReportSection,
}

impl ConsistencySweep {
    pub fn newly_non_uni(&self) -> usize {
        self.non_uni_after - self.non_uni_before
    }
}

/// Rewrites university-style categories at non-university employers.
///
/// Returns a new job collection; `jobs` is left as is. Jobs whose employer is
/// missing from `organizations` are not touched.
pub fn consistency_sweep(
    jobs: &[Job],
    organizations: &[Organization],
    rules: &UniversityRules,
) -> ConsistencySweep {
    let non_university = organizations
        .iter()
        .filter(|org| !rules.is_university(org))
        .map(|org| org.org_id)
        .collect::<BTreeSet<OrgId>>();
    let known = organizations
        .iter()
        .map(|org| org.org_id)
        .collect::<BTreeSet<OrgId>>();

    let mut rewritten = BTreeMap::<OrgId, Vec<(PersonId, String)>>::new();
    let mut unknown_employer = 0usize;
    let corrected = jobs
        .iter()
        .map(|job| {
            let Some(employer_id) = job.employer_id else {
                return job.clone();
            };
            if !known.contains(&employer_id) {
                unknown_employer += 1;
                return job.clone();
            }
            if !non_university.contains(&employer_id) || job.category == NON_UNI {
                return job.clone();
            }

            rewritten
                .entry(employer_id)
                .or_default()
                .push((job.person_id, job.category.clone()));
            Job {
                category: NON_UNI.to_string(),
                ..job.clone()
            }
        })
        .collect::<Vec<_>>();

    let non_uni_before = count_non_uni(jobs);
    let non_uni_after = count_non_uni(&corrected);

    let mut section = ReportSection::new(
        "The employers for the below positions are not presently marked as universities, so their categories will be set to non-uni.",
    );
    section.push(format!(
        "Number of jobs newly set to non-uni: {}",
        non_uni_after - non_uni_before
    ));
    for org in organizations {
        let Some(rows) = rewritten.get(&org.org_id) else {
            continue;
        };
        section.push(format!("{}: {}", org.org_id, org.name));
        for (person_id, category) in rows {
            section.push(format!(" - {person_id} had uni position: {category}"));
        }
    }

    debug!(
        "event=consistency_sweep module=anomaly status=ok unknown_employer_jobs={}",
        unknown_employer
    );
    info!(
        "event=consistency_sweep module=anomaly status=ok non_uni_orgs={} rewritten={}",
        non_university.len(),
        non_uni_after - non_uni_before
    );

    ConsistencySweep {
        jobs: corrected,
        non_uni_before,
        non_uni_after,
        section,
    }
}

fn count_non_uni(jobs: &[Job]) -> usize {
    jobs.iter().filter(|job| job.category == NON_UNI).count()
}

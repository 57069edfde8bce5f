//! Chronology sweep for program directorships.
//!
//! A directorship of the award program cannot start before the person's
//! first award does; such rows point at mistyped years or titles.

use crate::anomaly::report::ReportSection;
use crate::model::record::{Award, Job, PersonId};
use log::info;
use std::collections::BTreeMap;

const MAX_TITLE_CHARS: usize = 60;
const PROGRAM_KEYWORD: &str = "advance";

/// Whether a lower-cased title names a directorship of the program.
pub fn is_program_directorship(title: &str) -> bool {
    title.contains("director")
        && (title.ends_with(PROGRAM_KEYWORD) || title.contains(&format!("{PROGRAM_KEYWORD} ")))
}

/// Flags program directorships that start before every award of the person.
///
/// Jobs with an unknown start year are skipped.
pub fn chronology_sweep(jobs: &[Job], awards: &[Award]) -> ReportSection {
    let mut awards_by_person = BTreeMap::<PersonId, Vec<&Award>>::new();
    for award in awards {
        awards_by_person
            .entry(award.person_id)
            .or_default()
            .push(award);
    }

    let mut section = ReportSection::new(
        "Directorships which start before the person's first award:",
    );
    let mut flagged = 0usize;
    for job in jobs {
        let Some(job_start) = job.start_year else {
            continue;
        };
        let title = job.title.to_lowercase();
        if !is_program_directorship(&title) {
            continue;
        }

        let person_awards = awards_by_person
            .get(&job.person_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let started_after_an_award = person_awards
            .iter()
            .filter_map(|award| award.start_year)
            .any(|award_start| job_start >= award_start);
        if started_after_an_award {
            continue;
        }

        flagged += 1;
        section.push(format!(
            "Person {} has a job as \"{}\" which starts in year {}.",
            job.person_id,
            truncate_title(&title),
            job_start
        ));
        let earliest = person_awards
            .iter()
            .filter_map(|award| award.start_year.map(|year| (year, award.org_id)))
            .min_by_key(|(year, _)| *year);
        match earliest {
            Some((year, org_id)) => section.push(format!(
                "> Their first award started in {year} at org {org_id}."
            )),
            None => section.push("> No dated awards on record."),
        }
    }

    info!(
        "event=chronology_sweep module=anomaly status=ok flagged={}",
        flagged
    );
    section
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let mut truncated = title.chars().take(MAX_TITLE_CHARS).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{is_program_directorship, truncate_title};

    #[test]
    fn directorship_pattern_requires_director_and_program_token() {
        assert!(is_program_directorship("director, nsf advance"));
        assert!(is_program_directorship("co-director of advance program"));
        assert!(!is_program_directorship("director of advancement"));
        assert!(!is_program_directorship("advance program coordinator"));
    }

    #[test]
    fn long_titles_are_truncated_with_ellipsis() {
        let long = "a".repeat(75);
        let truncated = truncate_title(&long);
        assert_eq!(truncated.len(), 63);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_title("short"), "short");
    }
}

use serde_json::json;
use workforce_core::service::composition_service::network_composition;
use workforce_core::service::mobility_service::{
    institution_changes, it_site_moves, tally_by_position_and_gender, CountLevel, MobilityTally,
};
use workforce_core::{leadership_run, run_analysis, AnalysisConfig, AnalysisRun, Dataset};

fn figure_dataset() -> Dataset {
    let text = json!({
        "jobs": [
            {"person_id": 1, "employer_id": 10, "title": "Professor", "category": "faculty", "start_year": 2005},
            {"person_id": 1, "employer_id": 10, "title": "Chair", "category": "chair", "start_year": 2012},
            {"person_id": 2, "employer_id": 12, "title": "Analyst", "category": "staff", "start_year": 2009},
            {"person_id": 3, "employer_id": 11, "title": "Provost", "category": "admin", "start_year": 2010},
            {"person_id": 5, "employer_id": 11, "title": "Professor", "category": "faculty", "start_year": 2009},
            {"person_id": 5, "employer_id": 12, "title": "Professor", "category": "faculty", "start_year": 2011}
        ],
        "awards": [
            {"person_id": 1, "award_id": 1, "org_id": 10, "role": "internal evaluator", "start_year": 2008},
            {"person_id": 1, "award_id": 2, "org_id": 10, "role": "pi", "start_year": 2010},
            {"person_id": 1, "award_id": 2, "org_id": 10, "role": "pi", "start_year": 2010},
            {"person_id": 1, "award_id": 6, "org_id": 10, "role": "former pi", "start_year": 2014},
            {"person_id": 2, "award_id": 3, "org_id": 12, "role": "pi", "start_year": 2011},
            {"person_id": 3, "award_id": 4, "org_id": 11, "role": "pi", "start_year": 2012},
            {"person_id": 4, "award_id": 5, "org_id": 10, "role": "day-to-day", "start_year": 2010},
            {"person_id": 5, "award_id": 7, "org_id": 11, "role": "co-pi", "start_year": 2009}
        ],
        "organizations": [
            {"org_id": 10, "name": "River University", "award_type": "it only"},
            {"org_id": 11, "name": "Hill College", "award_type": "it and non-it"},
            {"org_id": 12, "name": "Lake University", "award_type": "non-it only"},
            {"org_id": 13, "name": "Coast University"}
        ],
        "demographics": [
            {"person_id": 1, "gender": "female", "race_ethnicity": "white", "division": "science"},
            {"person_id": 2, "gender": "male", "race_ethnicity": "asian", "division": "humanities"},
            {"person_id": 3, "race_ethnicity": "urm", "division": "engineering"},
            {"person_id": 5, "gender": "female", "race_ethnicity": "urm", "division": "engineering"}
        ],
        "mobility_edges": [
            {"person_id": 1, "from_org_id": 10, "to_org_id": 11},
            {"person_id": 2, "from_org_id": 10, "to_org_id": 12},
            {"person_id": 3, "from_org_id": 11, "to_org_id": 13},
            {"person_id": 5, "from_org_id": 11, "to_org_id": 10},
            {"person_id": 5, "from_org_id": 11, "to_org_id": 99}
        ]
    })
    .to_string();
    Dataset::from_json_str(&text).expect("figure dataset is valid")
}

fn analysed() -> AnalysisRun {
    run_analysis(&figure_dataset(), &AnalysisConfig::default()).expect("analysis runs")
}

#[test]
fn composition_keeps_complete_rows_in_kept_divisions() {
    let run = analysed();
    let rows = network_composition(&run.repo, &run.ruleset);

    let summary = rows
        .iter()
        .map(|row| {
            (
                row.person_id,
                row.award_start_year,
                row.job_category.as_str(),
                row.division.as_str(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![(1, 2010, "faculty", "science"), (5, 2009, "faculty", "engineering")]
    );
    assert_eq!(rows[0].gender, "female");
    assert_eq!(rows[1].race_ethnicity, "urm");
}

#[test]
fn institution_changes_count_people_or_roles() {
    let run = analysed();

    let by_person = institution_changes(&run.repo, &run.ruleset, CountLevel::Person);
    let people = by_person
        .iter()
        .map(|change| (change.person_id, change.changed_institution))
        .collect::<Vec<_>>();
    assert_eq!(people, vec![(1, false), (2, false), (3, false), (5, true)]);
    assert_eq!(
        by_person[0].job.as_ref().map(|job| job.as_str()),
        Some("chair")
    );
    assert_eq!(by_person[1].job, None);

    let by_role = institution_changes(&run.repo, &run.ruleset, CountLevel::Role);
    let awards = by_role
        .iter()
        .map(|change| (change.person_id, change.award_id))
        .collect::<Vec<_>>();
    assert_eq!(awards, vec![(1, 2), (1, 6), (2, 3), (3, 4), (5, 7)]);
}

#[test]
fn tally_skips_rows_without_job_or_gender() {
    let run = analysed();
    let changes = institution_changes(&run.repo, &run.ruleset, CountLevel::Person);

    let tally = tally_by_position_and_gender(&changes)
        .into_iter()
        .map(|((job, gender), cell)| (job.to_string(), gender, cell))
        .collect::<Vec<_>>();
    assert_eq!(
        tally,
        vec![
            (
                "chair".to_string(),
                "female".to_string(),
                MobilityTally { stayed: 1, moved: 0 }
            ),
            (
                "faculty".to_string(),
                "female".to_string(),
                MobilityTally { stayed: 0, moved: 1 }
            ),
        ]
    );
}

#[test]
fn it_site_moves_need_it_awards_at_both_ends() {
    let run = analysed();
    let moves = it_site_moves(&run.repo)
        .into_iter()
        .map(|edge| (edge.person_id, edge.from_org_id, edge.to_org_id))
        .collect::<Vec<_>>();
    assert_eq!(moves, vec![(1, 10, 11), (5, 11, 10)]);
}

#[test]
fn mobility_positions_use_the_leadership_table() {
    let run = leadership_run(&figure_dataset(), &AnalysisConfig::default())
        .expect("leadership analysis runs");
    assert_eq!(run.ruleset.name(), "leadership");

    let changes = institution_changes(&run.repo, &run.ruleset, CountLevel::Person);
    let jobs = changes
        .iter()
        .map(|change| (change.person_id, change.job.as_ref().map(|job| job.to_string())))
        .collect::<Vec<_>>();
    assert_eq!(jobs[0], (1, Some("chair/director".to_string())));
    assert_eq!(jobs[1], (2, None), "staff has no leadership rank");

    let tally = tally_by_position_and_gender(&changes)
        .into_iter()
        .map(|((job, gender), cell)| (job.to_string(), gender, cell))
        .collect::<Vec<_>>();
    assert_eq!(
        tally,
        vec![
            (
                "chair/director".to_string(),
                "female".to_string(),
                MobilityTally { stayed: 1, moved: 0 }
            ),
            (
                "faculty".to_string(),
                "female".to_string(),
                MobilityTally { stayed: 0, moved: 1 }
            ),
        ]
    );
}

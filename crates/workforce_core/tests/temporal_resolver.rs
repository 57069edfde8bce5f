use std::collections::BTreeSet;
use workforce_core::{
    closest_job, Cascade, Direction, EmployerFilter, RankedJob, Ruleset, RulesetConfig, Strategy,
};

fn job(
    ruleset: &Ruleset,
    employer_id: Option<u64>,
    category: &str,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> RankedJob {
    RankedJob {
        person_id: 1,
        employer_id,
        title: String::new(),
        category: ruleset.category(category).expect("category is ranked"),
        start_year,
        end_year,
    }
}

fn name_of(resolved: Option<workforce_core::Category>) -> Option<String> {
    resolved.map(|category| category.to_string())
}

#[test]
fn tie_year_resolves_to_the_more_senior_category() {
    let ruleset = Ruleset::network();
    let jobs = vec![
        job(&ruleset, Some(1), "faculty", Some(2005), None),
        job(&ruleset, Some(1), "chair", Some(2005), None),
    ];

    let resolved = closest_job(&jobs, 2010, Direction::OnOrBefore, &ruleset);
    assert_eq!(name_of(resolved), Some("chair".to_string()));
}

#[test]
fn closest_year_wins_over_seniority_on_each_side() {
    let ruleset = Ruleset::network();
    let jobs = vec![
        job(&ruleset, Some(1), "admin", Some(2001), None),
        job(&ruleset, Some(1), "faculty", Some(2008), None),
        job(&ruleset, Some(1), "staff", Some(2012), None),
        job(&ruleset, Some(1), "admin", Some(2016), None),
    ];

    assert_eq!(
        name_of(closest_job(&jobs, 2010, Direction::OnOrBefore, &ruleset)),
        Some("faculty".to_string())
    );
    assert_eq!(
        name_of(closest_job(&jobs, 2010, Direction::OnOrAfter, &ruleset)),
        Some("staff".to_string())
    );
    assert_eq!(
        name_of(closest_job(&jobs, 2008, Direction::OnOrAfter, &ruleset)),
        Some("faculty".to_string())
    );
}

#[test]
fn jobs_only_after_the_reference_fall_through_to_highest_overall() {
    let ruleset = Ruleset::network();
    let jobs = vec![
        job(&ruleset, Some(1), "faculty", Some(2012), None),
        job(&ruleset, Some(1), "admin", Some(2015), None),
    ];

    let resolution = Cascade::closest(Direction::OnOrBefore)
        .resolve(&jobs, Some(2010), &ruleset)
        .expect("fallback resolves");
    assert_eq!(resolution.category.as_str(), "admin");
    assert_eq!(resolution.step, 1);
    assert_eq!(resolution.year, None);

    let first_step = Strategy::Closest {
        direction: Direction::OnOrBefore,
        employers: EmployerFilter::Any,
    };
    assert_eq!(first_step.apply(&jobs, Some(2010), &ruleset), None);
}

#[test]
fn zero_jobs_resolve_to_none_for_any_reference() {
    let ruleset = Ruleset::network();
    for direction in [Direction::OnOrBefore, Direction::OnOrAfter] {
        for reference in [1900, 2010, 2100] {
            assert_eq!(closest_job(&[], reference, direction, &ruleset), None);
        }
    }
    assert_eq!(Cascade::first_job(7).resolve(&[], Some(2010), &ruleset), None);
    assert_eq!(Cascade::last_job(Some(2010)).resolve(&[], Some(2010), &ruleset), None);
}

#[test]
fn unknown_years_are_never_closest() {
    let ruleset = Ruleset::network();
    let jobs = vec![
        job(&ruleset, Some(1), "admin", None, None),
        job(&ruleset, Some(1), "faculty", Some(2008), None),
    ];
    assert_eq!(
        name_of(closest_job(&jobs, 2010, Direction::OnOrBefore, &ruleset)),
        Some("faculty".to_string())
    );

    let undated = vec![job(&ruleset, Some(1), "staff", None, None)];
    let resolution = Cascade::closest(Direction::OnOrAfter)
        .resolve(&undated, Some(2010), &ruleset)
        .expect("undated job still counts overall");
    assert_eq!(resolution.category.as_str(), "staff");
    assert_eq!(resolution.step, 1);
}

#[test]
fn first_job_prefers_the_award_institution_then_widens() {
    let ruleset = Ruleset::network();
    let cascade = Cascade::first_job(7);

    let at_institution = vec![
        job(&ruleset, Some(7), "staff", Some(2003), None),
        job(&ruleset, Some(9), "faculty", Some(2009), None),
    ];
    let resolution = cascade
        .resolve(&at_institution, Some(2010), &ruleset)
        .expect("step 0");
    assert_eq!((resolution.category.as_str(), resolution.year, resolution.step), ("staff", Some(2003), 0));

    let later_at_institution = vec![
        job(&ruleset, Some(7), "chair", Some(2012), None),
        job(&ruleset, Some(9), "faculty", Some(2008), None),
    ];
    let resolution = cascade
        .resolve(&later_at_institution, Some(2010), &ruleset)
        .expect("step 1");
    assert_eq!((resolution.category.as_str(), resolution.year, resolution.step), ("chair", Some(2012), 1));

    let elsewhere = vec![
        job(&ruleset, Some(9), "faculty", Some(2008), None),
        job(&ruleset, Some(9), "chair", Some(2012), None),
    ];
    let resolution = cascade
        .resolve(&elsewhere, Some(2010), &ruleset)
        .expect("step 2");
    assert_eq!((resolution.category.as_str(), resolution.year, resolution.step), ("faculty", Some(2008), 2));

    let only_later_elsewhere = vec![job(&ruleset, None, "faculty", Some(2015), None)];
    let resolution = cascade
        .resolve(&only_later_elsewhere, Some(2010), &ruleset)
        .expect("step 3");
    assert_eq!((resolution.category.as_str(), resolution.year, resolution.step), ("faculty", None, 3));
}

#[test]
fn highest_job_prefers_award_institutions_after_entry() {
    let ruleset = Ruleset::network();
    let cascade = Cascade::highest_job(BTreeSet::from([7]));

    let jobs = vec![
        job(&ruleset, Some(7), "faculty", Some(2011), None),
        job(&ruleset, Some(9), "admin", Some(2012), None),
        job(&ruleset, Some(7), "director", Some(2001), None),
    ];
    let resolution = cascade.resolve(&jobs, Some(2010), &ruleset).expect("step 0");
    assert_eq!((resolution.category.as_str(), resolution.step), ("faculty", 0));

    let elsewhere = vec![
        job(&ruleset, Some(9), "staff", Some(2012), None),
        job(&ruleset, Some(9), "faculty", Some(2014), None),
    ];
    let resolution = cascade.resolve(&elsewhere, Some(2010), &ruleset).expect("step 1");
    assert_eq!((resolution.category.as_str(), resolution.step), ("staff", 1));

    let before_entry = vec![job(&ruleset, Some(7), "chair", Some(2001), None)];
    let resolution = cascade.resolve(&before_entry, Some(2010), &ruleset).expect("step 2");
    assert_eq!((resolution.category.as_str(), resolution.step), ("chair", 2));

    let resolution = cascade.resolve(&jobs, None, &ruleset).expect("unknown entry year");
    assert_eq!((resolution.category.as_str(), resolution.step), ("admin", 2));
}

#[test]
fn last_job_honours_the_cutoff_when_possible() {
    let ruleset = Ruleset::network();
    let jobs = vec![
        job(&ruleset, Some(1), "admin", Some(2005), Some(2009)),
        job(&ruleset, Some(2), "faculty", Some(2015), None),
    ];

    let resolution = Cascade::last_job(None)
        .resolve(&jobs, None, &ruleset)
        .expect("latest");
    assert_eq!((resolution.category.as_str(), resolution.step), ("faculty", 0));

    let resolution = Cascade::last_job(Some(2010))
        .resolve(&jobs, Some(2010), &ruleset)
        .expect("before cutoff");
    assert_eq!((resolution.category.as_str(), resolution.step), ("admin", 0));

    let resolution = Cascade::last_job(Some(2000))
        .resolve(&jobs, Some(2000), &ruleset)
        .expect("cutoff dropped");
    assert_eq!((resolution.category.as_str(), resolution.step), ("faculty", 1));
}

#[test]
fn equal_rank_ties_follow_end_year_order() {
    let config: RulesetConfig = serde_json::from_value(serde_json::json!({
        "name": "flat",
        "precedence": [
            {"category": "alpha", "rank": 1},
            {"category": "beta", "rank": 1}
        ]
    }))
    .expect("ruleset json");
    let ruleset = Ruleset::from_config(config).expect("flat ruleset");

    let jobs = vec![
        job(&ruleset, Some(1), "alpha", Some(2010), None),
        job(&ruleset, Some(1), "beta", Some(2010), Some(2014)),
        job(&ruleset, Some(1), "alpha", Some(2010), Some(2016)),
    ];
    let resolution = Cascade::last_job(None)
        .resolve(&jobs, None, &ruleset)
        .expect("latest year");
    assert_eq!(resolution.category.as_str(), "beta");
}

#[test]
fn extreme_reference_years_compare_without_overflow() {
    let ruleset = Ruleset::network();
    let jobs = vec![job(&ruleset, Some(1), "faculty", Some(2005), None)];

    assert!(!Direction::OnOrBefore.admits(Some(2005), Some(i32::MIN)));
    assert!(Direction::OnOrAfter.admits(Some(2005), Some(i32::MIN)));
    assert!(Direction::OnOrBefore.admits(Some(2005), Some(i32::MAX)));
    assert!(!Direction::OnOrAfter.admits(Some(2005), Some(i32::MAX)));

    for direction in [Direction::OnOrBefore, Direction::OnOrAfter] {
        for reference in [i32::MIN, i32::MAX] {
            assert_eq!(
                name_of(closest_job(&jobs, reference, direction, &ruleset)),
                Some("faculty".to_string())
            );
        }
    }

    let resolution = Cascade::last_job(Some(i32::MIN))
        .resolve(&jobs, Some(i32::MIN), &ruleset)
        .expect("cutoff before every job is dropped");
    assert_eq!((resolution.category.as_str(), resolution.step), ("faculty", 1));
}

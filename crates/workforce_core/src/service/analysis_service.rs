//! One batch analysis run.
//!
//! # Responsibility
//! - Run the anomaly pass, normalize the corrected jobs and aggregate
//!   per-person timelines, in that order.
//!
//! # Invariants
//! - The loaded `Dataset` is read only; every stage yields a new collection.
//! - The ruleset is validated before any job is touched.

use crate::anomaly::report::AnomalyReport;
use crate::anomaly::reporter::AnomalyReporter;
use crate::config::{AnalysisConfig, ConfigResult, RulesetChoice};
use crate::repo::dataset::Dataset;
use crate::repo::workforce_repo::InMemoryWorkforceRepository;
use crate::rules::normalize::normalize_jobs;
use crate::rules::ruleset::{Ruleset, RULESET_LEADERSHIP};
use crate::service::timeline_service::{TimelineService, TimelineTable};
use log::info;
use std::time::Instant;

/// Everything a run produces. `repo` holds the normalized jobs so figure
/// datasets can be built from the same state as the timeline table.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub ruleset: Ruleset,
    pub repo: InMemoryWorkforceRepository,
    pub timeline: TimelineTable,
    pub report: AnomalyReport,
    pub excluded_jobs: usize,
    pub newly_non_uni: usize,
}

/// Runs anomaly sweep, normalization and aggregation over `dataset`.
///
/// # Errors
/// - `ConfigError` when the configured ruleset is invalid.
pub fn run_analysis(dataset: &Dataset, config: &AnalysisConfig) -> ConfigResult<AnalysisRun> {
    let started_at = Instant::now();
    let ruleset = config.build_ruleset()?;

    let anomalies =
        AnomalyReporter::new(config.university.clone(), config.title_fit.clone()).run(dataset);
    let normalized = normalize_jobs(&anomalies.jobs, &ruleset);
    let repo = InMemoryWorkforceRepository::from_dataset(dataset, normalized.jobs);

    let timeline =
        TimelineService::with_options(&repo, ruleset.clone(), config.timeline_options())
            .summarize_all();

    info!(
        "event=analysis_run module=service status=ok ruleset={} people={} excluded_jobs={} newly_non_uni={} duration_ms={}",
        ruleset.name(),
        timeline.len(),
        normalized.excluded,
        anomalies.newly_non_uni,
        started_at.elapsed().as_millis()
    );

    Ok(AnalysisRun {
        ruleset,
        repo,
        timeline,
        report: anomalies.report,
        excluded_jobs: normalized.excluded,
        newly_non_uni: anomalies.newly_non_uni,
    })
}

/// Runs the analysis again under the leadership ruleset.
///
/// Mobility figures always count positions as admin, chair/director and
/// faculty, whatever ruleset the main run used. Every other setting of
/// `config` is kept.
///
/// # Errors
/// - `ConfigError` when the rest of `config` is invalid.
pub fn leadership_run(dataset: &Dataset, config: &AnalysisConfig) -> ConfigResult<AnalysisRun> {
    let mut config = config.clone();
    config.ruleset = RulesetChoice::Builtin(RULESET_LEADERSHIP.to_string());
    run_analysis(dataset, &config)
}

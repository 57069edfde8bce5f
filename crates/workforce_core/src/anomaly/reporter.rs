//! Anomaly pass orchestration.

use crate::anomaly::chronology::chronology_sweep;
use crate::anomaly::consistency::consistency_sweep;
use crate::anomaly::report::AnomalyReport;
use crate::anomaly::title_fit::{term_frequency_summary, title_fit_sweep, TitleFitConfig};
use crate::anomaly::university::UniversityRules;
use crate::model::record::Job;
use crate::repo::dataset::Dataset;
use log::info;

/// Output of one anomaly pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyOutcome {
    pub report: AnomalyReport,
    /// Source jobs after the `non-uni` correction.
    pub jobs: Vec<Job>,
    pub newly_non_uni: usize,
}

/// Runs the consistency, chronology and title-fit sweeps in that order.
///
/// The chronology and title-fit sweeps see the corrected jobs.
#[derive(Debug, Clone, Default)]
pub struct AnomalyReporter {
    university: UniversityRules,
    title_fit: TitleFitConfig,
}

impl AnomalyReporter {
    pub fn new(university: UniversityRules, title_fit: TitleFitConfig) -> Self {
        Self {
            university,
            title_fit,
        }
    }

    pub fn run(&self, dataset: &Dataset) -> AnomalyOutcome {
        let consistency = consistency_sweep(
            &dataset.jobs,
            &dataset.organizations,
            &self.university,
        );
        let newly_non_uni = consistency.newly_non_uni();
        let jobs = consistency.jobs;

        let mut report = AnomalyReport::default();
        report.sections.push(consistency.section);
        report
            .sections
            .push(chronology_sweep(&jobs, &dataset.awards));
        report
            .sections
            .extend(title_fit_sweep(&jobs, &self.title_fit));

        let categories = self
            .title_fit
            .categories
            .iter()
            .map(|keys| keys.category.clone())
            .collect::<Vec<_>>();
        report.sections.push(term_frequency_summary(
            &jobs,
            &categories,
            self.title_fit.top_terms,
        ));

        info!(
            "event=anomaly_report module=anomaly status=ok sections={} lines={}",
            report.sections.len(),
            report.line_count()
        );

        AnomalyOutcome {
            report,
            jobs,
            newly_non_uni,
        }
    }
}

//! Core job-title resolution rules for workforce analyses.
//! This crate is the single source of truth for the resolution invariants.

pub mod anomaly;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod resolve;
pub mod rules;
pub mod service;

pub use anomaly::report::{AnomalyReport, ReportSection};
pub use anomaly::reporter::{AnomalyOutcome, AnomalyReporter};
pub use anomaly::university::UniversityRules;
pub use config::{AnalysisConfig, ConfigError, ConfigResult, RulesetChoice};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::Category;
pub use model::record::{
    Award, AwardId, AwardRole, Demographic, Job, MobilityEdge, OrgAwardType, OrgId,
    Organization, PersonId, RankedJob,
};
pub use repo::dataset::{Dataset, DatasetError, DatasetResult};
pub use repo::workforce_repo::{InMemoryWorkforceRepository, WorkforceRepository};
pub use resolve::cascade::{closest_job, Cascade, Resolution};
pub use resolve::strategy::{Direction, EmployerFilter, Pick, Strategy};
pub use rules::normalize::{normalize_jobs, Normalized, NormalizedJobs};
pub use rules::ruleset::{Ruleset, RulesetConfig, RulesetError};
pub use service::analysis_service::{leadership_run, run_analysis, AnalysisRun};
pub use service::timeline_service::{PersonTimeline, TimelineOptions, TimelineService, TimelineTable};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

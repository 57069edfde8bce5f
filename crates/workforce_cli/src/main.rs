//! Batch entry point for workforce analyses.
//!
//! # Responsibility
//! - Load a dataset and an optional config, run one analysis, and write the
//!   timeline table, the anomaly report and optional figure datasets.
//! - Keep stdout reserved for data; diagnostics go to the log files.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use workforce_core::service::composition_service::network_composition;
use workforce_core::service::mobility_service::{
    institution_changes, it_site_moves, tally_by_position_and_gender, CountLevel,
};
use workforce_core::rules::ruleset::RULESET_LEADERSHIP;
use workforce_core::{
    default_log_level, init_logging, leadership_run, run_analysis, AnalysisConfig, AnalysisRun,
    Dataset, RulesetChoice,
};

/// Resolve per-person job titles from employment and award tables
#[derive(Parser, Debug)]
#[clap(name = "workforce")]
#[clap(version, about = "Resolve per-person job titles from employment and award tables")]
struct Args {
    /// Dataset JSON with jobs, awards, organizations and demographics
    #[clap(long, value_name = "FILE")]
    dataset: PathBuf,

    /// Analysis config JSON (ruleset, cutoffs, keyword lists)
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Built-in ruleset; overrides the config's ruleset
    #[clap(long, value_name = "NAME")]
    ruleset: Option<String>,

    /// Timeline table output; stdout when omitted
    #[clap(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Anomaly report output
    #[clap(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Figure dataset to build alongside the timeline table; the mobility
    /// figure always ranks jobs with the leadership ruleset
    #[clap(long, value_enum)]
    figure: Option<Figure>,

    /// Counting unit for the mobility figure
    #[clap(long, value_enum, default_value = "person")]
    level: Level,

    /// Figure dataset output; stdout when omitted
    #[clap(long, value_name = "FILE")]
    figure_output: Option<PathBuf>,

    /// Directory for rolling log files
    #[clap(long, value_name = "DIR", env = "WORKFORCE_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,

    /// trace|debug|info|warn|error
    #[clap(long, value_name = "LEVEL", env = "WORKFORCE_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Figure {
    Network,
    Mobility,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Level {
    Person,
    Role,
}

impl From<Level> for CountLevel {
    fn from(value: Level) -> Self {
        match value {
            Level::Person => CountLevel::Person,
            Level::Role => CountLevel::Role,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = args
        .log_level
        .as_deref()
        .unwrap_or(default_log_level());
    if let Err(message) = init_logging(level, &args.log_dir) {
        bail!("logging init failed: {message}");
    }

    let dataset = Dataset::load_json(&args.dataset)
        .with_context(|| format!("loading dataset {}", args.dataset.display()))?;
    let config = load_config(&args)?;

    let run = run_analysis(&dataset, &config).context("running analysis")?;

    let table = serde_json::to_string_pretty(&run.timeline).context("encoding timeline table")?;
    write_or_print(args.output.as_deref(), &table)?;

    if let Some(path) = &args.report {
        std::fs::write(path, run.report.to_string())
            .with_context(|| format!("writing report {}", path.display()))?;
    }

    if let Some(figure) = args.figure {
        let value = figure_dataset(figure, args.level.into(), &run, &dataset, &config)?;
        let text = serde_json::to_string_pretty(&value).context("encoding figure dataset")?;
        write_or_print(args.figure_output.as_deref(), &text)?;
    }

    info!(
        "event=cli_done module=cli status=ok people={} report_lines={} excluded_jobs={}",
        run.timeline.len(),
        run.report.line_count(),
        run.excluded_jobs
    );
    Ok(())
}

fn load_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load_json(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(name) = &args.ruleset {
        config.ruleset = RulesetChoice::Builtin(name.clone());
        config.validate().context("applying --ruleset")?;
    }
    Ok(config)
}

fn figure_dataset(
    figure: Figure,
    level: CountLevel,
    run: &AnalysisRun,
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<Value> {
    match figure {
        Figure::Network => Ok(json!(network_composition(&run.repo, &run.ruleset))),
        Figure::Mobility => {
            let rerun;
            let leadership = if run.ruleset.name() == RULESET_LEADERSHIP {
                run
            } else {
                rerun = leadership_run(dataset, config).context("running leadership analysis")?;
                &rerun
            };
            let changes = institution_changes(&leadership.repo, &leadership.ruleset, level);
            let tally = tally_by_position_and_gender(&changes)
                .into_iter()
                .map(|((job, gender), cell)| {
                    json!({
                        "job": job,
                        "gender": gender,
                        "stayed": cell.stayed,
                        "moved": cell.moved,
                    })
                })
                .collect::<Vec<_>>();
            Ok(json!({
                "changes": changes,
                "tally": tally,
                "it_site_moves": it_site_moves(&leadership.repo),
            }))
        }
    }
}

fn write_or_print(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("writing {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

//! Flat tabular interchange for one analysis run.

use crate::model::record::{Award, Demographic, Job, MobilityEdge, Organization};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Dataset load error.
#[derive(Debug)]
pub enum DatasetError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    /// Structurally valid JSON carrying inconsistent reference data.
    Invalid(String),
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read dataset `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid dataset json: {err}"),
            Self::Invalid(message) => write!(f, "invalid dataset: {message}"),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// All source tables of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub demographics: Vec<Demographic>,
    #[serde(default)]
    pub mobility_edges: Vec<MobilityEdge>,
}

impl Dataset {
    /// Parses and validates a dataset from JSON text.
    ///
    /// # Errors
    /// - `Parse` for malformed JSON or wrongly typed columns.
    /// - `Invalid` for duplicate organization ids or duplicate demographic
    ///   rows for one person.
    pub fn from_json_str(text: &str) -> DatasetResult<Self> {
        let dataset: Self = serde_json::from_str(text)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Reads, parses and validates a dataset file.
    ///
    /// # Side effects
    /// - Emits `dataset_load` logging events with row counts and duration.
    pub fn load_json(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!("event=dataset_load module=repo status=start");

        let result = std::fs::read_to_string(path)
            .map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|text| Self::from_json_str(&text));

        match &result {
            Ok(dataset) => info!(
                "event=dataset_load module=repo status=ok duration_ms={} jobs={} awards={} organizations={} demographics={}",
                started_at.elapsed().as_millis(),
                dataset.jobs.len(),
                dataset.awards.len(),
                dataset.organizations.len(),
                dataset.demographics.len()
            ),
            Err(err) => error!(
                "event=dataset_load module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn validate(&self) -> DatasetResult<()> {
        let mut org_ids = BTreeSet::new();
        for org in &self.organizations {
            if !org_ids.insert(org.org_id) {
                return Err(DatasetError::Invalid(format!(
                    "duplicate organization id {}",
                    org.org_id
                )));
            }
        }

        let mut people = BTreeSet::new();
        for demographic in &self.demographics {
            if !people.insert(demographic.person_id) {
                return Err(DatasetError::Invalid(format!(
                    "duplicate demographic row for person {}",
                    demographic.person_id
                )));
            }
        }
        Ok(())
    }
}

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::error::ReportError;
use super::voter::{Voter, validate_voter};
use super::violation::Violation;

/// In-memory record set a report runs against
#[derive(Debug, Clone)]
pub struct Dataset<R> {
    pub name: String,
    pub records: Vec<R>,
}

/// Accepted file shapes: a bare array, or an object wrapping the array
#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile<R> {
    Bare(Vec<R>),
    Wrapped {
        #[serde(alias = "voters", alias = "data")]
        records: Vec<R>,
    },
}

impl<R> Dataset<R> {
    #[must_use]
    pub fn new(name: impl Into<String>, records: Vec<R>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: DeserializeOwned> Dataset<R> {
    /// Parse a dataset from JSON text
    pub fn from_json_str(name: impl Into<String>, json: &str) -> Result<Self, ReportError> {
        let records = match serde_json::from_str::<DatasetFile<R>>(json)? {
            DatasetFile::Bare(records) | DatasetFile::Wrapped { records } => records,
        };
        Ok(Self::new(name, records))
    }

    /// Load a dataset from a JSON file; the file stem becomes the dataset name
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map_or_else(|| "dataset".to_string(), |s| s.to_string_lossy().into_owned());
        let dataset = Self::from_json_str(name, &text)?;
        debug!(path = %path.display(), records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }
}

impl Dataset<Voter> {
    /// Run the voter validation pass over every record.
    ///
    /// Returns `(index, violations)` for each invalid voter.
    #[must_use]
    pub fn validate(&self) -> Vec<(usize, Vec<Violation>)> {
        let invalid: Vec<(usize, Vec<Violation>)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(idx, voter)| {
                let violations = validate_voter(voter);
                (!violations.is_empty()).then_some((idx, violations))
            })
            .collect();

        for (idx, violations) in &invalid {
            warn!(
                dataset = %self.name,
                index = idx,
                problems = violations.len(),
                "invalid voter: {}",
                violations[0]
            );
        }
        invalid
    }
}

//! Configuration types for ingestion

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::delimiter::{DEFAULT_CANDIDATES, DEFAULT_SAMPLE_ROWS, Delimiter};
use crate::inference::InferenceConfig;

/// Configuration for a folder import
///
/// Every run receives its configuration explicitly; nothing falls back to
/// process-wide defaults for the source or the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestConfig {
    /// Folder holding the delimited files
    pub source: PathBuf,
    /// Extension filter without the leading dot (case-sensitive)
    pub filter: Option<String>,
    /// Database file to (re)create
    pub destination: PathBuf,
    /// Maximum number of rows sampled for delimiter detection
    pub delimiter_sample_rows: usize,
    /// Candidate delimiters in priority order
    pub candidates: Vec<Delimiter>,
    /// Column type inference settings
    pub inference: InferenceConfig,
}

impl IngestConfig {
    /// Create a new builder for IngestConfig
    pub fn builder() -> IngestConfigBuilder {
        IngestConfigBuilder::default()
    }
}

/// Builder for IngestConfig
#[derive(Debug, Default)]
pub struct IngestConfigBuilder {
    source: Option<PathBuf>,
    filter: Option<String>,
    destination: Option<PathBuf>,
    delimiter_sample_rows: Option<usize>,
    candidates: Option<Vec<Delimiter>>,
    inference: Option<InferenceConfig>,
}

impl IngestConfigBuilder {
    /// Set the source folder
    pub fn source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the extension filter (without the leading dot)
    pub fn filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    /// Set the destination database file
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Set the delimiter detection sample size
    pub fn delimiter_sample_rows(mut self, rows: usize) -> Self {
        self.delimiter_sample_rows = Some(rows);
        self
    }

    /// Set the candidate delimiters, in priority order
    pub fn candidates(mut self, candidates: Vec<Delimiter>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Set the inference configuration
    pub fn inference(mut self, inference: InferenceConfig) -> Self {
        self.inference = Some(inference);
        self
    }

    /// Build the IngestConfig
    pub fn build(self) -> Result<IngestConfig, String> {
        let source = self.source.ok_or("Source is required")?;
        let destination = self.destination.ok_or("Destination is required")?;

        if let Some(filter) = &self.filter {
            if filter.is_empty() {
                return Err("Filter cannot be empty".to_string());
            }
            if filter.starts_with('.') {
                return Err(format!(
                    "Filter must not start with a dot: {filter} (use '{}')",
                    filter.trim_start_matches('.')
                ));
            }
        }

        let delimiter_sample_rows = self.delimiter_sample_rows.unwrap_or(DEFAULT_SAMPLE_ROWS);
        if delimiter_sample_rows == 0 {
            return Err("Delimiter sample size must be at least 1".to_string());
        }

        let candidates = self
            .candidates
            .unwrap_or_else(|| DEFAULT_CANDIDATES.to_vec());
        if candidates.is_empty() {
            return Err("At least one candidate delimiter is required".to_string());
        }

        Ok(IngestConfig {
            source,
            filter: self.filter,
            destination,
            delimiter_sample_rows,
            candidates,
            inference: self.inference.unwrap_or_default(),
        })
    }
}

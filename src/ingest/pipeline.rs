//! Ingestion orchestrator
//!
//! Runs each file through detection, parsing, naming, inference, and
//! materialization, and records exactly one outcome per file. A failing file
//! never stops the batch.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use super::config::IngestConfig;
use super::db::Destination;
use super::delimiter::{DEFAULT_CANDIDATES, DEFAULT_SAMPLE_ROWS, Delimiter, detect_delimiter_with};
use super::error::{FailureKind, IngestError};
use super::materialize::materialize;
use super::source::{ParsedTable, RawFile};
use crate::inference::{InferenceConfig, SchemaInferrer};
use crate::validation::normalize_table_name;

/// Result of ingesting one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    /// Source file name
    pub file: String,
    pub result: OutcomeResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OutcomeResult {
    #[serde(rename_all = "camelCase")]
    Success { table_name: String, rows: usize },
    Failure { kind: FailureKind, message: String },
}

impl IngestOutcome {
    pub fn success(file: impl Into<String>, table_name: impl Into<String>, rows: usize) -> Self {
        Self {
            file: file.into(),
            result: OutcomeResult::Success {
                table_name: table_name.into(),
                rows,
            },
        }
    }

    /// Record a failed file, keeping the classified kind and the message
    pub fn failure(file: impl Into<String>, error: &IngestError) -> Self {
        Self {
            file: file.into(),
            result: OutcomeResult::Failure {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.result, OutcomeResult::Success { .. })
    }

    /// Table created for this file, if any
    pub fn table_name(&self) -> Option<&str> {
        match &self.result {
            OutcomeResult::Success { table_name, .. } => Some(table_name),
            OutcomeResult::Failure { .. } => None,
        }
    }

    /// Failure classification, if the file failed
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.result {
            OutcomeResult::Success { .. } => None,
            OutcomeResult::Failure { kind, .. } => Some(*kind),
        }
    }

    /// One console line describing this outcome
    pub fn status_line(&self) -> String {
        match &self.result {
            OutcomeResult::Success { table_name, .. } => {
                format!("table {} created from {}", table_name, self.file)
            }
            OutcomeResult::Failure { kind, message } => {
                format!("conversion of {} errored with {}: -> {}", self.file, kind, message)
            }
        }
    }
}

/// Outcomes of one run, in input order
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub outcomes: Vec<IngestOutcome>,
    pub duration: Duration,
}

impl IngestReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| !o.is_success())
    }

    /// Total rows inserted across successful files
    pub fn total_rows(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.result {
                OutcomeResult::Success { rows, .. } => rows,
                OutcomeResult::Failure { .. } => 0,
            })
            .sum()
    }

    /// Get a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} file(s): {} table(s) created, {} failed, {} row(s) in {:.2}s",
            self.outcomes.len(),
            self.succeeded(),
            self.failed(),
            self.total_rows(),
            self.duration.as_secs_f64()
        )
    }
}

/// Runs files through the ingestion stages
pub struct Ingestor {
    inferrer: SchemaInferrer,
    delimiter_sample_rows: usize,
    candidates: Vec<Delimiter>,
}

impl Ingestor {
    /// Create an ingestor with default detection and inference settings
    pub fn new() -> Self {
        Self {
            inferrer: SchemaInferrer::new(),
            delimiter_sample_rows: DEFAULT_SAMPLE_ROWS,
            candidates: DEFAULT_CANDIDATES.to_vec(),
        }
    }

    /// Create an ingestor from a folder import configuration
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            inferrer: SchemaInferrer::with_config(config.inference.clone()),
            delimiter_sample_rows: config.delimiter_sample_rows,
            candidates: config.candidates.clone(),
        }
    }

    /// Replace the inference settings
    pub fn with_inference(mut self, config: InferenceConfig) -> Self {
        self.inferrer = SchemaInferrer::with_config(config);
        self
    }

    /// Replace the inferrer, e.g. one carrying a custom strategy
    pub fn with_inferrer(mut self, inferrer: SchemaInferrer) -> Self {
        self.inferrer = inferrer;
        self
    }

    /// Ingest every file into `destination`, in order
    ///
    /// Returns one outcome per file. Only an empty file list fails the run.
    pub fn run<D: Destination + ?Sized>(
        &self,
        destination: &mut D,
        files: &[RawFile],
    ) -> Result<IngestReport, IngestError> {
        if files.is_empty() {
            return Err(IngestError::NoFilesFound {
                folder: Default::default(),
                filter: None,
            });
        }

        let _span = info_span!("ingest_run", files = files.len()).entered();
        let start = Instant::now();

        let outcomes = files
            .iter()
            .map(|file| self.ingest_file(destination, file))
            .collect();

        let report = IngestReport {
            outcomes,
            duration: start.elapsed(),
        };
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            duration_ms = report.duration.as_millis() as u64,
            "Ingestion finished"
        );
        Ok(report)
    }

    /// Ingest a single file, converting any failure into its outcome
    pub fn ingest_file<D: Destination + ?Sized>(
        &self,
        destination: &mut D,
        file: &RawFile,
    ) -> IngestOutcome {
        let _span = info_span!("ingest_file", file = %file.name).entered();

        match self.try_ingest(destination, file) {
            Ok((table_name, rows)) => {
                info!(table = %table_name, rows, "Table created");
                IngestOutcome::success(&file.name, table_name, rows)
            }
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "File skipped");
                IngestOutcome::failure(&file.name, &e)
            }
        }
    }

    fn try_ingest<D: Destination + ?Sized>(
        &self,
        destination: &mut D,
        file: &RawFile,
    ) -> Result<(String, usize), IngestError> {
        let delimiter =
            detect_delimiter_with(&file.lines, self.delimiter_sample_rows, &self.candidates)?;
        debug!(delimiter = ?delimiter, "Delimiter detected");

        let parsed = ParsedTable::parse(&file.lines, delimiter);
        parsed.check_header()?;

        let table_name = normalize_table_name(&file.name);
        let column_types = self.inferrer.infer(&parsed.header, &parsed.rows);

        let rows = materialize(
            destination,
            &table_name,
            &parsed.header,
            column_types,
            &parsed.rows,
        )?;
        Ok((table_name, rows))
    }

    /// Import every matching file of a folder into a fresh database
    ///
    /// Files are discovered before the destination is touched, so a folder
    /// without matches leaves any existing database in place.
    #[cfg(feature = "duckdb-backend")]
    pub fn import_folder(config: &IngestConfig) -> Result<IngestReport, IngestError> {
        use super::db::TargetDb;
        use super::source::{discover_files, file_name};

        let _span = info_span!(
            "import_folder",
            source = %config.source.display(),
            destination = %config.destination.display()
        )
        .entered();
        let start = Instant::now();

        let paths = discover_files(&config.source, config.filter.as_deref())?;
        info!(files = paths.len(), "Discovered files");

        let mut db = TargetDb::create_fresh(&config.destination)?;
        let ingestor = Self::from_config(config);

        let mut outcomes = Vec::with_capacity(paths.len());
        for path in &paths {
            let outcome = match RawFile::read(path) {
                Ok(raw) => ingestor.ingest_file(&mut db, &raw),
                Err(e) => {
                    let file = file_name(path);
                    warn!(file = %file, error = %e, "Could not read file");
                    IngestOutcome::failure(file, &e)
                }
            };
            outcomes.push(outcome);
        }

        Ok(IngestReport {
            outcomes,
            duration: start.elapsed(),
        })
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}

//! Error types for ingestion

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inference::ColumnType;
use crate::validation::ValidationError;

/// Errors that can occur while ingesting files
#[derive(Error, Debug)]
pub enum IngestError {
    /// No candidate files in the source folder (fatal to the run)
    #[error("No files found{}", describe_source(folder, filter.as_deref()))]
    NoFilesFound {
        folder: PathBuf,
        filter: Option<String>,
    },

    /// No candidate delimiter splits the sampled rows consistently
    #[error("Could not identify the delimiter")]
    NoDelimiterFound,

    /// The header names the same column twice
    #[error("Duplicate column name in header: {column}")]
    DuplicateColumn { column: String },

    /// A table or column name failed validation
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] ValidationError),

    /// A data row does not have one field per header column
    #[error("Row {row} has {found} field(s), expected {expected}")]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A value does not fit the inferred column type
    #[error("Row {row}: value '{value}' in column '{column}' is not a valid {column_type}")]
    ValueConversion {
        row: usize,
        column: String,
        value: String,
        column_type: ColumnType,
    },

    /// Database rejected a statement
    #[error("Database error: {0}")]
    Database(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pattern matching error
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Classification of a file-scoped failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// No delimiter could be detected
    NoDelimiterFound,
    /// Header rejected before any SQL was issued
    InvalidSchema,
    /// Table creation or a row insertion failed; the file was rolled back
    SchemaOrInsert,
    /// The file could not be read as text
    Unreadable,
}

impl FailureKind {
    pub fn name(&self) -> &'static str {
        match self {
            FailureKind::NoDelimiterFound => "NoDelimiterFound",
            FailureKind::InvalidSchema => "InvalidSchema",
            FailureKind::SchemaOrInsert => "SchemaOrInsertError",
            FailureKind::Unreadable => "Unreadable",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl IngestError {
    /// Classify this error as a per-file failure
    ///
    /// Batch-level errors (`NoFilesFound`, configuration and pattern errors)
    /// never reach a per-file outcome; they classify as `SchemaOrInsert` only
    /// so the mapping is total.
    pub fn kind(&self) -> FailureKind {
        match self {
            IngestError::NoDelimiterFound => FailureKind::NoDelimiterFound,
            IngestError::DuplicateColumn { .. } | IngestError::InvalidIdentifier(_) => {
                FailureKind::InvalidSchema
            }
            IngestError::Io(_) => FailureKind::Unreadable,
            IngestError::RowArity { .. }
            | IngestError::ValueConversion { .. }
            | IngestError::Database(_)
            | IngestError::NoFilesFound { .. }
            | IngestError::InvalidPattern(_)
            | IngestError::InvalidConfig(_) => FailureKind::SchemaOrInsert,
        }
    }

    /// Whether this error aborts the whole run
    pub fn is_batch_fatal(&self) -> bool {
        matches!(
            self,
            IngestError::NoFilesFound { .. }
                | IngestError::InvalidPattern(_)
                | IngestError::InvalidConfig(_)
        )
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            IngestError::NoFilesFound { folder, filter } => match filter {
                Some(ext) => format!(
                    "No files with ending .{ext} in {}\n\nHint: Check the folder path and the --filter extension (case-sensitive, without the dot).",
                    folder.display()
                ),
                None => format!(
                    "No files in {}\n\nHint: Check that the source folder exists and contains files.",
                    folder.display()
                ),
            },
            IngestError::NoDelimiterFound => {
                "Could not identify the delimiter.\n\n\
                Hint: Rows must split into the same number (>1) of fields on one of ',', ';', tab or '|'."
                    .to_string()
            }
            IngestError::DuplicateColumn { column } => {
                format!(
                    "Duplicate column name in header: {column}\n\nHint: Column names are compared case-insensitively."
                )
            }
            IngestError::InvalidPattern(pattern) => {
                format!("Invalid glob pattern: {pattern}\n\nHint: Check the source folder path.")
            }
            _ => self.to_string(),
        }
    }
}

fn describe_source(folder: &Path, filter: Option<&str>) -> String {
    let mut out = String::new();
    if !folder.as_os_str().is_empty() {
        out.push_str(&format!(" in {}", folder.display()));
    }
    if let Some(ext) = filter {
        out.push_str(&format!(" with ending .{ext}"));
    }
    out
}

#[cfg(feature = "duckdb-backend")]
impl From<duckdb::Error> for IngestError {
    fn from(err: duckdb::Error) -> Self {
        IngestError::Database(err.to_string())
    }
}

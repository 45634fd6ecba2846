//! Source files: discovery, reading, and splitting into rows

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::delimiter::Delimiter;
use super::error::IngestError;
use crate::inference::Row;
use crate::validation::validate_column_name;

/// A delimited text file as handed to the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// Base name of the file, extension included
    pub name: String,
    /// Lines of the file without a trailing empty line
    pub lines: Vec<String>,
}

impl RawFile {
    /// Create a raw file from pre-split lines
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    /// Split text into lines
    ///
    /// Lines end at `\n` (a preceding `\r` is dropped). A final line
    /// terminator does not produce an extra empty line. A leading UTF-8
    /// byte-order mark is dropped.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self::new(name, text.lines().map(str::to_string).collect())
    }

    /// Read a file from disk
    pub fn read(path: &Path) -> Result<Self, IngestError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(file_name(path), &text))
    }
}

/// Base name of a path for reporting and table naming
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Header plus data rows of one file, split on its delimiter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    /// Column names from the first line
    pub header: Vec<String>,
    /// Data rows; empty fields are `None`
    pub rows: Vec<Row>,
}

impl ParsedTable {
    /// Split lines into a header and null-normalized data rows
    ///
    /// Rows are kept as split, even when their field count differs from the
    /// header; arity is enforced when the table is materialized.
    pub fn parse<S: AsRef<str>>(lines: &[S], delimiter: Delimiter) -> Self {
        let mut iter = lines.iter();

        let header = iter
            .next()
            .map(|line| delimiter.split(line.as_ref()).map(str::to_string).collect())
            .unwrap_or_default();

        let rows = iter
            .map(|line| {
                delimiter
                    .split(line.as_ref())
                    .map(|field| {
                        if field.is_empty() {
                            None
                        } else {
                            Some(field.to_string())
                        }
                    })
                    .collect()
            })
            .collect();

        Self { header, rows }
    }

    /// Validate column names and reject duplicates
    ///
    /// Names are compared case-insensitively because the destination folds
    /// identifier case.
    pub fn check_header(&self) -> Result<(), IngestError> {
        let mut seen = HashSet::with_capacity(self.header.len());
        for name in &self.header {
            validate_column_name(name)?;
            if !seen.insert(name.to_lowercase()) {
                return Err(IngestError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Find candidate files directly inside `folder`
///
/// With a filter only files ending in `.<filter>` (case-sensitive) are kept.
/// Directories and hidden files are skipped and the result is sorted by
/// path. An empty result is reported as [`IngestError::NoFilesFound`].
pub fn discover_files(folder: &Path, filter: Option<&str>) -> Result<Vec<PathBuf>, IngestError> {
    let base = glob::Pattern::escape(&folder.display().to_string());
    let pattern = match filter {
        Some(ext) => format!("{}/*.{}", base, glob::Pattern::escape(ext)),
        None => format!("{}/*", base),
    };

    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
    let entries = glob::glob_with(&pattern, options)
        .map_err(|e| IngestError::InvalidPattern(format!("{}: {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => {
                // Log but continue
                tracing::warn!("Error accessing path: {}", e);
            }
        }
    }

    if files.is_empty() {
        return Err(IngestError::NoFilesFound {
            folder: folder.to_path_buf(),
            filter: filter.map(str::to_string),
        });
    }

    files.sort();
    Ok(files)
}

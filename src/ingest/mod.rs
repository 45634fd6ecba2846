//! Ingestion of delimited text files into database tables
//!
//! Every file becomes one table:
//!
//! 1. The delimiter is detected from the leading rows ([`detect_delimiter`])
//! 2. Lines are split into a header and null-normalized rows ([`ParsedTable`])
//! 3. The table name is derived from the file name
//! 4. Column types are inferred ([`crate::inference`])
//! 5. The table is created and filled in one transaction ([`materialize`])
//!
//! [`Ingestor`] drives these stages and records one [`IngestOutcome`] per
//! file. A failing file never aborts the batch.
//!
//! ## Example
//!
//! Folder import needs the `duckdb-backend` feature:
//!
//! ```rust,no_run
//! # #[cfg(feature = "duckdb-backend")]
//! # fn main() {
//! use files_to_tables::ingest::{IngestConfig, Ingestor};
//!
//! let config = IngestConfig::builder()
//!     .source("./data")
//!     .filter("csv")
//!     .destination("tables.duckdb")
//!     .build()
//!     .unwrap();
//!
//! let report = Ingestor::import_folder(&config).unwrap();
//! for outcome in &report.outcomes {
//!     println!("{}", outcome.status_line());
//! }
//! # }
//! # #[cfg(not(feature = "duckdb-backend"))]
//! # fn main() {}
//! ```

mod config;
mod db;
mod delimiter;
mod error;
mod materialize;
mod pipeline;
mod source;

pub use config::{IngestConfig, IngestConfigBuilder};
#[cfg(feature = "duckdb-backend")]
pub use db::TargetDb;
pub use db::Destination;
pub use delimiter::{
    DEFAULT_CANDIDATES, DEFAULT_SAMPLE_ROWS, Delimiter, detect_delimiter, detect_delimiter_with,
};
pub use error::{FailureKind, IngestError};
pub use materialize::{SqlValue, TablePlan, materialize};
pub use pipeline::{IngestOutcome, IngestReport, Ingestor, OutcomeResult};
pub use source::{ParsedTable, RawFile, discover_files, file_name};

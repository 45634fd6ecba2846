//! Files to Tables - Load folders of delimited text files into a database
//!
//! Provides:
//! - Delimiter detection per file
//! - Column type inference with pluggable strategies
//! - Table name derivation and identifier validation
//! - Transactional table creation (DuckDB)
//! - Folder import with one outcome per file

pub mod inference;
pub mod ingest;
pub mod validation;

// Re-export commonly used types
pub use inference::{ColumnType, InferenceConfig, SchemaInferrer, StrategyKind, TableSchema};
#[cfg(feature = "duckdb-backend")]
pub use ingest::TargetDb;
pub use ingest::{
    Delimiter, Destination, FailureKind, IngestConfig, IngestError, IngestOutcome, IngestReport,
    Ingestor, RawFile, detect_delimiter,
};
pub use validation::{ValidationError, normalize_table_name};

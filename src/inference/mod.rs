//! Column type inference for delimited text tables
//!
//! Each column of a parsed file is assigned one storage type
//! ([`ColumnType`]) from a sample of its leading data rows.
//!
//! ## Recognizers
//!
//! Values are recognized in a fixed precedence:
//!
//! 1. **Integer** - no `.`, optional leading `-`, fits in 64 bits
//! 2. **Real** - contains a `.` and parses as a float
//! 3. **Date** - exactly `YYYY-MM-DD`
//! 4. **Text** - everything else
//!
//! Empty fields are nulls and never decide a column.
//!
//! ## Strategies
//!
//! How the sampled values are combined is a [`TypeStrategy`]:
//! [`FirstMatch`] (the first recognized value decides), [`MajorityVote`], or
//! [`StrictAllMatch`].
//!
//! ## Example
//!
//! ```rust
//! use files_to_tables::inference::{ColumnType, SchemaInferrer};
//!
//! let header = vec!["id".to_string(), "name".to_string()];
//! let rows = vec![vec![Some("1".to_string()), Some("Alice".to_string())]];
//!
//! let types = SchemaInferrer::new().infer(&header, &rows);
//! assert_eq!(types, Some(vec![ColumnType::Integer, ColumnType::Text]));
//! ```

mod config;
mod formats;
mod inferrer;
mod strategy;
mod types;

pub use config::{DEFAULT_SAMPLE_SIZE, InferenceConfig, InferenceConfigBuilder};
pub use formats::{
    DATE_FORMAT, classify, is_date, is_integer, is_real, parse_date, recognize,
};
pub use inferrer::{Row, SchemaInferrer, infer_column_types};
pub use strategy::{FirstMatch, MajorityVote, StrategyKind, StrictAllMatch, TypeStrategy};
pub use types::{ColumnSchema, ColumnType, TableSchema};

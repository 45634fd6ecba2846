//! Validation functionality
//!
//! Provides identifier handling for generated SQL:
//! - Table name derivation from file names
//! - Allow-list validation of table and column names
//! - Identifier quoting

pub mod input;

pub use input::{
    ValidationError, ValidationResult, normalize_table_name, quote_identifier,
    validate_column_name, validate_table_name,
};

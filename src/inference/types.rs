//! Column types and table schemas produced by inference

use serde::{Deserialize, Serialize};

/// Storage type assigned to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    /// Whole numbers
    Integer,
    /// Floating point numbers
    Real,
    /// Calendar dates (YYYY-MM-DD)
    Date,
    /// Anything else
    Text,
}

impl ColumnType {
    /// Recognizer precedence, most specific first
    pub const PRECEDENCE: [ColumnType; 4] = [
        ColumnType::Integer,
        ColumnType::Real,
        ColumnType::Date,
        ColumnType::Text,
    ];

    /// Logical SQL type name
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Date => "DATE",
            ColumnType::Text => "TEXT",
        }
    }

    /// Physical type used in generated DDL
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "BIGINT",
            ColumnType::Real => "DOUBLE",
            ColumnType::Date => "DATE",
            ColumnType::Text => "VARCHAR",
        }
    }

    /// Position in [`ColumnType::PRECEDENCE`]
    pub fn rank(&self) -> usize {
        match self {
            ColumnType::Integer => 0,
            ColumnType::Real => 1,
            ColumnType::Date => 2,
            ColumnType::Text => 3,
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Schema for one materialized table
///
/// Column order always follows the header order of the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Pair a header with its inferred types
    ///
    /// `types` of `None` means there were no data rows to sample, in which
    /// case every column falls back to [`ColumnType::Text`].
    pub fn from_header(
        table_name: impl Into<String>,
        header: &[String],
        types: Option<Vec<ColumnType>>,
    ) -> Self {
        let types = types.unwrap_or_else(|| vec![ColumnType::Text; header.len()]);
        let columns = header
            .iter()
            .zip(types.into_iter().chain(std::iter::repeat(ColumnType::Text)))
            .map(|(name, column_type)| ColumnSchema::new(name.clone(), column_type))
            .collect();

        Self {
            table_name: table_name.into(),
            columns,
        }
    }

    /// Number of columns
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }
}

//! Table materialization: DDL/DML generation and value binding

use chrono::NaiveDate;

use super::db::Destination;
use super::error::IngestError;
use crate::inference::{ColumnType, Row, TableSchema, parse_date};
use crate::validation::{quote_identifier, validate_column_name, validate_table_name};

/// A typed value ready to be bound to an insert parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Date(NaiveDate),
    Text(String),
}

impl SqlValue {
    /// Convert a raw field to the column's type
    pub fn convert(value: Option<&str>, column_type: ColumnType) -> Option<SqlValue> {
        let Some(value) = value else {
            return Some(SqlValue::Null);
        };

        match column_type {
            ColumnType::Integer => value.parse().ok().map(SqlValue::Integer),
            ColumnType::Real => value.parse().ok().map(SqlValue::Real),
            ColumnType::Date => parse_date(value).map(SqlValue::Date),
            ColumnType::Text => Some(SqlValue::Text(value.to_string())),
        }
    }
}

/// Generated statements for one table
///
/// Building a plan validates every identifier, so the SQL text only ever
/// contains allow-listed, quoted names.
#[derive(Debug, Clone)]
pub struct TablePlan {
    pub schema: TableSchema,
    pub create_sql: String,
    pub insert_sql: String,
}

impl TablePlan {
    /// Validate the schema and generate its statements
    pub fn new(schema: TableSchema) -> Result<Self, IngestError> {
        validate_table_name(&schema.table_name)?;
        for column in &schema.columns {
            validate_column_name(&column.name)?;
        }

        let table = quote_identifier(&schema.table_name);

        let column_defs: Vec<String> = schema
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_identifier(&c.name), c.column_type.sql_type()))
            .collect();
        let create_sql = format!("CREATE TABLE {} ({})", table, column_defs.join(", "));

        let column_names: Vec<String> = schema
            .columns
            .iter()
            .map(|c| quote_identifier(&c.name))
            .collect();
        let placeholders: Vec<&str> = schema
            .columns
            .iter()
            .map(|c| match c.column_type {
                ColumnType::Date => "CAST(? AS DATE)",
                _ => "?",
            })
            .collect();
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            column_names.join(", "),
            placeholders.join(", ")
        );

        Ok(Self {
            schema,
            create_sql,
            insert_sql,
        })
    }

    /// Convert one data row into bound values
    ///
    /// `row_number` is 1-based and only used for error reporting.
    pub fn bind_row(&self, row_number: usize, row: &Row) -> Result<Vec<SqlValue>, IngestError> {
        if row.len() != self.schema.arity() {
            return Err(IngestError::RowArity {
                row: row_number,
                expected: self.schema.arity(),
                found: row.len(),
            });
        }

        self.schema
            .columns
            .iter()
            .zip(row)
            .map(|(column, value)| {
                SqlValue::convert(value.as_deref(), column.column_type).ok_or_else(|| {
                    IngestError::ValueConversion {
                        row: row_number,
                        column: column.name.clone(),
                        value: value.clone().unwrap_or_default(),
                        column_type: column.column_type,
                    }
                })
            })
            .collect()
    }
}

/// Create `table_name` and insert `rows` as one unit of work
///
/// `column_types` of `None` (nothing to sample) makes every column Text.
/// Returns the number of inserted rows; on error nothing is left behind.
pub fn materialize<D: Destination + ?Sized>(
    destination: &mut D,
    table_name: &str,
    header: &[String],
    column_types: Option<Vec<ColumnType>>,
    rows: &[Row],
) -> Result<usize, IngestError> {
    let schema = TableSchema::from_header(table_name, header, column_types);
    let plan = TablePlan::new(schema)?;
    destination.materialize(&plan, rows)
}

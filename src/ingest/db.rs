//! Destination database

#[cfg(feature = "duckdb-backend")]
use std::fs;
#[cfg(feature = "duckdb-backend")]
use std::path::{Path, PathBuf};

use super::error::IngestError;
use super::materialize::TablePlan;
#[cfg(feature = "duckdb-backend")]
use super::materialize::SqlValue;
use crate::inference::Row;
#[cfg(feature = "duckdb-backend")]
use crate::inference::DATE_FORMAT;

/// A handle that can create and populate tables
///
/// Implementations must apply a plan atomically: either the table exists
/// with every row inserted, or nothing of it is visible.
pub trait Destination {
    /// Create the planned table and insert `rows` in order
    ///
    /// Returns the number of inserted rows.
    fn materialize(&mut self, plan: &TablePlan, rows: &[Row]) -> Result<usize, IngestError>;
}

/// DuckDB database receiving the ingested tables
#[cfg(feature = "duckdb-backend")]
pub struct TargetDb {
    conn: duckdb::Connection,
    path: Option<PathBuf>,
}

#[cfg(feature = "duckdb-backend")]
impl TargetDb {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        let conn = duckdb::Connection::open(path)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create a fresh database, deleting any existing file at `path`
    pub fn create_fresh(path: &Path) -> Result<Self, IngestError> {
        if path.exists() {
            tracing::info!(path = %path.display(), "Removing existing database");
            fs::remove_file(path)?;
        }
        let wal = wal_path(path);
        if wal.exists() {
            fs::remove_file(&wal)?;
        }
        Self::open(path)
    }

    /// Open an in-memory database (for testing)
    pub fn memory() -> Result<Self, IngestError> {
        let conn = duckdb::Connection::open_in_memory()?;
        Ok(Self { conn, path: None })
    }

    /// Wrap an externally opened connection
    pub fn from_connection(conn: duckdb::Connection) -> Self {
        Self { conn, path: None }
    }

    /// Get the database path (if not in-memory or external)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Borrow the underlying connection
    pub fn connection(&self) -> &duckdb::Connection {
        &self.conn
    }

    /// Release the underlying connection
    pub fn into_connection(self) -> duckdb::Connection {
        self.conn
    }

    /// Whether a table with this name exists
    pub fn table_exists(&self, table_name: &str) -> Result<bool, IngestError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = ?1",
            [table_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> Result<Vec<String>, IngestError> {
        let mut stmt = self
            .conn
            .prepare("SELECT table_name FROM information_schema.tables ORDER BY table_name")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    /// Execute a query and return results as JSON
    pub fn query(&self, sql: &str) -> Result<Vec<serde_json::Value>, IngestError> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;

        // Get column names after query execution
        let column_count = rows.as_ref().map(|r| r.column_count()).unwrap_or(0);
        let column_names: Vec<String> = (0..column_count)
            .map(|i| {
                rows.as_ref()
                    .and_then(|r| r.column_name(i).ok())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("col{}", i))
            })
            .collect();

        let mut results = Vec::new();

        while let Some(row) = rows.next()? {
            let mut obj = serde_json::Map::new();
            for (i, name) in column_names.iter().enumerate() {
                let value: duckdb::types::Value = row.get(i)?;
                obj.insert(name.clone(), value_to_json(value));
            }
            results.push(serde_json::Value::Object(obj));
        }

        Ok(results)
    }
}

#[cfg(feature = "duckdb-backend")]
impl Destination for TargetDb {
    fn materialize(&mut self, plan: &TablePlan, rows: &[Row]) -> Result<usize, IngestError> {
        // Dropping the transaction without commit rolls back the CREATE too
        let tx = self.conn.transaction()?;
        tx.execute_batch(&plan.create_sql)?;

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(&plan.insert_sql)?;
            for (idx, row) in rows.iter().enumerate() {
                let values = plan.bind_row(idx + 1, row)?;
                stmt.execute(duckdb::params_from_iter(values))?;
                inserted += 1;
            }
        }

        tx.commit()?;
        Ok(inserted)
    }
}

#[cfg(feature = "duckdb-backend")]
impl duckdb::ToSql for SqlValue {
    fn to_sql(&self) -> duckdb::Result<duckdb::types::ToSqlOutput<'_>> {
        use duckdb::types::{ToSqlOutput, Value};

        let value = match self {
            SqlValue::Null => Value::Null,
            SqlValue::Integer(i) => Value::BigInt(*i),
            SqlValue::Real(f) => Value::Double(*f),
            SqlValue::Date(d) => Value::Text(d.format(DATE_FORMAT).to_string()),
            SqlValue::Text(s) => Value::Text(s.clone()),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

#[cfg(feature = "duckdb-backend")]
fn wal_path(path: &Path) -> PathBuf {
    let mut wal = path.as_os_str().to_owned();
    wal.push(".wal");
    PathBuf::from(wal)
}

#[cfg(feature = "duckdb-backend")]
fn value_to_json(value: duckdb::types::Value) -> serde_json::Value {
    use duckdb::types::Value;

    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::TinyInt(n) => serde_json::Value::Number(n.into()),
        Value::SmallInt(n) => serde_json::Value::Number(n.into()),
        Value::Int(n) => serde_json::Value::Number(n.into()),
        Value::BigInt(n) => serde_json::Value::Number(n.into()),
        Value::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s),
        Value::Date32(days) => chrono::DateTime::from_timestamp(i64::from(days) * 86_400, 0)
            .map(|dt| serde_json::Value::String(dt.date_naive().format(DATE_FORMAT).to_string()))
            .unwrap_or(serde_json::Value::Null),
        other => serde_json::Value::String(format!("{:?}", other)),
    }
}

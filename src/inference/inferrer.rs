//! Column type inference over sampled rows

use tracing::debug;

use super::config::InferenceConfig;
use super::strategy::TypeStrategy;
use super::types::{ColumnType, TableSchema};

/// A parsed data row; `None` marks an empty field
pub type Row = Vec<Option<String>>;

/// Column type inference engine
///
/// Samples the leading data rows of a table and applies a [`TypeStrategy`]
/// to each column independently.
pub struct SchemaInferrer {
    config: InferenceConfig,
    strategy: Box<dyn TypeStrategy>,
}

impl SchemaInferrer {
    /// Create a new inferrer with default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create a new inferrer with custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        let strategy = config.strategy.strategy();
        Self { config, strategy }
    }

    /// Replace the strategy with a custom implementation
    pub fn with_strategy(mut self, strategy: Box<dyn TypeStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Name of the active strategy
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Infer one type per header column
    ///
    /// Returns `None` when there are no data rows to sample. Cells missing
    /// from short rows are treated as nulls here; arity is enforced when the
    /// table is materialized.
    pub fn infer(&self, header: &[String], rows: &[Row]) -> Option<Vec<ColumnType>> {
        let sample_len = rows.len().min(self.config.sample_size);
        if sample_len == 0 {
            return None;
        }
        let sample = &rows[..sample_len];

        let types = header
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<Option<&str>> = sample
                    .iter()
                    .map(|row| row.get(idx).and_then(|v| v.as_deref()))
                    .collect();
                let column_type = self.strategy.decide(&values);
                debug!(
                    column = %name,
                    column_type = %column_type,
                    strategy = self.strategy.name(),
                    "Inferred column type"
                );
                column_type
            })
            .collect();

        Some(types)
    }

    /// Infer and pair the result with the header
    pub fn infer_schema(&self, table_name: &str, header: &[String], rows: &[Row]) -> TableSchema {
        TableSchema::from_header(table_name, header, self.infer(header, rows))
    }
}

impl Default for SchemaInferrer {
    fn default() -> Self {
        Self::new()
    }
}

/// Infer column types with the default configuration
pub fn infer_column_types(header: &[String], rows: &[Row]) -> Option<Vec<ColumnType>> {
    SchemaInferrer::new().infer(header, rows)
}

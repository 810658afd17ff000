//! Schema comparison engine
//!
//! [`SchemaComparer`] walks two snapshots and produces an ordered list of
//! [`CompareResult`]s. The order is: table processing order, then per table
//! the kinds columns, primary key, unique keys, foreign keys, indexes, and
//! within a kind deletes/changes (left order) before adds (right order).
//! Added tables come last.
//!
//! Nothing here fails by itself. The only errors are the ones the
//! [`ScriptWriter`] returns, passed through unchanged.

pub mod equality;
pub mod matcher;
pub mod objects;
pub mod redundancy;
pub mod result;
pub mod tables;

pub use equality::Equivalent;
pub use result::{join_scripts, scripts_of, CompareResult, ResultType, SchemaObjectType};

use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::schema::{DatabaseSchema, Table};
use crate::script::{ScriptWriter, SqlScriptWriter};
use objects::{compare_objects, DiffContext, Indexes};

#[cfg(feature = "tracing")]
use crate::tracing_helpers;

/// Compares schema snapshots, rendering scripts with a [`ScriptWriter`]
///
/// # Example
///
/// ```
/// use schemaguard::compare::{ResultType, SchemaComparer};
/// use schemaguard::schema::{DatabaseSchema, Index, IndexedColumn, Table};
/// use schemaguard::script::{Dialect, SqlScriptWriter};
///
/// let before = DatabaseSchema::new("shop").with_table(Table::new("Orders"));
/// let after = DatabaseSchema::new("shop").with_table(
///     Table::new("Orders").with_index(Index::new("IX_Orders_CustomerId").column(IndexedColumn::new("CustomerId"))),
/// );
///
/// let comparer = SchemaComparer::new(SqlScriptWriter::new(Dialect::Sqlite));
/// let results = comparer.compare(&before, &after).unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].result_type, ResultType::Add);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaComparer<W> {
    writer: W,
    line_separator: String,
}

impl<W: ScriptWriter> SchemaComparer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line_separator: "\n".to_string(),
        }
    }

    /// Separator placed between the drop and add halves of a change script
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn line_separator(&self) -> &str {
        &self.line_separator
    }

    fn context(&self) -> DiffContext<'_> {
        DiffContext {
            writer: &self.writer,
            separator: &self.line_separator,
        }
    }

    /// Compute the changes that turn `left` into `right`
    pub fn compare(
        &self,
        left: &DatabaseSchema,
        right: &DatabaseSchema,
    ) -> Result<Vec<CompareResult>, CompareError> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::compare_schema_span(left, right).entered();

        let mut results = Vec::new();
        tables::compare_tables(self.context(), left.tables(), right.tables(), &mut results)?;

        log::info!(
            "compared {} with {}: {} added, {} changed, {} deleted",
            left.name(),
            right.name(),
            count(&results, ResultType::Add),
            count(&results, ResultType::Change),
            count(&results, ResultType::Delete)
        );
        Ok(results)
    }

    /// Compare every object kind of two tables sharing one identity
    pub fn compare_table(&self, left: &Table, right: &Table) -> Result<Vec<CompareResult>, CompareError> {
        let mut results = Vec::new();
        tables::compare_table_pair(self.context(), left, right, &mut results)?;
        Ok(results)
    }

    /// Compare only the indexes of two tables sharing one identity
    pub fn compare_indexes(&self, left: &Table, right: &Table) -> Result<Vec<CompareResult>, CompareError> {
        let mut results = Vec::new();
        compare_objects::<Indexes>(
            self.context(),
            left,
            right,
            left.indexes(),
            right.indexes(),
            &mut results,
        )?;
        Ok(results)
    }
}

impl SchemaComparer<SqlScriptWriter> {
    /// Comparer using the SQL writer and separator described by `config`
    pub fn from_config(config: &CompareConfig) -> Self {
        SchemaComparer::new(SqlScriptWriter::from_config(config)).with_separator(config.line_separator.clone())
    }
}

fn count(results: &[CompareResult], result_type: ResultType) -> usize {
    results.iter().filter(|r| r.result_type == result_type).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Index, IndexedColumn};
    use crate::script::Dialect;

    #[test]
    fn test_from_config_uses_separator() {
        let config = CompareConfig {
            line_separator: "\nGO\n".to_string(),
            ..CompareConfig::default()
        };
        let comparer = SchemaComparer::from_config(&config);
        assert_eq!(comparer.line_separator(), "\nGO\n");
        assert_eq!(comparer.writer().dialect(), Dialect::Postgres);
    }

    #[test]
    fn test_compare_indexes_only_looks_at_indexes() {
        let comparer = SchemaComparer::new(SqlScriptWriter::new(Dialect::Postgres));
        let left = Table::new("Orders").with_column(crate::schema::Column::new("Notes", "text"));
        let right = Table::new("Orders").with_index(Index::new("IX").column(IndexedColumn::new("Notes")));

        let results = comparer.compare_indexes(&left, &right).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].object_type, SchemaObjectType::Index);
    }
}

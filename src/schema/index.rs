//! Index metadata
//!
//! An [`Index`] is a base record (name, kind tag, uniqueness, ordered key
//! columns, optional filter) plus a dialect extension selected by
//! [`IndexOptions`]. Dialect-specific shapes are variants, not subtypes, so two
//! indexes of different shapes can never be confused for one another.

use super::{Column, Table};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Explicit sort direction of an indexed column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexedColumnOrder {
    /// Ascending order (default for most databases)
    Asc,
    /// Descending order
    Desc,
}

impl fmt::Display for IndexedColumnOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexedColumnOrder::Asc => write!(f, "ASC"),
            IndexedColumnOrder::Desc => write!(f, "DESC"),
        }
    }
}

/// A key column of an index
///
/// `order` is `None` when the snapshot did not record a direction. That is a
/// distinct value from an explicit [`IndexedColumnOrder::Asc`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedColumn {
    name: String,
    #[serde(default)]
    ordinal: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<IndexedColumnOrder>,
}

impl IndexedColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal: 0,
            order: None,
        }
    }

    #[must_use]
    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = ordinal;
        self
    }

    #[must_use]
    pub fn asc(mut self) -> Self {
        self.order = Some(IndexedColumnOrder::Asc);
        self
    }

    #[must_use]
    pub fn desc(mut self) -> Self {
        self.order = Some(IndexedColumnOrder::Desc);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn order(&self) -> Option<IndexedColumnOrder> {
        self.order
    }

    /// Name followed by the explicit direction, if any: `CustomerId`,
    /// `CustomerId ASC` or `CustomerId DESC`
    pub fn name_with_order(&self) -> String {
        match self.order {
            Some(order) => format!("{} {}", self.name, order),
            None => self.name.clone(),
        }
    }
}

/// A covering column stored with the index but not part of its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludedColumn {
    name: String,
    #[serde(default)]
    ordinal: u32,
}

impl IncludedColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal: 0,
        }
    }

    #[must_use]
    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = ordinal;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
}

/// SQL Server index extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlServerIndexOptions {
    #[serde(default)]
    included_columns: Vec<IncludedColumn>,
    /// 0 means the server default
    #[serde(default)]
    fill_factor: u32,
}

impl SqlServerIndexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn include(mut self, column: IncludedColumn) -> Self {
        self.included_columns.push(column);
        self
    }

    #[must_use]
    pub fn with_fill_factor(mut self, fill_factor: u32) -> Self {
        self.fill_factor = fill_factor;
        self
    }

    pub fn included_columns(&self) -> &[IncludedColumn] {
        &self.included_columns
    }

    pub fn fill_factor(&self) -> u32 {
        self.fill_factor
    }
}

/// Dialect-specific shape of an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dialect", rename_all = "snake_case")]
pub enum IndexOptions {
    /// No dialect extension
    #[default]
    Standard,
    SqlServer(SqlServerIndexOptions),
}

/// An index belonging to exactly one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    name: String,
    /// Implementation-defined kind tag, e.g. `CLUSTERED`, `NONCLUSTERED`, `BTREE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index_type: Option<String>,
    #[serde(default)]
    is_unique: bool,
    #[serde(default)]
    columns: Vec<IndexedColumn>,
    /// Filtered/partial index predicate, without the `WHERE` keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filter: Option<String>,
    #[serde(default)]
    options: IndexOptions,
}

impl Index {
    /// Create a non-unique index with no columns
    ///
    /// # Example
    ///
    /// ```
    /// use schemaguard::schema::{Index, IndexedColumn};
    ///
    /// let index = Index::new("IX_Orders_CustomerId")
    ///     .column(IndexedColumn::new("CustomerId").asc());
    /// assert_eq!(index.key_column_names(), vec!["CustomerId"]);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index_type: None,
            is_unique: false,
            columns: Vec::new(),
            filter: None,
            options: IndexOptions::Standard,
        }
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    #[must_use]
    pub fn with_type(mut self, index_type: impl Into<String>) -> Self {
        self.index_type = Some(index_type.into());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn column(mut self, column: IndexedColumn) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index_type(&self) -> Option<&str> {
        self.index_type.as_deref()
    }

    pub fn is_unique(&self) -> bool {
        self.is_unique
    }

    /// Key columns in stored order
    pub fn columns(&self) -> &[IndexedColumn] {
        &self.columns
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Included (covering) columns; always empty for [`IndexOptions::Standard`]
    pub fn included_columns(&self) -> &[IncludedColumn] {
        match &self.options {
            IndexOptions::Standard => &[],
            IndexOptions::SqlServer(sql_server) => sql_server.included_columns(),
        }
    }

    /// Fill factor, when the index shape records one
    pub fn fill_factor(&self) -> Option<u32> {
        match &self.options {
            IndexOptions::Standard => None,
            IndexOptions::SqlServer(sql_server) => Some(sql_server.fill_factor()),
        }
    }

    /// Key columns sorted by declared ordinal
    ///
    /// The sort is stable, so columns sharing an ordinal keep their stored order.
    pub fn ordered_columns(&self) -> Vec<&IndexedColumn> {
        let mut columns: Vec<&IndexedColumn> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.ordinal());
        columns
    }

    pub fn key_column_names(&self) -> Vec<&str> {
        self.ordered_columns().into_iter().map(IndexedColumn::name).collect()
    }

    /// Key column names followed by included column names
    pub fn all_column_names(&self) -> Vec<&str> {
        let mut names = self.key_column_names();
        names.extend(self.included_columns().iter().map(IncludedColumn::name));
        names
    }

    /// The columns of `table` covered by this index's key, in key order
    ///
    /// Key columns that do not exist in `table` are skipped.
    pub fn indexed_columns<'t>(&self, table: &'t Table) -> Vec<&'t Column> {
        self.ordered_columns()
            .into_iter()
            .filter_map(|indexed| table.find_column(indexed.name()))
            .collect()
    }

    /// Whether this index has the same column signature as the primary key
    /// or a unique key of `table` (or shares a unique key's name)
    ///
    /// The primary key comparison is order-sensitive; the unique key
    /// comparison is on column sets.
    pub fn is_unique_key_index(&self, table: &Table) -> bool {
        let column_names = self.key_column_names();

        if let Some(primary_key) = table.primary_key() {
            if primary_key
                .columns()
                .iter()
                .map(String::as_str)
                .eq(column_names.iter().copied())
            {
                return true;
            }
        }

        let mut column_set = column_names;
        column_set.sort_unstable();
        table
            .unique_keys()
            .iter()
            .any(|unique_key| unique_key.name() == self.name || unique_key.column_set() == column_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KeyConstraint;

    fn people() -> Table {
        Table::new("People")
            .with_column(Column::new("Id", "int").not_null())
            .with_column(Column::new("FirstName", "nvarchar").with_length(50))
            .with_column(Column::new("LastName", "nvarchar").with_length(50))
            .with_column(Column::new("Email", "nvarchar").with_length(256))
            .with_primary_key(KeyConstraint::new("PK_People", ["Id"]))
            .with_unique_key(KeyConstraint::new("UQ_People_Name", ["LastName", "FirstName"]))
    }

    #[test]
    fn test_name_with_order() {
        assert_eq!(IndexedColumn::new("Email").name_with_order(), "Email");
        assert_eq!(IndexedColumn::new("Email").asc().name_with_order(), "Email ASC");
        assert_eq!(IndexedColumn::new("Email").desc().name_with_order(), "Email DESC");
    }

    #[test]
    fn test_ordered_columns_sort_by_ordinal() {
        let index = Index::new("IX")
            .column(IndexedColumn::new("B").with_ordinal(2))
            .column(IndexedColumn::new("A").with_ordinal(1));
        assert_eq!(index.key_column_names(), vec!["A", "B"]);
        assert_eq!(index.columns()[0].name(), "B");
    }

    #[test]
    fn test_indexed_columns_skips_unknown_names() {
        let table = people();
        let index = Index::new("IX_People_Email")
            .column(IndexedColumn::new("Email").with_ordinal(1))
            .column(IndexedColumn::new("Missing").with_ordinal(2));
        let columns = index.indexed_columns(&table);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name(), "Email");
    }

    #[test]
    fn test_all_column_names_appends_included() {
        let index = Index::new("IX_People_Email")
            .column(IndexedColumn::new("Email"))
            .with_options(IndexOptions::SqlServer(
                SqlServerIndexOptions::new().include(IncludedColumn::new("FirstName")),
            ));
        assert_eq!(index.all_column_names(), vec!["Email", "FirstName"]);
        assert_eq!(index.fill_factor(), Some(0));
    }

    #[test]
    fn test_standard_index_has_no_extension_attributes() {
        let index = Index::new("IX").column(IndexedColumn::new("Email"));
        assert!(index.included_columns().is_empty());
        assert_eq!(index.fill_factor(), None);
    }

    #[test]
    fn test_primary_key_signature_is_unique_key_index() {
        let index = Index::new("PK_People").unique().column(IndexedColumn::new("Id"));
        assert!(index.is_unique_key_index(&people()));
    }

    #[test]
    fn test_unique_key_column_set_ignores_order() {
        let index = Index::new("IX_People_Name")
            .column(IndexedColumn::new("FirstName").with_ordinal(1))
            .column(IndexedColumn::new("LastName").with_ordinal(2));
        assert!(index.is_unique_key_index(&people()));
    }

    #[test]
    fn test_unique_key_name_match_is_unique_key_index() {
        let index = Index::new("UQ_People_Name").column(IndexedColumn::new("Email"));
        assert!(index.is_unique_key_index(&people()));
    }

    #[test]
    fn test_plain_index_is_not_unique_key_index() {
        let index = Index::new("IX_People_Email").column(IndexedColumn::new("Email"));
        assert!(!index.is_unique_key_index(&people()));
    }

    #[test]
    fn test_options_deserialize_by_dialect_tag() {
        let json = r#"{
            "name": "IX_Orders_Date",
            "columns": [{"name": "OrderDate", "ordinal": 1, "order": "DESC"}],
            "options": {"dialect": "sql_server", "fill_factor": 80,
                        "included_columns": [{"name": "Total"}]}
        }"#;
        let index: Index = serde_json::from_str(json).unwrap();
        assert_eq!(index.fill_factor(), Some(80));
        assert_eq!(index.included_columns()[0].name(), "Total");
        assert_eq!(index.columns()[0].order(), Some(IndexedColumnOrder::Desc));

        let plain: Index = serde_json::from_str(r#"{"name":"IX"}"#).unwrap();
        assert_eq!(plain.options(), &IndexOptions::Standard);
    }
}

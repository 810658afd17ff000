//! Table and schema snapshot containers

use super::{Column, ForeignKey, Index, KeyConstraint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A table in a schema snapshot
///
/// A table exclusively owns its columns, keys and indexes. They are exposed
/// as read-only slices; snapshots are built once (builder methods or serde)
/// and are not mutated by the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema_owner: Option<String>,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_key: Option<KeyConstraint>,
    #[serde(default)]
    unique_keys: Vec<KeyConstraint>,
    #[serde(default)]
    foreign_keys: Vec<ForeignKey>,
    #[serde(default)]
    indexes: Vec<Index>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_owner: None,
            columns: Vec::new(),
            primary_key: None,
            unique_keys: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.schema_owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn with_primary_key(mut self, primary_key: KeyConstraint) -> Self {
        self.primary_key = Some(primary_key);
        self
    }

    #[must_use]
    pub fn with_unique_key(mut self, unique_key: KeyConstraint) -> Self {
        self.unique_keys.push(unique_key);
        self
    }

    #[must_use]
    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema_owner(&self) -> Option<&str> {
        self.schema_owner.as_deref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn primary_key(&self) -> Option<&KeyConstraint> {
        self.primary_key.as_ref()
    }

    /// The primary key as a zero- or one-element slice
    pub fn primary_keys(&self) -> &[KeyConstraint] {
        self.primary_key.as_slice()
    }

    pub fn unique_keys(&self) -> &[KeyConstraint] {
        &self.unique_keys
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn find_index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.name() == name)
    }

    pub fn find_unique_key(&self, name: &str) -> Option<&KeyConstraint> {
        self.unique_keys.iter().find(|k| k.name() == name)
    }

    pub fn find_foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|k| k.name() == name)
    }

    /// Whether this table has the identity (`owner`, `name`)
    pub fn is_identified_by(&self, owner: Option<&str>, name: &str) -> bool {
        self.name == name && self.schema_owner.as_deref() == owner
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema_owner {
            Some(owner) => write!(f, "{}.{}", owner, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A schema snapshot: a named container of tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(default)]
    tables: Vec<Table>,
}

impl DatabaseSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            tables: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Find a table by exact (`owner`, `name`) identity
    pub fn find_table(&self, owner: Option<&str>, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.is_identified_by(owner, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_owner() {
        assert_eq!(Table::new("Orders").with_owner("dbo").to_string(), "dbo.Orders");
        assert_eq!(Table::new("Orders").to_string(), "Orders");
    }

    #[test]
    fn test_find_table_uses_owner_and_exact_name() {
        let schema = DatabaseSchema::new("shop")
            .with_table(Table::new("Orders").with_owner("dbo"))
            .with_table(Table::new("Orders").with_owner("archive"));

        assert_eq!(schema.find_table(Some("archive"), "Orders").and_then(Table::schema_owner), Some("archive"));
        assert!(schema.find_table(None, "Orders").is_none());
        assert!(schema.find_table(Some("dbo"), "orders").is_none());
    }

    #[test]
    fn test_find_child_objects_by_exact_name() {
        let table = Table::new("Orders")
            .with_column(Column::new("CustomerId", "int"))
            .with_unique_key(KeyConstraint::new("UQ_Orders_Number", ["Number"]))
            .with_foreign_key(ForeignKey::new("FK_Orders_Customers", ["CustomerId"], "Customers").references(["Id"]))
            .with_index(Index::new("IX_Orders_CustomerId"));

        assert_eq!(table.find_column("CustomerId").map(Column::name), Some("CustomerId"));
        assert_eq!(table.find_index("IX_Orders_CustomerId").map(Index::name), Some("IX_Orders_CustomerId"));
        assert_eq!(table.find_unique_key("UQ_Orders_Number").map(KeyConstraint::columns), Some(&["Number".to_string()][..]));
        assert_eq!(
            table.find_foreign_key("FK_Orders_Customers").map(ForeignKey::referenced_table),
            Some("Customers")
        );

        assert!(table.find_index("ix_orders_customerid").is_none());
        assert!(table.find_unique_key("IX_Orders_CustomerId").is_none());
        assert!(table.find_foreign_key("UQ_Orders_Number").is_none());
        assert!(table.find_column("Missing").is_none());
    }

    #[test]
    fn test_primary_keys_slice() {
        let table = Table::new("Orders");
        assert!(table.primary_keys().is_empty());
        let table = table.with_primary_key(KeyConstraint::new("PK_Orders", ["Id"]));
        assert_eq!(table.primary_keys().len(), 1);
    }
}

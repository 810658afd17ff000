//! Primary key, unique key and foreign key metadata

use serde::{Deserialize, Serialize};

/// A primary key or unique key: a name and an ordered list of column names
///
/// Key constraints carry no sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConstraint {
    name: String,
    columns: Vec<String>,
}

impl KeyConstraint {
    /// # Example
    ///
    /// ```
    /// use schemaguard::schema::KeyConstraint;
    ///
    /// let pk = KeyConstraint::new("PK_OrderLines", ["OrderId", "LineNo"]);
    /// assert_eq!(pk.columns(), ["OrderId", "LineNo"]);
    /// ```
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column names sorted, for order-insensitive signature checks
    pub fn column_set(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// A foreign key from columns of the owning table to columns of a referenced table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    name: String,
    columns: Vec<String>,
    referenced_table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    referenced_owner: Option<String>,
    referenced_columns: Vec<String>,
    /// Action on delete, e.g. `CASCADE` (`None` means the database default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delete_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    update_rule: Option<String>,
}

impl ForeignKey {
    pub fn new<I, S>(name: impl Into<String>, columns: I, referenced_table: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            referenced_table: referenced_table.into(),
            referenced_owner: None,
            referenced_columns: Vec::new(),
            delete_rule: None,
            update_rule: None,
        }
    }

    #[must_use]
    pub fn references<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referenced_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_referenced_owner(mut self, owner: impl Into<String>) -> Self {
        self.referenced_owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn on_delete(mut self, rule: impl Into<String>) -> Self {
        self.delete_rule = Some(rule.into());
        self
    }

    #[must_use]
    pub fn on_update(mut self, rule: impl Into<String>) -> Self {
        self.update_rule = Some(rule.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn referenced_table(&self) -> &str {
        &self.referenced_table
    }

    pub fn referenced_owner(&self) -> Option<&str> {
        self.referenced_owner.as_deref()
    }

    pub fn referenced_columns(&self) -> &[String] {
        &self.referenced_columns
    }

    pub fn delete_rule(&self) -> Option<&str> {
        self.delete_rule.as_deref()
    }

    pub fn update_rule(&self) -> Option<&str> {
        self.update_rule.as_deref()
    }
}

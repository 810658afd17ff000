//! Column metadata

use serde::{Deserialize, Serialize};

/// A table column as captured in a schema snapshot
///
/// Identity within a table is the column name. The key and index flags are
/// informational: they are set by whatever built the snapshot and are not
/// part of column equivalence, because their lifecycle belongs to the
/// constraints and indexes that own them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    data_type: String,
    #[serde(default = "default_nullable")]
    nullable: bool,
    #[serde(default)]
    ordinal: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<u32>,
    #[serde(default)]
    is_primary_key: bool,
    #[serde(default)]
    is_unique_key: bool,
    #[serde(default)]
    is_foreign_key: bool,
    #[serde(default)]
    is_indexed: bool,
    #[serde(default)]
    is_auto_number: bool,
}

fn default_nullable() -> bool {
    true
}

impl Column {
    /// Create a nullable column with the given declared type
    ///
    /// # Example
    ///
    /// ```
    /// use schemaguard::schema::Column;
    ///
    /// let email = Column::new("Email", "nvarchar").with_length(256).not_null();
    /// assert_eq!(email.name(), "Email");
    /// assert!(!email.is_nullable());
    /// ```
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            ordinal: 0,
            default_value: None,
            length: None,
            precision: None,
            scale: None,
            is_primary_key: false,
            is_unique_key: false,
            is_foreign_key: false,
            is_indexed: false,
            is_auto_number: false,
        }
    }

    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    #[must_use]
    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = ordinal;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set numeric precision and scale
    #[must_use]
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn mark_primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    #[must_use]
    pub fn mark_unique_key(mut self) -> Self {
        self.is_unique_key = true;
        self
    }

    #[must_use]
    pub fn mark_foreign_key(mut self) -> Self {
        self.is_foreign_key = true;
        self
    }

    #[must_use]
    pub fn mark_indexed(mut self) -> Self {
        self.is_indexed = true;
        self
    }

    #[must_use]
    pub fn mark_auto_number(mut self) -> Self {
        self.is_auto_number = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn length(&self) -> Option<u32> {
        self.length
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    pub fn is_unique_key(&self) -> bool {
        self.is_unique_key
    }

    pub fn is_foreign_key(&self) -> bool {
        self.is_foreign_key
    }

    pub fn is_indexed(&self) -> bool {
        self.is_indexed
    }

    pub fn is_auto_number(&self) -> bool {
        self.is_auto_number
    }

    /// Declared type with its length or precision/scale, e.g. `nvarchar(256)`
    /// or `decimal(10, 2)`
    pub fn full_data_type(&self) -> String {
        match (self.length, self.precision, self.scale) {
            (_, Some(precision), Some(scale)) => {
                format!("{}({}, {})", self.data_type, precision, scale)
            }
            (_, Some(precision), None) => format!("{}({})", self.data_type, precision),
            (Some(length), None, _) => format!("{}({})", self.data_type, length),
            _ => self.data_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_is_nullable_without_flags() {
        let col = Column::new("Id", "int");
        assert!(col.is_nullable());
        assert!(!col.is_primary_key());
        assert!(!col.is_auto_number());
        assert_eq!(col.default_value(), None);
    }

    #[test]
    fn test_full_data_type() {
        assert_eq!(Column::new("Email", "nvarchar").with_length(256).full_data_type(), "nvarchar(256)");
        assert_eq!(Column::new("Total", "decimal").with_precision(10, 2).full_data_type(), "decimal(10, 2)");
        assert_eq!(Column::new("Id", "int").full_data_type(), "int");
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let col: Column = serde_json::from_str(r#"{"name":"Notes","data_type":"text"}"#).unwrap();
        assert!(col.is_nullable());
        assert_eq!(col.ordinal(), 0);
        assert_eq!(col.length(), None);
    }
}

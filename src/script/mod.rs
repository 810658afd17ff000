//! Script emission
//!
//! The comparison core never builds SQL itself. Every Add, Change and Delete
//! fragment is requested from a [`ScriptWriter`], so the same diff can be
//! rendered for different targets (or captured verbatim in tests).
//!
//! [`SqlScriptWriter`] is the default implementation, backed by `sea-query`.

pub mod sql;

pub use sql::SqlScriptWriter;

use crate::error::CompareError;
use crate::schema::{Column, ForeignKey, Index, KeyConstraint, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL dialect a [`SqlScriptWriter`] renders for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    MySql,
    Sqlite,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "PostgreSQL"),
            Dialect::MySql => write!(f, "MySQL"),
            Dialect::Sqlite => write!(f, "SQLite"),
        }
    }
}

impl FromStr for Dialect {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(CompareError::Script(format!("Unknown dialect: {other}"))),
        }
    }
}

/// Renders DDL fragments for schema objects
///
/// Every method receives the table the object belongs to and returns one
/// self-contained fragment. Implementations must not keep state between
/// calls: the comparer may request fragments in any order and combine them.
pub trait ScriptWriter {
    fn create_table(&self, table: &Table) -> Result<String, CompareError>;

    fn drop_table(&self, table: &Table) -> Result<String, CompareError>;

    fn add_column(&self, table: &Table, column: &Column) -> Result<String, CompareError>;

    fn drop_column(&self, table: &Table, column: &Column) -> Result<String, CompareError>;

    /// Alter a column in place from the shape `from` to the shape `to`
    ///
    /// Both shapes share one name. The fragment must carry every attribute
    /// difference, including ones `to` expresses by absence (a removed
    /// default, a cleared auto-number flag).
    fn alter_column(&self, table: &Table, from: &Column, to: &Column) -> Result<String, CompareError>;

    fn add_primary_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError>;

    fn drop_primary_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError>;

    fn add_unique_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError>;

    fn drop_unique_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError>;

    fn add_foreign_key(&self, table: &Table, key: &ForeignKey) -> Result<String, CompareError>;

    fn drop_foreign_key(&self, table: &Table, key: &ForeignKey) -> Result<String, CompareError>;

    fn add_index(&self, table: &Table, index: &Index) -> Result<String, CompareError>;

    fn drop_index(&self, table: &Table, index: &Index) -> Result<String, CompareError>;
}

impl<W: ScriptWriter + ?Sized> ScriptWriter for &W {
    fn create_table(&self, table: &Table) -> Result<String, CompareError> {
        (**self).create_table(table)
    }

    fn drop_table(&self, table: &Table) -> Result<String, CompareError> {
        (**self).drop_table(table)
    }

    fn add_column(&self, table: &Table, column: &Column) -> Result<String, CompareError> {
        (**self).add_column(table, column)
    }

    fn drop_column(&self, table: &Table, column: &Column) -> Result<String, CompareError> {
        (**self).drop_column(table, column)
    }

    fn alter_column(&self, table: &Table, from: &Column, to: &Column) -> Result<String, CompareError> {
        (**self).alter_column(table, from, to)
    }

    fn add_primary_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        (**self).add_primary_key(table, key)
    }

    fn drop_primary_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        (**self).drop_primary_key(table, key)
    }

    fn add_unique_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        (**self).add_unique_key(table, key)
    }

    fn drop_unique_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        (**self).drop_unique_key(table, key)
    }

    fn add_foreign_key(&self, table: &Table, key: &ForeignKey) -> Result<String, CompareError> {
        (**self).add_foreign_key(table, key)
    }

    fn drop_foreign_key(&self, table: &Table, key: &ForeignKey) -> Result<String, CompareError> {
        (**self).drop_foreign_key(table, key)
    }

    fn add_index(&self, table: &Table, index: &Index) -> Result<String, CompareError> {
        (**self).add_index(table, index)
    }

    fn drop_index(&self, table: &Table, index: &Index) -> Result<String, CompareError> {
        (**self).drop_index(table, index)
    }
}

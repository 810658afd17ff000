//! # Schemaguard
//!
//! Schema comparison engine: matches tables, columns, keys and indexes between
//! two in-memory schema snapshots, decides which matched objects changed, and
//! renders the add/change/delete scripts through a pluggable [`ScriptWriter`].
//!
//! Schemaguard never connects to a database. Snapshots come from an external
//! acquisition layer (or from JSON/TOML files via serde).
//!
//! ```
//! use schemaguard::{DatabaseSchema, Dialect, SchemaComparer, SqlScriptWriter};
//!
//! let snapshot = DatabaseSchema::new("shop");
//! let comparer = SchemaComparer::new(SqlScriptWriter::new(Dialect::Postgres));
//! assert!(comparer.compare(&snapshot, &snapshot.clone()).unwrap().is_empty());
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod schema;
pub mod script;

#[cfg(feature = "tracing")]
pub mod tracing_helpers;

pub use compare::{join_scripts, scripts_of, CompareResult, ResultType, SchemaComparer, SchemaObjectType};
pub use config::CompareConfig;
pub use error::CompareError;
pub use schema::{Column, DatabaseSchema, ForeignKey, Index, KeyConstraint, Table};
pub use script::{Dialect, ScriptWriter, SqlScriptWriter};

//! Schema snapshot model
//!
//! Read-only, in-memory representation of a database schema at one point in
//! time. Snapshots are built by an acquisition layer (or deserialized from a
//! file) before a comparison starts:
//!
//! - [`DatabaseSchema`] - named container of tables
//! - [`Table`] - columns, primary key, unique keys, foreign keys, indexes
//! - [`Column`], [`KeyConstraint`], [`ForeignKey`], [`Index`]
//!
//! # Example
//!
//! ```
//! use schemaguard::schema::{Column, DatabaseSchema, Index, IndexedColumn, KeyConstraint, Table};
//!
//! let schema = DatabaseSchema::new("shop").with_table(
//!     Table::new("Orders")
//!         .with_owner("dbo")
//!         .with_column(Column::new("Id", "int").not_null().mark_primary_key())
//!         .with_column(Column::new("CustomerId", "int").not_null())
//!         .with_primary_key(KeyConstraint::new("PK_Orders", ["Id"]))
//!         .with_index(Index::new("IX_Orders_CustomerId").column(IndexedColumn::new("CustomerId").asc())),
//! );
//! assert!(schema.find_table(Some("dbo"), "Orders").is_some());
//! ```

pub mod column;
pub mod constraint;
pub mod index;
pub mod table;

pub use column::Column;
pub use constraint::{ForeignKey, KeyConstraint};
pub use index::{
    IncludedColumn, Index, IndexOptions, IndexedColumn, IndexedColumnOrder, SqlServerIndexOptions,
};
pub use table::{DatabaseSchema, Table};

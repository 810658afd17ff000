//! Redundancy filter
//!
//! Some databases materialise primary and unique keys as indexes, and a
//! snapshot may list them in both places. Such an index is left out of the
//! index comparison; its lifecycle belongs to the key.

use crate::schema::{Column, ForeignKey, Index, KeyConstraint, Table};

/// Whether an object duplicates another object of its owning table
pub trait Redundant {
    /// Evaluated against the table the object belongs to, on its own side
    fn is_redundant(&self, _table: &Table) -> bool {
        false
    }
}

impl Redundant for Column {}

impl Redundant for KeyConstraint {}

impl Redundant for ForeignKey {}

impl Redundant for Index {
    fn is_redundant(&self, table: &Table) -> bool {
        self.is_unique_key_index(table)
    }
}

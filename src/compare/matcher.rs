//! Identity matching between the two sides of a comparison
//!
//! Objects pair by exact, case-sensitive name (tables by owner and name).
//! A left object claims the first right object with its identity that no
//! earlier left object has claimed, so every right object takes part in at
//! most one pair even when a malformed snapshot repeats a name.

use crate::schema::{Column, ForeignKey, Index, KeyConstraint, Table};

/// An object with a stable identity inside its collection
pub trait Named {
    fn name(&self) -> &str;

    /// Owner qualifying the name, for objects that have one
    fn owner(&self) -> Option<&str> {
        None
    }

    fn same_identity(&self, other: &Self) -> bool {
        self.name() == other.name() && self.owner() == other.owner()
    }
}

impl Named for Column {
    fn name(&self) -> &str {
        Column::name(self)
    }
}

impl Named for KeyConstraint {
    fn name(&self) -> &str {
        KeyConstraint::name(self)
    }
}

impl Named for ForeignKey {
    fn name(&self) -> &str {
        ForeignKey::name(self)
    }
}

impl Named for Index {
    fn name(&self) -> &str {
        Index::name(self)
    }
}

impl Named for Table {
    fn name(&self) -> &str {
        Table::name(self)
    }

    fn owner(&self) -> Option<&str> {
        self.schema_owner()
    }
}

/// Pairs left objects with right objects of the same identity
#[derive(Debug)]
pub struct Matcher<'r, T> {
    right: &'r [T],
    claimed: Vec<bool>,
}

impl<'r, T: Named> Matcher<'r, T> {
    pub fn new(right: &'r [T]) -> Self {
        Self {
            right,
            claimed: vec![false; right.len()],
        }
    }

    /// Claim the first unclaimed right object with the identity of `left`
    pub fn claim(&mut self, left: &T) -> Option<&'r T> {
        let position = self
            .right
            .iter()
            .zip(self.claimed.iter())
            .position(|(candidate, claimed)| !claimed && candidate.same_identity(left))?;
        self.claimed[position] = true;
        Some(&self.right[position])
    }
}

/// Right objects whose identity does not occur anywhere in `left`
pub fn right_only<'r, T: Named>(left: &[T], right: &'r [T]) -> impl Iterator<Item = &'r T> + 'r
where
    T: 'r,
{
    let absent: Vec<bool> = right
        .iter()
        .map(|candidate| !left.iter().any(|l| l.same_identity(candidate)))
        .collect();
    right
        .iter()
        .zip(absent)
        .filter_map(|(candidate, absent)| absent.then_some(candidate))
}

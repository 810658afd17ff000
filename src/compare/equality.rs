//! Structural equivalence of same-kind schema objects
//!
//! Identity (the object name) is resolved by the matcher before equivalence
//! is asked, but equivalence still requires equal names. Kind tags, type
//! names, filters and referential rules compare case-insensitively; every
//! other attribute compares exactly.

use crate::schema::{Column, ForeignKey, IncludedColumn, Index, IndexOptions, KeyConstraint};

/// Structural equality between two objects of the same kind
///
/// Implementations are reflexive and symmetric.
pub trait Equivalent {
    fn equivalent(&self, other: &Self) -> bool;
}

/// Unicode case-insensitive comparison
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Case-insensitive comparison of optional text; absent equals only absent
pub(crate) fn opt_eq_ignore_case(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => eq_ignore_case(a, b),
        _ => false,
    }
}

impl Equivalent for Column {
    fn equivalent(&self, other: &Self) -> bool {
        self.name() == other.name()
            && eq_ignore_case(self.data_type(), other.data_type())
            && self.is_nullable() == other.is_nullable()
            && self.length() == other.length()
            && self.precision() == other.precision()
            && self.scale() == other.scale()
            && self.is_auto_number() == other.is_auto_number()
            && self.default_value() == other.default_value()
    }
}

impl Equivalent for KeyConstraint {
    fn equivalent(&self, other: &Self) -> bool {
        self.name() == other.name() && self.columns() == other.columns()
    }
}

impl Equivalent for ForeignKey {
    fn equivalent(&self, other: &Self) -> bool {
        self.name() == other.name()
            && self.columns() == other.columns()
            && self.referenced_table() == other.referenced_table()
            && self.referenced_owner() == other.referenced_owner()
            && self.referenced_columns() == other.referenced_columns()
            && opt_eq_ignore_case(self.delete_rule(), other.delete_rule())
            && opt_eq_ignore_case(self.update_rule(), other.update_rule())
    }
}

impl Equivalent for Index {
    fn equivalent(&self, other: &Self) -> bool {
        if self.name() != other.name() || self.is_unique() != other.is_unique() {
            return false;
        }
        if !opt_eq_ignore_case(self.index_type(), other.index_type()) {
            return false;
        }
        if !opt_eq_ignore_case(self.filter(), other.filter()) {
            return false;
        }

        let left = self.ordered_columns();
        let right = other.ordered_columns();
        if left.len() != right.len() {
            return false;
        }
        if !left
            .iter()
            .zip(right.iter())
            .all(|(l, r)| l.name_with_order() == r.name_with_order())
        {
            return false;
        }

        self.options().equivalent(other.options())
    }
}

impl Equivalent for IndexOptions {
    fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (IndexOptions::Standard, IndexOptions::Standard) => true,
            (IndexOptions::SqlServer(left), IndexOptions::SqlServer(right)) => {
                left.fill_factor() == right.fill_factor()
                    && included_names(left.included_columns()) == included_names(right.included_columns())
            }
            _ => false,
        }
    }
}

/// Included column names ordered by (ordinal, name)
fn included_names(columns: &[IncludedColumn]) -> Vec<&str> {
    let mut sorted: Vec<&IncludedColumn> = columns.iter().collect();
    sorted.sort_by(|a, b| a.ordinal().cmp(&b.ordinal()).then_with(|| a.name().cmp(b.name())));
    sorted.into_iter().map(IncludedColumn::name).collect()
}

//! Span constructors used when the `tracing` feature is enabled

use crate::schema::{DatabaseSchema, Table};
use tracing::Span;

pub fn compare_schema_span(left: &DatabaseSchema, right: &DatabaseSchema) -> Span {
    tracing::info_span!(
        "schemaguard.compare",
        source = left.name(),
        target = right.name(),
        source_tables = left.tables().len(),
        target_tables = right.tables().len(),
    )
}

pub fn compare_table_span(table: &Table) -> Span {
    tracing::debug_span!(
        "schemaguard.compare_table",
        table = table.name(),
        owner = table.schema_owner().unwrap_or(""),
    )
}

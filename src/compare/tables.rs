//! Table-level diff
//!
//! Tables pair by (owner, name). A matched pair is diffed kind by kind in a
//! fixed order: columns, primary key, unique keys, foreign keys, indexes.
//! Unmatched tables become whole-table drops or creates.

use super::matcher::{right_only, Matcher};
use super::objects::{
    compare_objects, push, Columns, DiffContext, ForeignKeys, Indexes, ObjectKind, PrimaryKeys,
    UniqueKeys,
};
use super::redundancy::Redundant;
use super::result::{CompareResult, ResultType, SchemaObjectType};
use crate::error::CompareError;
use crate::schema::Table;

#[cfg(feature = "tracing")]
use crate::tracing_helpers;

/// Diff two table lists, appending to `results`
pub fn compare_tables(
    ctx: DiffContext<'_>,
    left: &[Table],
    right: &[Table],
    results: &mut Vec<CompareResult>,
) -> Result<(), CompareError> {
    let mut matcher = Matcher::new(right);

    for left_table in left {
        match matcher.claim(left_table) {
            Some(right_table) => compare_table_pair(ctx, left_table, right_table, results)?,
            None => {
                let script = ctx.writer.drop_table(left_table)?;
                push(
                    results,
                    SchemaObjectType::Table,
                    ResultType::Delete,
                    left_table,
                    left_table.name(),
                    script,
                );
            }
        }
    }

    for right_table in right_only(left, right) {
        let script = create_table_script(ctx, right_table)?;
        push(
            results,
            SchemaObjectType::Table,
            ResultType::Add,
            right_table,
            right_table.name(),
            script,
        );
    }

    Ok(())
}

/// Diff every object kind of two tables sharing one identity
pub fn compare_table_pair(
    ctx: DiffContext<'_>,
    left: &Table,
    right: &Table,
    results: &mut Vec<CompareResult>,
) -> Result<(), CompareError> {
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::compare_table_span(left).entered();

    let before = results.len();

    compare_objects::<Columns>(ctx, left, right, left.columns(), right.columns(), results)?;
    compare_objects::<PrimaryKeys>(ctx, left, right, left.primary_keys(), right.primary_keys(), results)?;
    compare_objects::<UniqueKeys>(ctx, left, right, left.unique_keys(), right.unique_keys(), results)?;
    compare_objects::<ForeignKeys>(ctx, left, right, left.foreign_keys(), right.foreign_keys(), results)?;
    compare_objects::<Indexes>(ctx, left, right, left.indexes(), right.indexes(), results)?;

    log::debug!("{}: {} difference(s)", left, results.len() - before);
    Ok(())
}

/// `CREATE TABLE` followed by the table's non-redundant indexes
fn create_table_script(ctx: DiffContext<'_>, table: &Table) -> Result<String, CompareError> {
    let mut statements = vec![ctx.writer.create_table(table)?];
    for index in table.indexes() {
        if index.is_redundant(table) {
            continue;
        }
        statements.push(Indexes::add_script(ctx.writer, table, index)?);
    }
    Ok(statements.join(ctx.separator))
}

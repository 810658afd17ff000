//! Per-kind diff of one table pair
//!
//! [`compare_objects`] runs the two phases for any object kind:
//!
//! 1. every non-redundant left object is paired with a right object of the
//!    same name; unpaired objects are deleted, paired but non-equivalent
//!    objects are changed;
//! 2. every non-redundant right object whose name does not occur on the left
//!    is added.
//!
//! Results carry the left table. Scripts are rendered against the left table
//! too; the two tables share their identity.

use super::equality::Equivalent;
use super::matcher::{right_only, Matcher, Named};
use super::redundancy::Redundant;
use super::result::{CompareResult, ResultType, SchemaObjectType};
use crate::error::CompareError;
use crate::schema::{Column, ForeignKey, Index, KeyConstraint, Table};
use crate::script::ScriptWriter;

/// Writer and separator shared by every object comparison of one run
#[derive(Clone, Copy)]
pub struct DiffContext<'a> {
    pub writer: &'a dyn ScriptWriter,
    /// Placed between the drop and add halves of a change script
    pub separator: &'a str,
}

/// A schema object kind the orchestrator can diff
///
/// Implemented by zero-sized markers so that one object type (such as
/// [`KeyConstraint`]) can back more than one kind.
pub trait ObjectKind {
    type Object: Named + Equivalent + Redundant;

    const KIND: SchemaObjectType;

    fn add_script(
        writer: &dyn ScriptWriter,
        table: &Table,
        object: &Self::Object,
    ) -> Result<String, CompareError>;

    fn drop_script(
        writer: &dyn ScriptWriter,
        table: &Table,
        object: &Self::Object,
    ) -> Result<String, CompareError>;

    /// Script turning `left` into `right`: drop the old shape, then add the new one
    fn change_script(
        ctx: DiffContext<'_>,
        table: &Table,
        left: &Self::Object,
        right: &Self::Object,
    ) -> Result<String, CompareError> {
        let drop = Self::drop_script(ctx.writer, table, left)?;
        let add = Self::add_script(ctx.writer, table, right)?;
        Ok(format!("{}{}{}", drop, ctx.separator, add))
    }
}

pub struct Columns;

impl ObjectKind for Columns {
    type Object = Column;

    const KIND: SchemaObjectType = SchemaObjectType::Column;

    fn add_script(writer: &dyn ScriptWriter, table: &Table, column: &Column) -> Result<String, CompareError> {
        writer.add_column(table, column)
    }

    fn drop_script(writer: &dyn ScriptWriter, table: &Table, column: &Column) -> Result<String, CompareError> {
        writer.drop_column(table, column)
    }

    /// Columns alter in place so their data survives
    fn change_script(
        ctx: DiffContext<'_>,
        table: &Table,
        left: &Column,
        right: &Column,
    ) -> Result<String, CompareError> {
        ctx.writer.alter_column(table, left, right)
    }
}

pub struct PrimaryKeys;

impl ObjectKind for PrimaryKeys {
    type Object = KeyConstraint;

    const KIND: SchemaObjectType = SchemaObjectType::PrimaryKey;

    fn add_script(writer: &dyn ScriptWriter, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        writer.add_primary_key(table, key)
    }

    fn drop_script(writer: &dyn ScriptWriter, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        writer.drop_primary_key(table, key)
    }
}

pub struct UniqueKeys;

impl ObjectKind for UniqueKeys {
    type Object = KeyConstraint;

    const KIND: SchemaObjectType = SchemaObjectType::UniqueKey;

    fn add_script(writer: &dyn ScriptWriter, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        writer.add_unique_key(table, key)
    }

    fn drop_script(writer: &dyn ScriptWriter, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        writer.drop_unique_key(table, key)
    }
}

pub struct ForeignKeys;

impl ObjectKind for ForeignKeys {
    type Object = ForeignKey;

    const KIND: SchemaObjectType = SchemaObjectType::ForeignKey;

    fn add_script(writer: &dyn ScriptWriter, table: &Table, key: &ForeignKey) -> Result<String, CompareError> {
        writer.add_foreign_key(table, key)
    }

    fn drop_script(writer: &dyn ScriptWriter, table: &Table, key: &ForeignKey) -> Result<String, CompareError> {
        writer.drop_foreign_key(table, key)
    }
}

pub struct Indexes;

impl ObjectKind for Indexes {
    type Object = Index;

    const KIND: SchemaObjectType = SchemaObjectType::Index;

    fn add_script(writer: &dyn ScriptWriter, table: &Table, index: &Index) -> Result<String, CompareError> {
        writer.add_index(table, index)
    }

    fn drop_script(writer: &dyn ScriptWriter, table: &Table, index: &Index) -> Result<String, CompareError> {
        writer.drop_index(table, index)
    }
}

/// Diff one object kind of a matched table pair, appending to `results`
///
/// Writer errors abort the call; results appended before the failure stay
/// in `results`.
pub fn compare_objects<K: ObjectKind>(
    ctx: DiffContext<'_>,
    left_table: &Table,
    right_table: &Table,
    left: &[K::Object],
    right: &[K::Object],
    results: &mut Vec<CompareResult>,
) -> Result<(), CompareError> {
    let mut matcher = Matcher::new(right);

    for left_object in left {
        if left_object.is_redundant(left_table) {
            log::trace!("skipping redundant {} {} on {}", K::KIND, left_object.name(), left_table);
            continue;
        }

        match matcher.claim(left_object) {
            None => {
                let script = K::drop_script(ctx.writer, left_table, left_object)?;
                push(results, K::KIND, ResultType::Delete, left_table, left_object.name(), script);
            }
            Some(right_object) if !left_object.equivalent(right_object) => {
                let script = K::change_script(ctx, left_table, left_object, right_object)?;
                push(results, K::KIND, ResultType::Change, left_table, left_object.name(), script);
            }
            Some(_) => {}
        }
    }

    for right_object in right_only(left, right) {
        if right_object.is_redundant(right_table) {
            log::trace!("skipping redundant {} {} on {}", K::KIND, right_object.name(), right_table);
            continue;
        }
        let script = K::add_script(ctx.writer, left_table, right_object)?;
        push(results, K::KIND, ResultType::Add, left_table, right_object.name(), script);
    }

    Ok(())
}

pub(crate) fn push(
    results: &mut Vec<CompareResult>,
    object_type: SchemaObjectType,
    result_type: ResultType,
    table: &Table,
    name: &str,
    script: String,
) {
    log::debug!("{} {} {} on {}", result_type, object_type, name, table);
    results.push(CompareResult {
        object_type,
        result_type,
        table_name: table.name().to_string(),
        schema_owner: table.schema_owner().map(str::to_string),
        name: name.to_string(),
        script,
    });
}

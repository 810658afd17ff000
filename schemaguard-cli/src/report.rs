//! Rendering of comparison results for the terminal and for script files

use colored::Colorize;
use schemaguard::schema::{Column, ForeignKey, Index, KeyConstraint, Table};
use schemaguard::{CompareError, CompareResult, DatabaseSchema, ResultType, SchemaComparer, SchemaObjectType, ScriptWriter};
use std::collections::BTreeMap;

/// Order in which result groups are written: removals first, then
/// in-place changes, then additions
pub const GROUP_ORDER: [ResultType; 3] = [ResultType::Delete, ResultType::Change, ResultType::Add];

/// Results of one result type, in comparison order
#[derive(Debug)]
pub struct ScriptGroup<'a> {
    pub result_type: ResultType,
    pub results: Vec<&'a CompareResult>,
}

/// Group results by result type, following [`GROUP_ORDER`]
///
/// Empty groups are left out. With `only`, just that result type is kept.
pub fn group_results(results: &[CompareResult], only: Option<ResultType>) -> Vec<ScriptGroup<'_>> {
    GROUP_ORDER
        .iter()
        .copied()
        .filter(|result_type| only.map_or(true, |wanted| wanted == *result_type))
        .map(|result_type| ScriptGroup {
            result_type,
            results: schemaguard::scripts_of(results, result_type),
        })
        .filter(|group| !group.results.is_empty())
        .collect()
}

/// Plain SQL text for a script file, one comment line per result
pub fn render_script_file(groups: &[ScriptGroup<'_>]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("-- {} ({})\n", group_title(group.result_type), group.results.len()));
        for result in &group.results {
            out.push_str(&format!("-- {}\n{}\n", result, result.script));
        }
        out.push('\n');
    }
    out
}

/// Colored rendering of the groups for terminal output
pub fn print_groups(groups: &[ScriptGroup<'_>]) {
    for group in groups {
        let title = format!("{} ({})", group_title(group.result_type), group.results.len());
        let title = match group.result_type {
            ResultType::Delete => title.red().bold(),
            ResultType::Change => title.yellow().bold(),
            ResultType::Add => title.green().bold(),
        };
        println!("\n{}", title);
        for result in &group.results {
            println!("{}", format!("-- {}", result).dimmed());
            println!("{}", result.script);
        }
    }
}

fn group_title(result_type: ResultType) -> &'static str {
    match result_type {
        ResultType::Delete => "Deletes",
        ResultType::Change => "Changes",
        ResultType::Add => "Adds",
    }
}

/// Result counts per object type and result type
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    counts: BTreeMap<SchemaObjectType, [usize; 3]>,
}

impl Summary {
    pub fn from_results(results: &[CompareResult]) -> Self {
        let mut summary = Summary::default();
        for result in results {
            let row = summary.counts.entry(result.object_type).or_insert([0; 3]);
            row[slot(result.result_type)] += 1;
        }
        summary
    }

    pub fn count(&self, object_type: SchemaObjectType, result_type: ResultType) -> usize {
        self.counts
            .get(&object_type)
            .map_or(0, |row| row[slot(result_type)])
    }

    /// Total for one result type across all object types
    pub fn total(&self, result_type: ResultType) -> usize {
        self.counts.values().map(|row| row[slot(result_type)]).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Rows of `(object type, adds, changes, deletes)` for object types with results
    pub fn rows(&self) -> impl Iterator<Item = (SchemaObjectType, usize, usize, usize)> + '_ {
        self.counts.iter().map(|(object_type, row)| {
            (
                *object_type,
                row[slot(ResultType::Add)],
                row[slot(ResultType::Change)],
                row[slot(ResultType::Delete)],
            )
        })
    }
}

fn slot(result_type: ResultType) -> usize {
    match result_type {
        ResultType::Add => 0,
        ResultType::Change => 1,
        ResultType::Delete => 2,
    }
}

/// Writer that renders every fragment as an empty script
///
/// Counting differences needs no SQL, so no dialect limit can fail it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentWriter;

impl ScriptWriter for SilentWriter {
    fn create_table(&self, _table: &Table) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn drop_table(&self, _table: &Table) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn add_column(&self, _table: &Table, _column: &Column) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn drop_column(&self, _table: &Table, _column: &Column) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn alter_column(&self, _table: &Table, _from: &Column, _to: &Column) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn add_primary_key(&self, _table: &Table, _key: &KeyConstraint) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn drop_primary_key(&self, _table: &Table, _key: &KeyConstraint) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn add_unique_key(&self, _table: &Table, _key: &KeyConstraint) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn drop_unique_key(&self, _table: &Table, _key: &KeyConstraint) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn add_foreign_key(&self, _table: &Table, _key: &ForeignKey) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn drop_foreign_key(&self, _table: &Table, _key: &ForeignKey) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn add_index(&self, _table: &Table, _index: &Index) -> Result<String, CompareError> {
        Ok(String::new())
    }

    fn drop_index(&self, _table: &Table, _index: &Index) -> Result<String, CompareError> {
        Ok(String::new())
    }
}

/// Count the differences between two snapshots without rendering scripts
pub fn summarize(left: &DatabaseSchema, right: &DatabaseSchema) -> Result<Summary, CompareError> {
    let results = SchemaComparer::new(SilentWriter).compare(left, right)?;
    Ok(Summary::from_results(&results))
}

/// Print the summary as a table
pub fn print_summary(summary: &Summary) {
    println!("\n📊 Comparison Summary\n");
    if summary.is_empty() {
        println!("No differences");
        return;
    }

    println!("{:<14}{:>8}{:>8}{:>8}", "object", "add", "change", "delete");
    for (object_type, adds, changes, deletes) in summary.rows() {
        println!(
            "{:<14}{:>8}{:>8}{:>8}",
            object_type.to_string(),
            adds,
            changes,
            deletes
        );
    }
    println!(
        "\n📈 Total: {} added, {} changed, {} deleted",
        summary.total(ResultType::Add).to_string().green(),
        summary.total(ResultType::Change).to_string().yellow(),
        summary.total(ResultType::Delete).to_string().red()
    );
}

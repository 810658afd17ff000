//! Comparison results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change a result records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// Present only on the right (target) side
    Add,
    /// Present on both sides with different structure
    Change,
    /// Present only on the left (source) side
    Delete,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultType::Add => write!(f, "add"),
            ResultType::Change => write!(f, "change"),
            ResultType::Delete => write!(f, "delete"),
        }
    }
}

/// Kind of schema object a result is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaObjectType {
    Table,
    Column,
    PrimaryKey,
    UniqueKey,
    ForeignKey,
    Index,
}

impl fmt::Display for SchemaObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SchemaObjectType::Table => "table",
            SchemaObjectType::Column => "column",
            SchemaObjectType::PrimaryKey => "primary key",
            SchemaObjectType::UniqueKey => "unique key",
            SchemaObjectType::ForeignKey => "foreign key",
            SchemaObjectType::Index => "index",
        };
        f.write_str(label)
    }
}

/// One change between two snapshots, with the script that performs it
///
/// `table_name` and `schema_owner` identify the left (source) table, except
/// for table additions, which only exist on the right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResult {
    pub object_type: SchemaObjectType,
    pub result_type: ResultType,
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_owner: Option<String>,
    pub name: String,
    pub script: String,
}

impl fmt::Display for CompareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} on ", self.result_type, self.object_type, self.name)?;
        if let Some(owner) = &self.schema_owner {
            write!(f, "{owner}.")?;
        }
        write!(f, "{}", self.table_name)
    }
}

/// Results of one result type, in their original order
pub fn scripts_of(results: &[CompareResult], result_type: ResultType) -> Vec<&CompareResult> {
    results.iter().filter(|r| r.result_type == result_type).collect()
}

/// Concatenate the scripts of `results`, one per line
pub fn join_scripts<'a, I>(results: I) -> String
where
    I: IntoIterator<Item = &'a CompareResult>,
{
    results
        .into_iter()
        .map(|r| r.script.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

//! Snapshot loader for schema files
//!
//! Snapshots are `DatabaseSchema` documents written as JSON (`.json`) or
//! TOML (`.toml`). The format is picked from the file extension.

use anyhow::{bail, Context, Result};
use schemaguard::DatabaseSchema;
use std::fs;
use std::path::Path;

/// Snapshot file formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    /// Format for `path`, judged by its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(SnapshotFormat::Json),
            "toml" => Some(SnapshotFormat::Toml),
            _ => None,
        }
    }
}

/// Load a schema snapshot from a `.json` or `.toml` file
pub fn load_snapshot(path: &Path) -> Result<DatabaseSchema> {
    if !path.exists() {
        bail!("Snapshot file does not exist: {}", path.display());
    }

    let Some(format) = SnapshotFormat::from_path(path) else {
        bail!(
            "Unsupported snapshot format for {} (expected .json or .toml)",
            path.display()
        );
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let schema = parse_snapshot(&content, format)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

    log::debug!(
        "loaded snapshot {} from {} ({} tables)",
        schema.name(),
        path.display(),
        schema.tables().len()
    );
    Ok(schema)
}

/// Parse snapshot text in the given format
pub fn parse_snapshot(content: &str, format: SnapshotFormat) -> Result<DatabaseSchema> {
    let schema = match format {
        SnapshotFormat::Json => serde_json::from_str(content)?,
        SnapshotFormat::Toml => toml::from_str(content)?,
    };
    Ok(schema)
}

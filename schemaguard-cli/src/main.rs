//! Schemaguard CLI Tool
//!
//! Compares two schema snapshot files and prints the scripts that turn the
//! source schema into the target schema. Never connects to a database.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use schemaguard::{CompareConfig, CompareResult, Dialect, ResultType, SchemaComparer, SqlScriptWriter};
use schemaguard_cli::report;
use schemaguard_cli::snapshot_loader::load_snapshot;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "schemaguard")]
#[command(about = "Schema snapshot comparison and script generation")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the scripts that turn SOURCE into TARGET
    Diff {
        /// Source (current) snapshot, .json or .toml
        source: PathBuf,

        /// Target (desired) snapshot, .json or .toml
        target: PathBuf,

        /// Script dialect (postgres, mysql, sqlite); overrides the config file
        #[arg(long)]
        dialect: Option<String>,

        /// Write the scripts to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only emit results of this kind
        #[arg(long, value_enum)]
        only: Option<OnlyArg>,

        /// Configuration file (default: config/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Count differences per object type (no scripts are rendered)
    Summary {
        /// Source (current) snapshot, .json or .toml
        source: PathBuf,

        /// Target (desired) snapshot, .json or .toml
        target: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OnlyArg {
    Add,
    Change,
    Delete,
}

impl From<OnlyArg> for ResultType {
    fn from(value: OnlyArg) -> Self {
        match value {
            OnlyArg::Add => ResultType::Add,
            OnlyArg::Change => ResultType::Change,
            OnlyArg::Delete => ResultType::Delete,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let result = match cli.command {
        Commands::Diff {
            source,
            target,
            dialect,
            output,
            only,
            config,
        } => handle_diff(
            &source,
            &target,
            dialect.as_deref(),
            output.as_deref(),
            only.map(ResultType::from),
            config.as_deref(),
        ),
        Commands::Summary { source, target } => handle_summary(&source, &target),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>, dialect: Option<&str>) -> Result<CompareConfig> {
    let mut config = match path {
        Some(path) => CompareConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => CompareConfig::load().context("Failed to load configuration")?,
    };
    if let Some(dialect) = dialect {
        config.dialect = dialect.parse::<Dialect>()?;
    }
    Ok(config)
}

fn compare_files(source: &Path, target: &Path, config: &CompareConfig) -> Result<Vec<CompareResult>> {
    let left = load_snapshot(source)?;
    let right = load_snapshot(target)?;
    let comparer: SchemaComparer<SqlScriptWriter> = SchemaComparer::from_config(config);
    let results = comparer
        .compare(&left, &right)
        .with_context(|| format!("Failed to compare {} with {}", source.display(), target.display()))?;
    Ok(results)
}

fn handle_diff(
    source: &Path,
    target: &Path,
    dialect: Option<&str>,
    output: Option<&Path>,
    only: Option<ResultType>,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config, dialect)?;
    log::info!("Rendering {} scripts", config.dialect);

    let results = compare_files(source, target, &config)?;
    let groups = report::group_results(&results, only);

    if let Some(output) = output {
        fs::write(output, report::render_script_file(&groups))
            .with_context(|| format!("Failed to write scripts to {}", output.display()))?;
        println!("✅ Wrote {} script(s) to {}", count(&groups), output.display());
    } else if groups.is_empty() {
        println!("✅ No differences");
    } else {
        report::print_groups(&groups);
    }

    Ok(())
}

fn handle_summary(source: &Path, target: &Path) -> Result<()> {
    let left = load_snapshot(source)?;
    let right = load_snapshot(target)?;
    let summary = report::summarize(&left, &right)
        .with_context(|| format!("Failed to compare {} with {}", source.display(), target.display()))?;
    report::print_summary(&summary);
    Ok(())
}

fn count(groups: &[report::ScriptGroup<'_>]) -> usize {
    groups.iter().map(|group| group.results.len()).sum()
}

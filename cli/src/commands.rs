//! Command implementations for tablediff CLI

use crate::cli::Commands;
use crate::output::{JsonFormatter, PrettyPrinter};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tablediff_core::config::{load_config, resolve_config_path};
use tablediff_core::{build_table_diffs, remove_unsupported_indexes, SchemaSnapshot, TableDiff};

/// Execute a command
pub fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Normalize { input, output } => normalize_command(&input, output.as_deref()),
        Commands::Plan {
            config,
            upstream,
            downstream,
            json,
        } => plan_command(config.as_deref(), &upstream, &downstream, json),
        Commands::Fingerprint { input } => fingerprint_command(&input),
    }
}

fn read_table_diffs(path: &Path) -> Result<Vec<TableDiff>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptors from {}", path.display()))?;
    let table_diffs: Vec<TableDiff> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse descriptors in {}", path.display()))?;
    log::debug!("Read {} descriptor(s) from {}", table_diffs.len(), path.display());
    Ok(table_diffs)
}

fn normalize_command(input: &Path, output: Option<&Path>) -> Result<()> {
    let table_diffs = remove_unsupported_indexes(read_table_diffs(input)?)?;
    let json = serde_json::to_string_pretty(&table_diffs)?;

    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {} descriptor(s) to {}", table_diffs.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn plan_command(
    config: Option<&Path>,
    upstream: &Path,
    downstream: &Path,
    json: bool,
) -> Result<()> {
    let config_path = resolve_config_path(config)?;
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    let upstream = SchemaSnapshot::load(upstream)
        .with_context(|| format!("Failed to load upstream snapshot {}", upstream.display()))?;
    let downstream = SchemaSnapshot::load(downstream).with_context(|| {
        format!("Failed to load downstream snapshot {}", downstream.display())
    })?;

    let table_diffs = build_table_diffs(&config, &upstream, &downstream)?;

    if json {
        println!("{}", JsonFormatter::format_plan(&table_diffs)?);
    } else {
        PrettyPrinter::print_plan(&table_diffs)?;
    }
    Ok(())
}

fn fingerprint_command(input: &Path) -> Result<()> {
    for line in fingerprint_lines(input)? {
        println!("{line}");
    }
    Ok(())
}

fn fingerprint_lines(input: &Path) -> Result<Vec<String>> {
    read_table_diffs(input)?
        .iter()
        .map(|table_diff| -> Result<String> {
            Ok(format!(
                "{}\t{}",
                table_diff.full_name(),
                table_diff.fingerprint()?
            ))
        })
        .collect()
}

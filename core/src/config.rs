use crate::error::{Result, TableDiffError};
use crate::source::TableSource;
use crate::table_diff::{TableDiff, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file path
pub const CONFIG_ENV_VAR: &str = "TABLEDIFF_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TaskConfig {
    /// Tables to compare, as "schema.table" patterns ("*" wildcards allowed)
    #[serde(default = "default_check_tables")]
    pub check_tables: Vec<String>,

    /// Tables to skip (same pattern syntax)
    #[serde(default)]
    pub exclude_tables: Vec<String>,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: i64,

    #[serde(default)]
    pub collation: String,

    /// Per-table overrides
    #[serde(default)]
    pub table_configs: Vec<TableConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct TableConfig {
    /// Tables this override applies to (same pattern syntax)
    pub target_tables: Vec<String>,

    pub fields: Option<String>,

    pub range: Option<String>,

    #[serde(default)]
    pub ignore_columns: Vec<String>,

    #[serde(default)]
    pub ignore_data_check: bool,

    pub chunk_size: Option<i64>,

    pub collation: Option<String>,
}

fn default_check_tables() -> Vec<String> {
    vec!["*.*".to_string()]
}

fn default_chunk_size() -> i64 {
    DEFAULT_CHUNK_SIZE
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            check_tables: default_check_tables(),
            exclude_tables: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            collation: String::new(),
            table_configs: Vec::new(),
        }
    }
}

impl TaskConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TaskConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.chunk_size <= 0 {
            return Err(TableDiffError::config(format!(
                "chunk-size must be positive, got {}",
                self.chunk_size
            )));
        }

        for pattern in self
            .check_tables
            .iter()
            .chain(&self.exclude_tables)
            .chain(self.table_configs.iter().flat_map(|tc| &tc.target_tables))
        {
            split_pattern(pattern)?;
        }

        for table_config in &self.table_configs {
            if table_config.target_tables.is_empty() {
                return Err(TableDiffError::config(
                    "table-configs entry has no target-tables",
                ));
            }
            if let Some(chunk_size) = table_config.chunk_size {
                if chunk_size <= 0 {
                    return Err(TableDiffError::config(format!(
                        "chunk-size for {:?} must be positive, got {chunk_size}",
                        table_config.target_tables
                    )));
                }
            }
        }

        Ok(())
    }

    /// Whether the table is selected by `check-tables` and not excluded
    pub fn is_table_checked(&self, table: &TableSource) -> bool {
        let included = self
            .check_tables
            .iter()
            .any(|pattern| matches_table(pattern, table));
        let excluded = self
            .exclude_tables
            .iter()
            .any(|pattern| matches_table(pattern, table));

        included && !excluded
    }

    /// The override entry for a table, if any. More than one match is an error.
    pub fn table_config_for(&self, table: &TableSource) -> Result<Option<&TableConfig>> {
        let mut matching = self.table_configs.iter().filter(|tc| {
            tc.target_tables
                .iter()
                .any(|pattern| matches_table(pattern, table))
        });

        let first = matching.next();
        if matching.next().is_some() {
            return Err(TableDiffError::config(format!(
                "table {table} matches more than one table-configs entry"
            )));
        }
        Ok(first)
    }

    /// Fill a descriptor's user-facing settings from the task defaults and
    /// the table's override entry
    pub fn apply_to(&self, table_diff: &mut TableDiff) -> Result<()> {
        table_diff.chunk_size = self.chunk_size;
        table_diff.collation = self.collation.clone();

        let source = TableSource::new(table_diff.schema.clone(), table_diff.table.clone());
        if let Some(table_config) = self.table_config_for(&source)? {
            if let Some(fields) = &table_config.fields {
                table_diff.fields = fields.clone();
            }
            if let Some(range) = &table_config.range {
                table_diff.range = range.clone();
            }
            if let Some(chunk_size) = table_config.chunk_size {
                table_diff.chunk_size = chunk_size;
            }
            if let Some(collation) = &table_config.collation {
                table_diff.collation = collation.clone();
            }
            table_diff
                .ignore_columns
                .extend(table_config.ignore_columns.iter().cloned());
            table_diff.ignore_data_check = table_config.ignore_data_check;
        }

        Ok(())
    }
}

/// Resolve which config file to read: `TABLEDIFF_CONFIG` wins over the given path
pub fn resolve_config_path(path: Option<&Path>) -> Result<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(env_path));
    }
    path.map(Path::to_path_buf).ok_or_else(|| {
        TableDiffError::config(format!(
            "no config file given and {CONFIG_ENV_VAR} is not set"
        ))
    })
}

pub fn load_config(path: &Path) -> Result<TaskConfig> {
    let content = fs::read_to_string(path)?;
    let config = TaskConfig::from_toml_str(&content)?;
    log::debug!(
        "Loaded config from {}: {} table pattern(s), {} override(s)",
        path.display(),
        config.check_tables.len(),
        config.table_configs.len()
    );
    Ok(config)
}

fn split_pattern(pattern: &str) -> Result<(&str, &str)> {
    match pattern.split_once('.') {
        Some((schema, table)) if !schema.is_empty() && !table.is_empty() => Ok((schema, table)),
        _ => Err(TableDiffError::config(format!(
            "table pattern '{pattern}' must look like 'schema.table'"
        ))),
    }
}

/// Match a "schema.table" pattern against a table
pub fn matches_table(pattern: &str, table: &TableSource) -> bool {
    match split_pattern(pattern) {
        Ok((schema_pattern, table_pattern)) => {
            matches_pattern(&table.origin_schema, schema_pattern)
                && matches_pattern(&table.origin_table, table_pattern)
        }
        Err(_) => false,
    }
}

/// Simple pattern matching for names (supports * wildcard)
fn matches_pattern(name: &str, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        name.starts_with(prefix)
    } else if let Some(suffix) = pattern.strip_prefix('*') {
        name.ends_with(suffix)
    } else {
        name == pattern
    }
}

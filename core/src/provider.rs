//! Schema metadata providers

use crate::error::{Result, TableDiffError};
use crate::schema::TableInfo;
use crate::source::TableSource;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Supplies table metadata for one side of a comparison
pub trait SchemaProvider {
    /// Every table this side knows about, in a stable order
    fn tables(&self) -> Result<Vec<TableSource>>;

    /// Metadata for one table, `None` if the table does not exist
    fn table_info(&self, schema: &str, table: &str) -> Result<Option<TableInfo>>;
}

/// Schema metadata captured ahead of time, keyed by schema then table
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaSnapshot {
    schemas: IndexMap<String, IndexMap<String, TableInfo>>,
}

impl SchemaSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, schema: impl Into<String>, info: TableInfo) {
        self.schemas
            .entry(schema.into())
            .or_default()
            .insert(info.name.clone(), info);
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let snapshot: SchemaSnapshot = serde_json::from_str(content)?;
        for (schema, tables) in &snapshot.schemas {
            for (key, info) in tables {
                if key != &info.name {
                    return Err(TableDiffError::invalid_input(format!(
                        "snapshot entry {schema}.{key} holds metadata for table '{}'",
                        info.name
                    )));
                }
            }
        }
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&content)?;
        log::debug!(
            "Loaded schema snapshot from {}: {} schema(s)",
            path.display(),
            snapshot.schemas.len()
        );
        Ok(snapshot)
    }
}

impl SchemaProvider for SchemaSnapshot {
    fn tables(&self) -> Result<Vec<TableSource>> {
        Ok(self
            .schemas
            .iter()
            .flat_map(|(schema, tables)| {
                tables
                    .keys()
                    .map(move |table| TableSource::new(schema.clone(), table.clone()))
            })
            .collect())
    }

    fn table_info(&self, schema: &str, table: &str) -> Result<Option<TableInfo>> {
        Ok(self
            .schemas
            .get(schema)
            .and_then(|tables| tables.get(table))
            .cloned())
    }
}

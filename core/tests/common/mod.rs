//! Common test utilities and fixtures

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tablediff_core::{ColumnInfo, ColumnType, IndexColumn, IndexInfo, TableDiff, TableInfo};
use tempfile::TempDir;

/// Builds a descriptor; columns are (name, hidden), indices list column offsets
pub fn table(
    schema: &str,
    name: &str,
    columns: &[(&str, bool)],
    indices: &[(&str, &[usize])],
) -> TableDiff {
    let columns: Vec<ColumnInfo> = columns
        .iter()
        .enumerate()
        .map(|(offset, (col, hidden))| ColumnInfo {
            name: col.to_string(),
            offset,
            column_type: ColumnType::Integer,
            nullable: true,
            hidden: *hidden,
            generated_expr: hidden.then(|| format!("upper(`{col}`)")),
        })
        .collect();

    let indices = indices
        .iter()
        .map(|(index_name, offsets)| IndexInfo {
            name: index_name.to_string(),
            columns: offsets
                .iter()
                .map(|&offset| IndexColumn {
                    name: columns[offset].name.clone(),
                    offset,
                    length: None,
                })
                .collect(),
            unique: false,
            primary: false,
        })
        .collect();

    TableDiff::new(
        schema,
        name,
        TableInfo {
            name: name.to_string(),
            columns,
            indices,
        },
    )
}

pub fn column_names(diff: &TableDiff) -> Vec<&str> {
    diff.info.columns.iter().map(|c| c.name.as_str()).collect()
}

pub fn index_names(diff: &TableDiff) -> Vec<&str> {
    diff.info.indices.iter().map(|i| i.name.as_str()).collect()
}

/// A temporary directory holding config and snapshot files
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().to_path_buf();
        Self { temp_dir, path }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let target = self.path.join(name);
        fs::write(&target, content).expect("Failed to write test file");
        target
    }
}

//! Builders for schema metadata used across tests

use crate::schema::{ColumnInfo, ColumnType, IndexColumn, IndexInfo, TableInfo};
use crate::table_diff::TableDiff;

pub fn column(name: &str, offset: usize) -> ColumnInfo {
    ColumnInfo {
        name: name.to_string(),
        offset,
        column_type: ColumnType::Integer,
        nullable: true,
        hidden: false,
        generated_expr: None,
    }
}

pub fn typed_column(name: &str, offset: usize, column_type: ColumnType) -> ColumnInfo {
    ColumnInfo {
        column_type,
        ..column(name, offset)
    }
}

/// A generated column backing an expression index
pub fn hidden_column(name: &str, offset: usize) -> ColumnInfo {
    ColumnInfo {
        hidden: true,
        generated_expr: Some(format!("lower(`{name}`)")),
        ..column(name, offset)
    }
}

pub fn index(name: &str, columns: &[(&str, usize)]) -> IndexInfo {
    IndexInfo {
        name: name.to_string(),
        columns: columns
            .iter()
            .map(|(col, offset)| IndexColumn {
                name: col.to_string(),
                offset: *offset,
                length: None,
            })
            .collect(),
        unique: false,
        primary: name == "PRIMARY",
    }
}

pub fn table_info(name: &str, columns: Vec<ColumnInfo>, indices: Vec<IndexInfo>) -> TableInfo {
    TableInfo {
        name: name.to_string(),
        columns,
        indices,
    }
}

pub fn table_diff(schema: &str, info: TableInfo) -> TableDiff {
    let table = info.name.clone();
    TableDiff::new(schema, table, info)
}

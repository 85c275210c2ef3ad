//! Table structure metadata as supplied by a schema provider

use serde::{Deserialize, Serialize};

/// Broad column type classes, enough to drive comparison decisions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Decimal,
    Float,
    String,
    Binary,
    Json,
    Date,
    Datetime,
    Timestamp,
    Time,
    #[default]
    Other,
}

/// Column metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    /// Position of this column in the table's original column list
    pub offset: usize,
    #[serde(default, rename = "type")]
    pub column_type: ColumnType,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Internally generated column, e.g. the one backing an expression index
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_expr: Option<String>,
}

fn default_nullable() -> bool {
    true
}

/// A column reference inside an index. `offset` points into the table's
/// original column list, not at a name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexColumn {
    pub name: String,
    pub offset: usize,
    /// Prefix length, for prefix indexes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

/// Index metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexInfo {
    pub name: String,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub primary: bool,
}

/// Table metadata: columns and indices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TableInfo {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
    #[serde(default)]
    pub indices: Vec<IndexInfo>,
}

impl TableInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up a column by name, ignoring ASCII case
    pub fn find_column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns
            .iter()
            .find(|col| col.name.eq_ignore_ascii_case(name))
    }

    pub fn has_hidden_columns(&self) -> bool {
        self.columns.iter().any(|col| col.hidden)
    }

    /// Whether any visible column needs a unified time zone on both sides
    pub fn has_timestamp_column(&self) -> bool {
        self.columns
            .iter()
            .any(|col| !col.hidden && col.column_type == ColumnType::Timestamp)
    }

    pub fn primary_key(&self) -> Option<&IndexInfo> {
        self.indices.iter().find(|index| index.primary)
    }
}

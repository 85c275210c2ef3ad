//! Per-table comparison descriptor

use crate::error::{Result, TableDiffError};
use crate::schema::{ColumnInfo, TableInfo};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chunk size used when neither the table nor the task config sets one
pub const DEFAULT_CHUNK_SIZE: i64 = 1000;

/// Which side(s) of the comparison actually hold the table.
///
/// Encoded as 0 (both), +1 (upstream only) and -1 (downstream only) wherever
/// it is written out as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum TableExistence {
    #[default]
    Both,
    UpstreamOnly,
    DownstreamOnly,
}

impl TableExistence {
    pub fn from_presence(upstream: bool, downstream: bool) -> Option<Self> {
        match (upstream, downstream) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::UpstreamOnly),
            (false, true) => Some(Self::DownstreamOnly),
            (false, false) => None,
        }
    }

    pub fn flag(self) -> i32 {
        match self {
            Self::Both => 0,
            Self::UpstreamOnly => 1,
            Self::DownstreamOnly => -1,
        }
    }

    pub fn exists_on_both_sides(self) -> bool {
        self == Self::Both
    }
}

impl From<TableExistence> for i32 {
    fn from(existence: TableExistence) -> Self {
        existence.flag()
    }
}

impl TryFrom<i32> for TableExistence {
    type Error = TableDiffError;

    fn try_from(flag: i32) -> Result<Self> {
        match flag {
            0 => Ok(Self::Both),
            1 => Ok(Self::UpstreamOnly),
            -1 => Ok(Self::DownstreamOnly),
            other => Err(TableDiffError::invalid_input(format!(
                "unknown table existence flag {other}, expected 0, 1 or -1"
            ))),
        }
    }
}

impl fmt::Display for TableExistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableExistence::Both => write!(f, "both"),
            TableExistence::UpstreamOnly => write!(f, "upstream only"),
            TableExistence::DownstreamOnly => write!(f, "downstream only"),
        }
    }
}

/// Comparison config for one table pair.
///
/// Only the persisted subset is serialized; `ignore_columns`,
/// `ignore_data_check`, `need_unified_time_zone` and `existence` are runtime
/// flags and come back as defaults after a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDiff {
    /// Database name after routing
    pub schema: String,
    /// Table name after routing
    pub table: String,
    pub info: TableInfo,

    #[serde(skip)]
    pub ignore_columns: IndexSet<String>,

    /// Primary key, unique key or indexed field(s), comma separated
    #[serde(default)]
    pub fields: String,

    /// Opaque predicate, e.g. "age > 10 AND age < 20"
    #[serde(default)]
    pub range: String,

    #[serde(skip)]
    pub ignore_data_check: bool,

    /// Set when the table has a timestamp column and both sides must agree on time_zone
    #[serde(skip)]
    pub need_unified_time_zone: bool,

    #[serde(default)]
    pub collation: String,

    #[serde(rename = "chunk-size", default)]
    pub chunk_size: i64,

    #[serde(skip)]
    pub existence: TableExistence,
}

impl TableDiff {
    pub fn new(schema: impl Into<String>, table: impl Into<String>, info: TableInfo) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            info,
            ignore_columns: IndexSet::new(),
            fields: String::new(),
            range: String::new(),
            ignore_data_check: false,
            need_unified_time_zone: false,
            collation: String::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            existence: TableExistence::Both,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    pub fn exists_on_both_sides(&self) -> bool {
        self.existence.exists_on_both_sides()
    }

    /// Names listed in `fields`, trimmed, empty entries dropped
    pub fn field_names(&self) -> Vec<&str> {
        self.fields
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    fn is_ignored(&self, column: &str) -> bool {
        self.ignore_columns
            .iter()
            .any(|ignored| ignored.eq_ignore_ascii_case(column))
    }

    /// Columns that take part in row comparison: everything left in `info`
    /// minus the user's ignore list. Call after normalization.
    pub fn compared_columns(&self) -> impl Iterator<Item = &ColumnInfo> + '_ {
        self.info
            .columns
            .iter()
            .filter(move |col| !col.hidden && !self.is_ignored(&col.name))
    }

    /// Check the descriptor is usable by the diff engine
    pub fn validate(&self) -> Result<()> {
        if self.schema.is_empty() || self.table.is_empty() {
            return Err(TableDiffError::invalid_input(format!(
                "table descriptor needs both schema and table, got '{}'",
                self.full_name()
            )));
        }

        if !self.ignore_data_check && self.chunk_size <= 0 {
            return Err(TableDiffError::invalid_input(format!(
                "chunk-size for {} must be positive, got {}",
                self.full_name(),
                self.chunk_size
            )));
        }

        for field in self.field_names() {
            match self.info.find_column(field) {
                Some(col) if !col.hidden => {}
                _ => {
                    return Err(TableDiffError::invalid_input(format!(
                        "field '{field}' of {} is not a column of the table",
                        self.full_name()
                    )))
                }
            }
        }

        Ok(())
    }

    /// blake3 digest of the persisted form. Runtime-only flags do not affect it.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

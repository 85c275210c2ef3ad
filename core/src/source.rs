//! Table identities before routing, including shard-aware identities that
//! carry a borrowed database connection

use crate::error::{Result, TableDiffError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that names a table as it exists at its origin (before router rewrites)
pub trait TableIdentity {
    fn origin_schema(&self) -> &str;
    fn origin_table(&self) -> &str;

    /// `` `schema`.`table` `` with embedded backticks doubled
    fn quoted_name(&self) -> String {
        format!(
            "`{}`.`{}`",
            self.origin_schema().replace('`', "``"),
            self.origin_table().replace('`', "``")
        )
    }
}

/// A live database connection owned by an external pool.
///
/// The pool opens and closes the connection; holders only borrow it.
pub trait ConnectionHandle {
    /// Whether the connection can still be used
    fn is_open(&self) -> bool;

    /// Label for log output. Must not contain credentials.
    fn describe(&self) -> String;
}

/// Origin schema and table of a TiDB/MySQL source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableSource {
    pub origin_schema: String,
    pub origin_table: String,
}

impl TableSource {
    pub fn new(origin_schema: impl Into<String>, origin_table: impl Into<String>) -> Self {
        Self {
            origin_schema: origin_schema.into(),
            origin_table: origin_table.into(),
        }
    }
}

impl TableIdentity for TableSource {
    fn origin_schema(&self) -> &str {
        &self.origin_schema
    }

    fn origin_table(&self) -> &str {
        &self.origin_table
    }
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.origin_schema, self.origin_table)
    }
}

/// A table in one MySQL shard. The same logical table may live in several
/// shards, each reached through its own connection.
pub struct ShardTableSource<'conn, C: ConnectionHandle + ?Sized> {
    pub source: TableSource,
    conn: &'conn C,
}

impl<'conn, C: ConnectionHandle + ?Sized> ShardTableSource<'conn, C> {
    pub fn new(source: TableSource, conn: &'conn C) -> Self {
        Self { source, conn }
    }

    /// The shard connection, or a connection error if the pool has closed it
    pub fn connection(&self) -> Result<&'conn C> {
        if self.conn.is_open() {
            Ok(self.conn)
        } else {
            Err(TableDiffError::connection(format!(
                "connection {} for shard table {} is closed",
                self.conn.describe(),
                self.source
            )))
        }
    }
}

impl<C: ConnectionHandle + ?Sized> TableIdentity for ShardTableSource<'_, C> {
    fn origin_schema(&self) -> &str {
        &self.source.origin_schema
    }

    fn origin_table(&self) -> &str {
        &self.source.origin_table
    }
}

impl<C: ConnectionHandle + ?Sized> fmt::Debug for ShardTableSource<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardTableSource")
            .field("source", &self.source)
            .field("conn", &self.conn.describe())
            .finish()
    }
}

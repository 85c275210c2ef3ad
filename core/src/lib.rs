//! # tablediff-core
//!
//! Core library for tablediff - describes the table pairs of a cross-database
//! comparison and normalizes their schema metadata before it is handed to a
//! diff engine.
//!
//! This crate does no SQL of its own. Chunking, checksumming and row
//! comparison belong to the engine that consumes the descriptors built here.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod schema;
pub mod source;
pub mod table_diff;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod test_fixtures;

// Re-export the most commonly used types for convenience
pub use bootstrap::build_table_diffs;
pub use config::TaskConfig;
pub use error::{Result, TableDiffError};
pub use normalize::remove_unsupported_indexes;
pub use provider::{SchemaProvider, SchemaSnapshot};
pub use schema::{ColumnInfo, ColumnType, IndexColumn, IndexInfo, TableInfo};
pub use source::{ConnectionHandle, ShardTableSource, TableIdentity, TableSource};
pub use table_diff::{TableDiff, TableExistence};

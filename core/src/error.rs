//! Error types for tablediff-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TableDiffError>;

#[derive(Error, Debug)]
pub enum TableDiffError {
    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An index refers to a column position past the end of the table's column list.
    #[error(
        "Index '{index}' on {schema}.{table} references column offset {offset}, \
         but the table only has {columns} columns"
    )]
    IndexOffsetOutOfRange {
        schema: String,
        table: String,
        index: String,
        offset: usize,
        columns: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TableDiffError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

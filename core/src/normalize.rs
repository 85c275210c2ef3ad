//! Removal of hidden columns, and of every index that depends on one, from
//! table descriptors before they reach the diff engine

use crate::error::{Result, TableDiffError};
use crate::schema::{IndexInfo, TableInfo};
use crate::table_diff::TableDiff;

/// Strip hidden columns and the indexes using them from every descriptor.
///
/// Descriptors are processed in order. If one carries an index whose column
/// offset lies outside its column list, that descriptor is left untouched and
/// the error is returned; descriptors before it have already been normalized.
///
/// Kept indexes and columns keep the offsets they had in the original column
/// list. Once hidden columns are gone those offsets are no longer positions
/// in `info.columns`, so resolve index columns by `IndexColumn::name`.
pub fn remove_unsupported_indexes(mut table_diffs: Vec<TableDiff>) -> Result<Vec<TableDiff>> {
    for table_diff in &mut table_diffs {
        normalize_table_diff(table_diff)?;
    }
    Ok(table_diffs)
}

/// Normalize one descriptor in place. Returns whether anything changed.
pub fn normalize_table_diff(table_diff: &mut TableDiff) -> Result<bool> {
    let TableDiff {
        schema,
        table,
        info,
        ..
    } = table_diff;
    normalize_table_info(schema, table, info)
}

fn normalize_table_info(schema: &str, table: &str, info: &mut TableInfo) -> Result<bool> {
    let columns: Vec<_> = info.columns.iter().filter(|col| !col.hidden).cloned().collect();

    // nothing hidden, indexes can stay as they are
    if columns.len() == info.columns.len() {
        return Ok(false);
    }

    let mut indices = Vec::with_capacity(info.indices.len());
    for index in &info.indices {
        if references_hidden_column(schema, table, info, index)? {
            log::debug!(
                "Dropping index '{}' on {schema}.{table}: it uses a hidden column",
                index.name
            );
            continue;
        }
        indices.push(index.clone());
    }

    let dropped_columns = info.columns.len() - columns.len();
    let dropped_indices = info.indices.len() - indices.len();
    log::info!(
        "Normalized {schema}.{table}: removed {dropped_columns} hidden column(s) and {dropped_indices} index(es)"
    );

    // offsets above are resolved against the original column list, so swap last
    info.columns = columns;
    info.indices = indices;
    Ok(true)
}

fn references_hidden_column(
    schema: &str,
    table: &str,
    info: &TableInfo,
    index: &IndexInfo,
) -> Result<bool> {
    for index_col in &index.columns {
        let col = info.columns.get(index_col.offset).ok_or_else(|| {
            TableDiffError::IndexOffsetOutOfRange {
                schema: schema.to_string(),
                table: table.to_string(),
                index: index.name.clone(),
                offset: index_col.offset,
                columns: info.columns.len(),
            }
        })?;
        if col.hidden {
            return Ok(true);
        }
    }
    Ok(false)
}

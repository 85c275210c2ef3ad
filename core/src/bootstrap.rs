//! Build the normalized descriptor list for a comparison run

use crate::config::TaskConfig;
use crate::error::Result;
use crate::normalize::remove_unsupported_indexes;
use crate::provider::SchemaProvider;
use crate::source::TableSource;
use crate::table_diff::{TableDiff, TableExistence};
use indexmap::IndexSet;

/// Collect every checked table from both sides, classify where it exists,
/// apply the task config and normalize the result.
///
/// Upstream tables come first in upstream order, then tables found only
/// downstream. Metadata is taken from the downstream side when it has the
/// table.
pub fn build_table_diffs(
    config: &TaskConfig,
    upstream: &dyn SchemaProvider,
    downstream: &dyn SchemaProvider,
) -> Result<Vec<TableDiff>> {
    let mut sources: IndexSet<TableSource> = IndexSet::new();
    for source in upstream.tables()?.into_iter().chain(downstream.tables()?) {
        if config.is_table_checked(&source) {
            sources.insert(source);
        }
    }

    let mut table_diffs = Vec::with_capacity(sources.len());
    for source in sources {
        let up = upstream.table_info(&source.origin_schema, &source.origin_table)?;
        let down = downstream.table_info(&source.origin_schema, &source.origin_table)?;

        let Some(existence) = TableExistence::from_presence(up.is_some(), down.is_some()) else {
            continue;
        };
        if !existence.exists_on_both_sides() {
            log::warn!("Table {source} exists {existence}");
        }

        let Some(info) = down.or(up) else {
            continue;
        };

        let mut table_diff = TableDiff::new(source.origin_schema, source.origin_table, info);
        table_diff.existence = existence;
        table_diff.need_unified_time_zone = table_diff.info.has_timestamp_column();
        config.apply_to(&mut table_diff)?;
        table_diffs.push(table_diff);
    }

    let table_diffs = remove_unsupported_indexes(table_diffs)?;
    for table_diff in table_diffs.iter().filter(|td| td.exists_on_both_sides()) {
        table_diff.validate()?;
    }

    log::info!("Prepared {} table(s) for comparison", table_diffs.len());
    Ok(table_diffs)
}

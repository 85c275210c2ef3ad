//! Output formatting utilities

use tablediff_core::{Result, TableDiff};

/// Pretty printer for tablediff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the comparison plan
    pub fn print_plan(table_diffs: &[TableDiff]) -> Result<()> {
        print!("{}", Self::format_plan(table_diffs)?);
        Ok(())
    }

    pub fn format_plan(table_diffs: &[TableDiff]) -> Result<String> {
        if table_diffs.is_empty() {
            return Ok("No tables to compare.\n".to_string());
        }

        let one_sided = table_diffs
            .iter()
            .filter(|td| !td.exists_on_both_sides())
            .count();
        let mut out = format!(
            "Comparison plan: {} table(s), {} on one side only\n",
            table_diffs.len(),
            one_sided
        );

        for (i, table_diff) in table_diffs.iter().enumerate() {
            let last = i == table_diffs.len() - 1;
            let (branch, indent) = if last { ("└─", "   ") } else { ("├─", "│  ") };

            out.push_str(&format!(
                "{branch} {} ({})\n",
                table_diff.full_name(),
                table_diff.existence
            ));
            out.push_str(&format!(
                "{indent}├─ Columns: {} compared of {}\n",
                table_diff.compared_columns().count(),
                table_diff.info.columns.len()
            ));
            out.push_str(&format!(
                "{indent}├─ Indices: {}\n",
                table_diff.info.indices.len()
            ));
            if !table_diff.fields.is_empty() {
                out.push_str(&format!("{indent}├─ Fields: {}\n", table_diff.fields));
            }
            if !table_diff.range.is_empty() {
                out.push_str(&format!("{indent}├─ Range: {}\n", table_diff.range));
            }
            if table_diff.ignore_data_check {
                out.push_str(&format!("{indent}├─ Data check: skipped\n"));
            }
            out.push_str(&format!(
                "{indent}└─ Fingerprint: {}\n",
                table_diff.fingerprint()?
            ));
        }

        Ok(out)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// The persisted descriptor plus the runtime flags a report needs
    pub fn format_plan(table_diffs: &[TableDiff]) -> Result<String> {
        let tables = table_diffs
            .iter()
            .map(|table_diff| {
                Ok(serde_json::json!({
                    "descriptor": table_diff,
                    "existence": table_diff.existence,
                    "ignore_columns": table_diff.ignore_columns,
                    "ignore_data_check": table_diff.ignore_data_check,
                    "need_unified_time_zone": table_diff.need_unified_time_zone,
                    "fingerprint": table_diff.fingerprint()?,
                }))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(serde_json::to_string_pretty(&tables)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablediff_core::test_fixtures::{column, index, table_diff, table_info};
    use tablediff_core::TableExistence;

    fn plan() -> Vec<TableDiff> {
        let mut orders = table_diff(
            "shop",
            table_info(
                "orders",
                vec![column("id", 0), column("note", 1)],
                vec![index("PRIMARY", &[("id", 0)])],
            ),
        );
        orders.fields = "id".to_string();
        orders.ignore_columns.insert("note".to_string());

        let mut legacy = table_diff("shop", table_info("legacy", vec![column("id", 0)], vec![]));
        legacy.existence = TableExistence::UpstreamOnly;
        vec![orders, legacy]
    }

    #[test]
    fn test_format_plan() {
        let text = PrettyPrinter::format_plan(&plan()).unwrap();
        assert!(text.starts_with("Comparison plan: 2 table(s), 1 on one side only\n"));
        assert!(text.contains("├─ shop.orders (both)\n"));
        assert!(text.contains("│  ├─ Columns: 1 compared of 2\n"));
        assert!(text.contains("│  ├─ Fields: id\n"));
        assert!(text.contains("└─ shop.legacy (upstream only)\n"));
    }

    #[test]
    fn test_format_empty_plan() {
        assert_eq!(
            PrettyPrinter::format_plan(&[]).unwrap(),
            "No tables to compare.\n"
        );
    }

    #[test]
    fn test_json_plan_carries_existence_flag() {
        let json = JsonFormatter::format_plan(&plan()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["existence"], 0);
        assert_eq!(value[1]["existence"], 1);
        assert_eq!(value[0]["descriptor"]["chunk-size"], 1000);
        assert_eq!(value[0]["ignore_columns"][0], "note");
        assert!(value[0]["descriptor"].get("existence").is_none());
    }
}

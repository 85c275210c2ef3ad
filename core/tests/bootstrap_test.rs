mod common;

use common::TestWorkspace;
use tablediff_core::config::load_config;
use tablediff_core::{build_table_diffs, Result, SchemaSnapshot, TableExistence};

const CONFIG: &str = r#"
check-tables = ["shop.*"]
exclude-tables = ["shop.tmp_*"]
chunk-size = 500

[[table-configs]]
target-tables = ["shop.orders"]
fields = "id"
range = "id > 100"
ignore-columns = ["updated_at"]
"#;

const UPSTREAM: &str = r#"{
  "schemas": {
    "shop": {
      "orders": {
        "name": "orders",
        "columns": [
          {"name": "id", "offset": 0, "type": "integer", "nullable": false},
          {"name": "updated_at", "offset": 1, "type": "timestamp"}
        ],
        "indices": [{"name": "PRIMARY", "primary": true, "unique": true,
                     "columns": [{"name": "id", "offset": 0}]}]
      },
      "tmp_load": {"name": "tmp_load", "columns": [{"name": "id", "offset": 0}]},
      "archive": {"name": "archive", "columns": [{"name": "id", "offset": 0}]}
    }
  }
}"#;

const DOWNSTREAM: &str = r#"{
  "schemas": {
    "shop": {
      "orders": {
        "name": "orders",
        "columns": [
          {"name": "id", "offset": 0, "type": "integer", "nullable": false},
          {"name": "updated_at", "offset": 1, "type": "timestamp"},
          {"name": "_V$_idx_upd_0", "offset": 2, "type": "string", "hidden": true,
           "generated_expr": "date(`updated_at`)"}
        ],
        "indices": [
          {"name": "PRIMARY", "primary": true, "unique": true,
           "columns": [{"name": "id", "offset": 0}]},
          {"name": "idx_upd_day", "columns": [{"name": "_V$_idx_upd_0", "offset": 2}]}
        ]
      }
    }
  }
}"#;

#[test]
fn test_plan_from_files() -> Result<()> {
    let workspace = TestWorkspace::new();
    let config = load_config(&workspace.write("task.toml", CONFIG))?;
    let upstream = SchemaSnapshot::load(&workspace.write("up.json", UPSTREAM))?;
    let downstream = SchemaSnapshot::load(&workspace.write("down.json", DOWNSTREAM))?;

    let diffs = build_table_diffs(&config, &upstream, &downstream)?;
    assert_eq!(diffs.len(), 2);

    let orders = &diffs[0];
    assert_eq!(orders.full_name(), "shop.orders");
    assert_eq!(orders.existence, TableExistence::Both);
    assert_eq!(orders.existence.flag(), 0);
    assert_eq!(orders.fields, "id");
    assert_eq!(orders.range, "id > 100");
    assert_eq!(orders.chunk_size, 500);
    assert!(orders.need_unified_time_zone);
    assert_eq!(orders.info.columns.len(), 2);
    assert_eq!(orders.info.indices.len(), 1);
    assert_eq!(orders.compared_columns().count(), 1);

    let archive = &diffs[1];
    assert_eq!(archive.full_name(), "shop.archive");
    assert_eq!(archive.existence, TableExistence::UpstreamOnly);
    assert_eq!(archive.existence.flag(), 1);
    assert!(!archive.exists_on_both_sides());
    Ok(())
}

#[test]
fn test_persisted_plan_round_trip() -> Result<()> {
    let workspace = TestWorkspace::new();
    let config = load_config(&workspace.write("task.toml", CONFIG))?;
    let upstream = SchemaSnapshot::from_json_str(UPSTREAM)?;
    let downstream = SchemaSnapshot::from_json_str(DOWNSTREAM)?;

    let diffs = build_table_diffs(&config, &upstream, &downstream)?;
    let json = serde_json::to_string(&diffs)?;
    assert!(json.contains("\"chunk-size\":500"));
    assert!(!json.contains("ignore"));
    assert!(!json.contains("existence"));

    let restored: Vec<tablediff_core::TableDiff> = serde_json::from_str(&json)?;
    for (before, after) in diffs.iter().zip(&restored) {
        assert_eq!(before.info, after.info);
        assert_eq!(before.fingerprint()?, after.fingerprint()?);
        assert_eq!(after.existence, TableExistence::Both);
    }
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let workspace = TestWorkspace::new();
    assert!(load_config(&workspace.path.join("absent.toml")).is_err());
}

mod common;

use std::fs;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::str::contains;

fn employee_sync() -> Command {
    Command::cargo_bin("employee-sync").expect("binary exists")
}

#[test]
fn schema_lists_the_target_columns() {
    employee_sync()
        .arg("schema")
        .assert()
        .success()
        .stderr(contains("Target table 'employees' with 40 column(s)"))
        .stderr(contains("id_glovo [text] (conflict key)"))
        .stderr(contains("uber_eats [text] (platform flag)"));
}

#[test]
fn schema_meta_export_round_trips_as_json() {
    let ws = TestWorkspace::new();
    let meta = ws.path().join("employees.json");

    employee_sync()
        .args(["schema", "-m", meta.to_str().unwrap()])
        .assert()
        .success();

    let contents = fs::read_to_string(&meta).expect("read meta");
    let parsed: serde_json::Value = serde_json::from_str(&contents).expect("parse meta");
    assert_eq!(parsed["table"], "employees");
    assert_eq!(parsed["conflict_key"], "id_glovo");
    let columns = parsed["columns"].as_array().expect("columns array");
    assert_eq!(columns.len(), 40);
    assert_eq!(columns[0]["name"], "id_glovo");
    assert_eq!(columns[7]["name"], "horas");
    assert_eq!(columns[7]["kind"], "numeric");
}

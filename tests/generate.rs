mod common;

use std::fs;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::str::contains;

fn employee_sync() -> Command {
    Command::cargo_bin("employee-sync").expect("binary exists")
}

#[test]
fn generate_emits_one_statement_per_keyed_row() {
    let ws = TestWorkspace::new();
    let source = ws.write(
        "roster.csv",
        "id_glovo,nombre,apellido,horas,informado_horario\n\
         G100,Ana,Gomez,8.0,Sí\n\
         ,Luis,Perez,4,no\n",
    );
    let output = ws.path().join("batch.sql");

    employee_sync()
        .args([
            "generate",
            "-i",
            source.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(contains("Wrote 1 statement(s)"))
        .stderr(contains("1 row(s) skipped"));

    let artifact = fs::read_to_string(&output).expect("read artifact");
    assert_eq!(artifact.matches("INSERT INTO employees").count(), 1);
    assert!(artifact.contains("-- Empleado: Ana Gomez (ID: G100)"));
    assert!(artifact.contains("ON CONFLICT (id_glovo) DO UPDATE SET"));
    assert!(artifact.contains("updated_at = CURRENT_TIMESTAMP;"));
    assert!(!artifact.contains("Luis"));
}

#[test]
fn generate_coerces_values_per_column_kind() {
    let ws = TestWorkspace::new();
    let source = ws.write(
        "roster.csv",
        "id_glovo,nombre,apellido,horas,vacaciones_pendientes,informado_horario,jefe_trafico\n\
         G100,Ana,O'Brien,8.0,2.5,Sí,nan\n",
    );
    let output = ws.path().join("batch.sql");

    employee_sync()
        .args([
            "generate",
            "-i",
            source.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let artifact = fs::read_to_string(&output).expect("read artifact");
    assert!(artifact.contains("'O''Brien'"));
    assert!(artifact.contains("    8,\n"));
    assert!(artifact.contains("    2.5,\n"));
    assert!(artifact.contains("    true,\n"));
    // Sentinel and absent cells both land as NULL.
    assert!(artifact.contains("    NULL,\n"));
}

#[test]
fn generate_reads_semicolon_delimited_exports() {
    let ws = TestWorkspace::new();
    let source = ws.write(
        "roster.csv",
        "id_glovo;nombre;apellido\nG100;Ana;Gomez\n",
    );
    let output = ws.path().join("batch.sql");

    employee_sync()
        .args([
            "generate",
            "-i",
            source.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--delimiter",
            ";",
        ])
        .assert()
        .success()
        .stderr(contains("Wrote 1 statement(s)"));

    let artifact = fs::read_to_string(&output).expect("read artifact");
    assert!(artifact.contains("(ID: G100)"));
}

#[test]
fn generate_writes_the_batch_header_block() {
    let ws = TestWorkspace::new();
    let source = ws.write("roster.csv", "id_glovo\nG100\n");
    let output = ws.path().join("batch.sql");

    employee_sync()
        .args([
            "generate",
            "-i",
            source.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let artifact = fs::read_to_string(&output).expect("read artifact");
    assert!(artifact.starts_with("-- Employee roster UPSERT batch\n"));
    assert!(artifact.contains("-- Target table: employees (conflict key id_glovo)\n"));
    assert!(artifact.contains("-- Generated: "));
    assert!(artifact.contains("-- Includes platform flags: glovo, uber_eats\n"));
}

#[test]
fn generate_aborts_when_the_source_is_missing() {
    let ws = TestWorkspace::new();
    let output = ws.path().join("batch.sql");

    employee_sync()
        .args([
            "generate",
            "-i",
            ws.path().join("absent.csv").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("source file not found"));

    assert!(!output.exists());
}

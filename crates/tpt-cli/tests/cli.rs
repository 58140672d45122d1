use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A temp dir holding an empty config, so tests never read ~/.tpt.
fn sandbox() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();
    (dir, config)
}

fn tpt(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tpt-cli").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn solve_inline_balanced_instance() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .args([
            "solve", "--supply", "20,30", "--demand", "25,25", "--cost", "8,6;9,5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total cost: 330.00"))
        .stdout(predicate::str::contains("SHORTAGE").not());
}

#[test]
fn solve_json_output_reports_shortage() {
    let (_dir, config) = sandbox();
    let output = tpt(&config)
        .args([
            "solve", "--supply", "10", "--demand", "6,6", "--cost", "1,1", "--format", "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["is_balanced_artificially"], Value::Bool(true));
    assert_eq!(report["total_cost"].as_f64(), Some(10.0));
    let shortage: f64 = report["shortage_shipments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert!((shortage - 2.0).abs() < 1e-9);
}

#[test]
fn solve_plain_output_shows_shortage_row() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .args(["solve", "--supply", "10", "--demand", "6,6", "--cost", "1,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SHORTAGE"))
        .stdout(predicate::str::contains("Demand exceeds supply by 2.00"));
}

#[test]
fn solve_rejects_negative_cost() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .args([
            "solve", "--supply", "5,5", "--demand", "5,5", "--cost", "1,-2;1,1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cost[0][1]"));
}

#[test]
fn solve_rejects_non_numeric_cell() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .args(["solve", "--supply", "5,5", "--demand", "5,5", "--cost", "1,2;3,x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cost[1][1]: `x` is not a number"));
}

#[test]
fn solve_enforces_supplier_limit() {
    let (_dir, config) = sandbox();
    let supply = vec!["1"; 11].join(",");
    let cost = vec!["1"; 11].join(";");
    tpt(&config)
        .args(["solve", "--supply", &supply, "--demand", "11", "--cost", &cost])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number of suppliers"));
}

#[test]
fn solve_reads_toml_instance_and_writes_file() {
    let (dir, config) = sandbox();
    let instance = dir.path().join("instance.toml");
    fs::write(
        &instance,
        "supply = [20.0, 30.0]\ndemand = [25.0, 25.0]\ncost = [[8.0, 6.0], [9.0, 5.0]]\n",
    )
    .unwrap();
    let out = dir.path().join("reports").join("plan.txt");

    tpt(&config)
        .arg("solve")
        .arg(&instance)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("Total cost: 330.00"), "report was:\n{written}");
}

#[test]
fn solve_unknown_backend_fails() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .args([
            "solve", "--supply", "1", "--demand", "1", "--cost", "1", "--backend", "cplex",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cplex"));
}

#[test]
fn config_precision_is_applied() {
    let (dir, _) = sandbox();
    let config = dir.path().join("precise.toml");
    fs::write(&config, "[output]\nprecision = 3\n").unwrap();
    tpt(&config)
        .args(["solve", "--supply", "1", "--demand", "1", "--cost", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total cost: 2.000"));
}

#[test]
fn excessive_precision_is_rejected() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .args([
            "solve", "--supply", "1", "--demand", "1", "--cost", "2", "--precision", "400",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("400"));
}

#[test]
fn excessive_config_precision_is_capped() {
    let (dir, _) = sandbox();
    let config = dir.path().join("wide.toml");
    fs::write(&config, "[output]\nprecision = 400\n").unwrap();
    tpt(&config)
        .args(["solve", "--supply", "1", "--demand", "1", "--cost", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NaN").not())
        .stdout(predicate::str::contains("Total cost: 2.000000000000000"));
}

#[test]
fn plain_report_shows_cost_matrix() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .args([
            "solve", "--supply", "20,30", "--demand", "25,25", "--cost", "8,6;9,5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit costs"))
        .stdout(predicate::str::contains("DEMAND"))
        .stdout(predicate::str::contains("9.00"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempdir().unwrap();
    tpt(&dir.path().join("absent.toml"))
        .arg("backends")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn balance_reports_fictitious_supplier() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .args(["balance", "--supply", "10", "--demand", "6,6", "--cost", "1,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FICTITIOUS"))
        .stdout(predicate::str::contains("supply 2.00"));
}

#[test]
fn backends_lists_transport_simplex() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .arg("backends")
        .assert()
        .success()
        .stdout(predicate::str::contains("transport-simplex"));
}

#[test]
fn completions_generate_for_bash() {
    let (_dir, config) = sandbox();
    tpt(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tpt-cli"));
}

#[test]
fn completions_written_to_file() {
    let (dir, config) = sandbox();
    let out = dir.path().join("completions").join("tpt-cli.zsh");
    tpt(&config)
        .args(["completions", "zsh", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let script = fs::read_to_string(&out).unwrap();
    assert!(script.contains("tpt-cli"));
}

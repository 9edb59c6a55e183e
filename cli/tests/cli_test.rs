use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::error::Error;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn runs_single_scenario_with_ranked_table() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.args(["run", "--only", "membership-test", "--repetitions", "10"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("== membership-test"))
        .stdout(predicate::str::contains("hash-lookup"))
        .stdout(predicate::str::contains("<- fastest"))
        .stdout(predicate::str::contains(format!("on {}/{}", std::env::consts::OS, std::env::consts::ARCH)))
        .stdout(predicate::str::is_match(r"total: \d+\.\d{3} s\n$")?)
        .stdout(predicate::str::contains("string-assembly").not());

    Ok(())
}

#[test]
fn zero_repetitions_prints_failed_notice() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.args(["run", "--only", "string-assembly", "--repetitions", "0"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("scenario failed"))
        .stdout(predicate::str::contains("repetitions must be at least 1"));

    Ok(())
}

#[test]
fn unknown_scenario_exits_with_error() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.args(["run", "--only", "bubble-sort"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("Unknown scenario 'bubble-sort'"));

    Ok(())
}

#[test]
fn json_output_is_one_document() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.args([
        "run",
        "--only",
        "frequency-count",
        "--repetitions",
        "5",
        "--format",
        "json",
    ]);
    let output = cmd.output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["os"], std::env::consts::OS);
    assert_eq!(value["arch"], std::env::consts::ARCH);
    assert!(value["total_secs"].as_f64().is_some_and(|secs| secs > 0.0));
    let scenarios = value["scenarios"].as_array().expect("scenarios array");
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0]["scenario"], "frequency-count");
    assert_eq!(scenarios[0]["status"], "ranked");
    assert_eq!(scenarios[0]["rows"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[test]
fn config_file_sets_per_scenario_baseline() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config_path = dir.path().join("bench.toml");
    fs::write(
        &config_path,
        r#"
            repetitions = 5

            [scenarios.filter-transform]
            baseline = "iterator-chain"
        "#,
    )?;

    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.args(["run", "--only", "filter-transform", "--config"])
        .arg(&config_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("baseline: iterator-chain"))
        .stdout(predicate::str::contains("repetitions: 5"));

    Ok(())
}

#[test]
fn bad_config_file_is_reported() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config_path = dir.path().join("bench.toml");
    fs::write(&config_path, "loops = 3\n")?;

    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.args(["run", "--config"]).arg(&config_path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid harness config"));

    Ok(())
}

#[test]
fn list_shows_catalog_in_order() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)1\. membership-test.*2\. string-assembly.*5\. frequency-count")?)
        .stdout(predicate::str::contains("fx-entry-api"));

    Ok(())
}

#[test]
fn check_reports_ready() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.arg("check");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("clock"))
        .stdout(predicate::str::contains("ready"));

    Ok(())
}

#[test]
fn check_fails_on_incomplete_layout() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("Cargo.toml"), "[workspace]\n")?;

    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.args(["check", "--root"]).arg(dir.path());
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("not ready"))
        .stdout(predicate::str::contains("scenarios/Cargo.toml"));

    Ok(())
}

#[test]
fn lessons_print_closing_advice() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.args(["lessons", "strings"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("join"))
        .stdout(predicate::str::contains("Measure before you optimize."));

    Ok(())
}

#[test]
fn preflight_checks_layout_under_root() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    let mut cmd = Command::cargo_bin("zenbench")?;
    cmd.args(["run", "--preflight", "--root"]).arg(dir.path());
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("layout"))
        .stderr(predicate::str::contains("prerequisite check failed"))
        .stdout(predicate::str::contains("==").not());

    Ok(())
}

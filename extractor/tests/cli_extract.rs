//! CLI tests for `extractor extract`, `inspect`, and `init-config`.
//!
//! Spawns the extractor binary and verifies exit codes and written files.

use std::fs;
use std::process::Command;

use extractor::exit_codes;
use extractor::test_support::{ExportFixture, SCENARIO_LABELS, SCENARIO_STATES};
use serde_json::Value;

fn extractor() -> Command {
    Command::new(env!("CARGO_BIN_EXE_extractor"))
}

#[test]
fn extract_run_dir_writes_report_and_meta() {
    let fixture = ExportFixture::scenario().expect("fixture");
    let log = fixture.path().join("prism.log");
    fs::write(&log, "Result: 0.3 (value in the initial state)\n").expect("write log");

    let output = extractor()
        .args(["extract", "--meta", "--run-dir"])
        .arg(fixture.path())
        .arg("--out-dir")
        .arg(fixture.path())
        .arg("--verification-log")
        .arg(&log)
        .output()
        .expect("extractor extract");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("steps=3 probability=0.300000"));
    assert!(fixture.path().join("optimal_path.txt").is_file());

    let meta: Value = serde_json::from_str(
        &fs::read_to_string(fixture.path().join("meta.json")).expect("read meta"),
    )
    .expect("meta json");
    assert_eq!(meta["optimal_path"]["num_steps"], 3);
    assert_eq!(meta["optimal_path"]["verification_probability"], 0.3);
}

#[test]
fn extract_no_path_exits_with_not_found() {
    let fixture =
        ExportFixture::new(SCENARIO_LABELS, SCENARIO_STATES, "3 2 0\n").expect("fixture");
    let out_dir = fixture.out_dir();

    let output = extractor()
        .arg("extract")
        .arg("--strategy")
        .arg(&fixture.set.strategy)
        .arg("--states")
        .arg(&fixture.set.states)
        .arg("--labels")
        .arg(&fixture.set.labels)
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--json")
        .output()
        .expect("extractor extract");

    assert_eq!(output.status.code(), Some(exit_codes::NOT_FOUND));
    let result: Value = serde_json::from_slice(&output.stdout).expect("json result");
    assert_eq!(result["status"], "error");
    assert_eq!(result["kind"], "no_path");
    assert_eq!(result["states_explored"], 1);
    assert!(!out_dir.exists());
}

#[test]
fn extract_missing_file_exits_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    let status = extractor()
        .args(["extract", "--run-dir"])
        .arg(temp.path())
        .arg("--out-dir")
        .arg(temp.path())
        .status()
        .expect("extractor extract");
    assert_eq!(status.code(), Some(exit_codes::INVALID));
}

#[test]
fn max_steps_flag_overrides_config() {
    let fixture = ExportFixture::scenario().expect("fixture");
    let config = fixture.path().join("extractor.toml");
    fs::write(&config, "[search]\nmax_steps = 50\n").expect("write config");

    let status = extractor()
        .args(["extract", "--max-steps", "1", "--config"])
        .arg(&config)
        .arg("--run-dir")
        .arg(fixture.path())
        .arg("--out-dir")
        .arg(fixture.out_dir())
        .status()
        .expect("extractor extract");
    assert_eq!(status.code(), Some(exit_codes::NOT_FOUND));
}

#[test]
fn inspect_prints_findings() {
    let fixture =
        ExportFixture::new(SCENARIO_LABELS, SCENARIO_STATES, "3 2 1\n0 0 1 0.6 move1\n")
            .expect("fixture");
    let output = extractor()
        .args(["inspect", "--run-dir"])
        .arg(fixture.path())
        .output()
        .expect("extractor inspect");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("inspect: initial_state=0"));
    assert!(stdout.contains("inspect: goals=2 source=label"));
    assert!(stdout.contains("finding: state 0 choice 0: probabilities sum to 0.600000"));
}

#[test]
fn init_config_refuses_to_overwrite() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("extractor.toml");

    let status = extractor()
        .arg("init-config")
        .arg(&path)
        .status()
        .expect("init-config");
    assert_eq!(status.code(), Some(exit_codes::OK));
    assert!(fs::read_to_string(&path).expect("read").contains("max_steps = 100"));

    let status = extractor()
        .arg("init-config")
        .arg(&path)
        .status()
        .expect("init-config again");
    assert_eq!(status.code(), Some(exit_codes::INVALID));
}

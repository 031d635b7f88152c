//! Integration tests for the topictile CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FIXTURES: &str = "tests/fixtures";

fn topictile() -> Command {
    let mut cmd = Command::cargo_bin("topictile").unwrap();
    cmd.env_remove("TOPICTILE_DATA_DIR");
    cmd
}

fn evaluate(algorithm: &str) -> Command {
    let mut cmd = topictile();
    cmd.args(["evaluate", "-q", "-d", "test", "-a", algorithm, "--data-dir", FIXTURES]);
    cmd
}

#[test]
fn test_evaluate_text_output() {
    evaluate("texttiling-lexical")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset:   test"))
        .stdout(predicate::str::contains("average_Pk_flattened"))
        .stdout(predicate::str::contains("average_Pk_top_level"))
        .stdout(predicate::str::contains("average_windiff_flattened"))
        .stdout(predicate::str::contains("average_windiff_top_level"))
        .stdout(predicate::str::contains("2 meetings scored"));
}

#[test]
fn test_evaluate_json_output() {
    let output = evaluate("even").arg("-f").arg("json").output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dataset"], "test");
    assert_eq!(json["algorithm"], "even");
    let metrics = json["metrics"].as_object().unwrap();
    assert_eq!(metrics.len(), 4);
    for value in metrics.values() {
        let value = value.as_f64().unwrap();
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn test_evaluate_markdown_output() {
    evaluate("even")
        .args(["-f", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## even on test"))
        .stdout(predicate::str::contains("| Granularity | Pk | WinDiff |"));
}

#[test]
fn test_evaluate_embedding_algorithms_offline() {
    for algorithm in ["texttiling-bert", "texttiling-sbert"] {
        evaluate(algorithm)
            .assert()
            .success()
            .stdout(predicate::str::contains("average_windiff_top_level"));
    }
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("report.json");

    evaluate("even")
        .args(["-f", "json", "-o"])
        .arg(&output_file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("average_Pk_top_level"));
}

#[test]
fn test_config_file_sets_even_interval() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("topictile.toml");
    fs::write(&config, "[even]\ninterval = 4\n\n[datasets.test]\nthreshold = 0.9\n").unwrap();

    topictile()
        .args(["segment", "-q", "-d", "test", "-a", "even", "--data-dir", FIXTURES, "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("ES2002a\t12\t[4, 8]"));
}

#[test]
fn test_segment_with_transcript() {
    topictile()
        .args([
            "segment", "-q", "-d", "test", "-a", "even", "--data-dir", FIXTURES, "-m", "ES2002a",
            "--transcript",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ES2002a\t12\t[2, 5, 7, 10]"))
        .stdout(predicate::str::contains("<<------ Topic Change ------>>"))
        .stdout(predicate::str::contains("the budget for the remote is twelve euros"))
        .stdout(predicate::str::contains("ES2003b").not());
}

#[test]
fn test_segment_unknown_meeting() {
    topictile()
        .args([
            "segment", "-q", "-d", "test", "--data-dir", FIXTURES, "-m", "IS1000a",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IS1000a"));
}

#[test]
fn test_unknown_algorithm() {
    topictile()
        .args(["evaluate", "-d", "test", "-a", "lda", "--data-dir", FIXTURES])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lda"));
}

#[test]
fn test_unknown_dataset() {
    topictile()
        .args(["evaluate", "-d", "switchboard", "--data-dir", FIXTURES])
        .assert()
        .failure()
        .stderr(predicate::str::contains("switchboard"));
}

#[test]
fn test_missing_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    topictile()
        .args(["evaluate", "-q", "-d", "ami", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("utterances.csv"));
}

#[test]
fn test_data_dir_from_environment() {
    topictile()
        .env("TOPICTILE_DATA_DIR", FIXTURES)
        .args(["evaluate", "-q", "-d", "test", "-a", "even"])
        .assert()
        .success();
}

#[test]
fn test_generate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("topictile.toml");

    topictile()
        .arg("generate-config")
        .arg("-o")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration template written"));

    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("[segmentation]"));

    evaluate("even").arg("-c").arg(&config).assert().success();
}

#[test]
fn test_list_commands() {
    topictile()
        .args(["list", "algorithms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("texttiling-sbert"));

    topictile()
        .args(["list", "datasets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("icsi"));

    topictile()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("markdown"));
}

//! End-to-end tests for the `kyc` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(dir: &Path, backend: &str) -> PathBuf {
    let path = dir.join("config.json");
    let config = serde_json::json!({
        "storage": {
            "backend": backend,
            "data_dir": dir.join("data"),
        }
    });
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

fn kyc(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kyc").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn extract_pan_text_without_persisting() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "jsonl");
    let input = dir.path().join("pan.txt");
    fs::write(
        &input,
        "JOHN SMITH\nROBERT SMITH\nABCDE1234F\nDOB: 02-02-1985\nABCDF5678G\n",
    )
    .unwrap();

    kyc(&config)
        .args(["extract", "--kind", "pan", "--from-text", "--no-persist"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""pan_number": "ABCDF5678G""#))
        .stdout(predicate::str::contains(r#""father_name": "ROBERT SMITH""#))
        .stdout(predicate::str::contains("inserted_id").not());

    assert!(!dir.path().join("data").join("pan_data.jsonl").exists());
}

#[test]
fn extract_aadhaar_text_persists_record() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "jsonl");
    let input = dir.path().join("aadhaar.txt");
    fs::write(&input, "Name: Asha Rao\nDOB: 01-01-1990\nMale\n1234 5678 9012\n").unwrap();

    kyc(&config)
        .args(["extract", "--kind", "aadhaar", "--from-text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Aadhaar data extracted successfully!"))
        .stdout(predicate::str::contains(r#""aadhaar_number": "1234 5678 9012""#))
        .stdout(predicate::str::contains(r#""address": null"#))
        .stdout(predicate::str::contains("inserted_id"));

    let stored = fs::read_to_string(dir.path().join("data").join("aadhaar_data.jsonl")).unwrap();
    assert_eq!(stored.lines().count(), 1);
    assert!(stored.contains(r#""name":"Asha Rao""#));
}

#[test]
fn extract_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "memory");
    let input = dir.path().join("pan.txt");
    let output = dir.path().join("out.json");
    fs::write(&input, "ABCDE1234F").unwrap();

    kyc(&config)
        .args(["extract", "--kind", "pan", "--from-text", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["extracted_data"]["pan_number"], "ABCDE1234F");
    assert!(json["extracted_data"]["name"].is_null());
}

#[test]
fn extract_image_without_models_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "memory");
    let input = dir.path().join("card.png");
    image::DynamicImage::new_rgb8(8, 8).save(&input).unwrap();

    kyc(&config)
        .args(["extract", "--kind", "pan"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OCR engine unavailable"));
}

#[test]
fn extract_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "memory");

    kyc(&config)
        .args(["extract", "--kind", "aadhaar", "--from-text"])
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_rejects_unknown_kind() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "memory");

    kyc(&config)
        .args(["extract", "--kind", "passport", "card.png"])
        .assert()
        .failure();
}

#[test]
fn config_set_then_get_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("kyc.json");

    kyc(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:5000"));

    kyc(&config)
        .args(["config", "set", "server.bind", "0.0.0.0:8080"])
        .assert()
        .success();

    kyc(&config)
        .args(["config", "get", "server.bind"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.0.0:8080"));

    kyc(&config)
        .args(["config", "set", "server.port", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

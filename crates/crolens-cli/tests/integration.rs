//! Integration tests for the crolens CLI
//!
//! These tests run the binary as a subprocess against local signal files,
//! with external lookups disabled.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn crolens() -> Command {
    Command::new(env!("CARGO_BIN_EXE_crolens"))
}

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("crolens-cli-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const PRODUCT_SIGNALS: &str = r#"{
    "url": "https://shop.example/products/xr-200",
    "title": "XR-200 lamp",
    "headings": [{"tag": "h1", "text": "Spar 30%", "isAboveFold": true}]
}"#;

#[test]
fn test_cli_help() {
    let output = crolens().arg("--help").output().expect("Failed to run CLI");
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--signals"));
    assert!(stdout.contains("--no-external"));
}

#[test]
fn test_cli_version() {
    let output = crolens().arg("--version").output().expect("Failed to run CLI");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_requires_a_target() {
    let output = crolens().arg("--no-external").output().expect("Failed to run CLI");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--signals"));
}

#[test]
fn test_cli_text_report_from_signals() {
    let signals = write_fixture("text.json", PRODUCT_SIGNALS);
    let output = crolens()
        .arg("--signals")
        .arg(&signals)
        .arg("--no-external")
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("CRO Audit"));
    assert!(stdout.contains("product"));
    assert!(stdout.contains("No CTAs found"));
}

#[test]
fn test_cli_json_output() {
    let signals = write_fixture("json.json", PRODUCT_SIGNALS);
    let output = crolens()
        .arg("--signals")
        .arg(&signals)
        .args(["--no-external", "--json"])
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["pageType"], "product");
    assert_eq!(json["categories"].as_array().unwrap().len(), 9);
    assert!(json.get("technicalHealth").is_some());
}

#[test]
fn test_cli_save_writes_derived_filename() {
    let signals = write_fixture("save.json", PRODUCT_SIGNALS);
    let out_dir = signals.parent().unwrap().join("reports");

    let output = crolens()
        .arg("--signals")
        .arg(&signals)
        .arg("--no-external")
        .arg("--save")
        .arg(&out_dir)
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    let saved = out_dir.join("shop_example__products_xr-200.md");
    let contents = fs::read_to_string(saved).unwrap();
    assert!(contents.contains("CRO Audit"));
}

const UNNAMED_SIGNALS: &str = r#"{
    "title": "Spring sale",
    "headings": [{"tag": "h1", "text": "Spar 30% i dag", "isAboveFold": true}]
}"#;

#[test]
fn test_cli_signals_without_url() {
    let signals = write_fixture("unnamed.json", UNNAMED_SIGNALS);
    let output = crolens()
        .arg("--signals")
        .arg(&signals)
        .arg("--no-external")
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("CRO Audit"));
}

#[test]
fn test_cli_save_without_url_fails() {
    let signals = write_fixture("unnamed-save.json", UNNAMED_SIGNALS);
    let output = crolens()
        .arg("--signals")
        .arg(&signals)
        .args(["--no-external", "--save"])
        .arg(signals.parent().unwrap().join("unnamed-reports"))
        .output()
        .expect("Failed to run CLI");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--save needs a page URL"));
}

#[test]
fn test_cli_desktop_viewport() {
    let signals = write_fixture("viewport.json", PRODUCT_SIGNALS);
    let mobile = write_fixture("mobile.json", r#"{"strategy": "mobile", "performanceScore": 35}"#);
    let desktop = write_fixture(
        "desktop.json",
        r#"{"strategy": "desktop", "performanceScore": 92}"#,
    );
    let output = crolens()
        .arg("--signals")
        .arg(&signals)
        .arg("--mobile-speed")
        .arg(&mobile)
        .arg("--desktop-speed")
        .arg(&desktop)
        .args(["--no-external", "--json", "--viewport", "desktop"])
        .output()
        .expect("Failed to run CLI");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let lighthouse = json["benchmark"]["comparisons"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["metric"] == "Lighthouse Score")
        .unwrap();
    assert_eq!(lighthouse["yourValue"], 92);
}

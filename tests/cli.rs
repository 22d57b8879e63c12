use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct TestProject {
    dir: TempDir,
}

impl TestProject {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join("config.toml"),
            "[report]\nfail_on_risky = true\n",
        )
        .expect("Failed to write config");
        Self { dir }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        let model = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("models")
            .join("license_safety_model.json");
        Command::new(env!("CARGO_BIN_EXE_license-guard"))
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .arg("--model")
            .arg(model)
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run license-guard")
    }
}

#[test]
fn manual_safe_license_exits_zero() {
    let project = TestProject::new();
    let output = project.run(&["--license", "MIT", "--report", "json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["rows"][0]["identifier"], "MIT");
    assert_eq!(json[0]["rows"][0]["label"], "Safe");
    assert_eq!(json[0]["has_risky"], false);
}

#[test]
fn risky_manifest_exits_one() {
    let project = TestProject::new();
    let manifest = project.write("package.json", r#"{ "name": "x", "license": "GPL-3.0" }"#);
    let output = project.run(&[manifest.to_str().unwrap(), "--report", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["rows"][0]["label"], "Risky");
    assert!(json[0]["rows"][0]["alternative"].is_string());
}

#[test]
fn file_without_licenses_is_a_warning() {
    let project = TestProject::new();
    let notes = project.write("notes.txt", "nothing declared here");
    let output = project.run(&[notes.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no license found"));
}

#[test]
fn missing_file_is_an_error() {
    let project = TestProject::new();
    let output = project.run(&["does-not-exist.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

//! Tests for profile persistence through the binary (non-interactive paths only)
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn run_dashtop(config_home: &Path, args: &[&str]) -> (bool, String) {
    let exe = env!("CARGO_BIN_EXE_dashtop");
    let output = Command::new(exe)
        .env("XDG_CONFIG_HOME", config_home)
        .args(args)
        .output()
        .expect("run dashtop");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (output.status.success(), text)
}

fn profiles_path(config_home: &Path) -> PathBuf {
    config_home.join("dashtop").join("profiles.json")
}

#[test]
fn test_profile_created_on_first_use() {
    let td = tempfile::tempdir().unwrap();
    let (ok, out) = run_dashtop(
        td.path(),
        &["--profile", "unittest", "http://example:1", "--dry-run"],
    );
    assert!(ok, "{out}");
    let data = fs::read_to_string(profiles_path(td.path())).expect("profiles.json created");
    assert!(data.contains("unittest"), "profiles.json missing profile entry: {data}");
    assert!(data.contains("http://example:1"));
}

#[test]
fn test_profile_overwrite_only_when_changed() {
    let td = tempfile::tempdir().unwrap();
    run_dashtop(td.path(), &["--profile", "prod", "http://one:5000", "--dry-run"]);
    let first = fs::read_to_string(profiles_path(td.path())).unwrap();
    // Re-run identical (should not duplicate or corrupt)
    run_dashtop(td.path(), &["--profile", "prod", "http://one:5000", "--dry-run"]);
    let second = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert_eq!(first, second, "Profile file changed despite identical input");
    // Overwrite with different URL using --save (no prompt path)
    run_dashtop(
        td.path(),
        &["--profile", "prod", "--save", "http://two:5000", "--dry-run"],
    );
    let third = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(third.contains("two"), "Updated URL not written: {third}");
}

#[test]
fn test_profile_tls_ca_and_interval_persisted() {
    let td = tempfile::tempdir().unwrap();
    run_dashtop(
        td.path(),
        &[
            "--profile",
            "secureX",
            "--tls-ca",
            "/tmp/cert.pem",
            "--interval",
            "30",
            "https://host:8443",
            "--dry-run",
        ],
    );
    let data = fs::read_to_string(profiles_path(td.path())).unwrap();
    assert!(data.contains("secureX"));
    assert!(data.contains("cert.pem"));
    assert!(data.contains("\"interval_secs\": 30"), "{data}");
}

#[test]
fn test_saved_profile_loads_by_name() {
    let td = tempfile::tempdir().unwrap();
    run_dashtop(td.path(), &["--profile", "lab", "http://lab:5000", "--dry-run"]);
    let (ok, out) = run_dashtop(td.path(), &["--profile", "lab", "--dry-run"]);
    assert!(ok, "{out}");
    assert!(out.contains("http://lab:5000"), "{out}");
}

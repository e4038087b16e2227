//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_flowstate"))
        .args(args)
        .env("FLOWSTATE_DATA_DIR", data_dir)
        .env_remove("FLOWSTATE_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_energy_score_best_case() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &[
            "energy", "score", "--completion", "1", "--error-rate", "0", "--idle", "0",
            "--switches", "0", "--mood", "5",
        ],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Energy score: 55.0/100"), "{stdout}");
    assert!(stdout.contains("Continue current workflow"));
    assert!(stdout.contains("Why: Your current workflow is sustainable."));
}

#[test]
fn test_energy_score_out_of_range_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["energy", "score", "--error-rate", "5.0", "--mood", "-3", "--json"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["score"].as_f64(), Some(0.0));
    assert_eq!(parsed["recommendation"], "Take a short break");
    assert!(parsed["explanation"]
        .as_str()
        .unwrap()
        .starts_with("Your energy score is 0/100."));
}

#[test]
fn test_energy_recommend_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stdout, _) = run_cli(dir.path(), &["energy", "recommend", "39.9", "0"]);
    assert_eq!(stdout.trim(), "Take a short break");
    let (_, stdout, _) = run_cli(dir.path(), &["energy", "recommend", "40", "0"]);
    assert_eq!(stdout.trim(), "Continue current workflow");
    let (_, stdout, _) = run_cli(dir.path(), &["energy", "recommend", "50", "0.41"]);
    assert_eq!(stdout.trim(), "Switch to a low difficulty task");
}

#[test]
fn test_energy_burnout() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stdout, _) = run_cli(dir.path(), &["energy", "burnout", "44", "44", "44", "44", "44"]);
    assert!(stdout.starts_with("high"));
    let (_, stdout, _) = run_cli(dir.path(), &["energy", "burnout"]);
    assert!(stdout.starts_with("low"));
}

#[test]
fn test_energy_history_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["energy", "history", "--days", "10", "--seed", "3", "--json"],
    );
    assert_eq!(code, 0);
    let scores: Vec<f64> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(scores.len(), 10);
    assert!(scores.iter().all(|s| (20.0..=100.0).contains(s)));

    let (_, again, _) = run_cli(
        dir.path(),
        &["energy", "history", "--days", "10", "--seed", "3", "--json"],
    );
    assert_eq!(stdout, again);
}

#[test]
fn test_dashboard_guest_then_signed_in() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["dashboard", "--seed", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[locked]"));
    assert!(stdout.contains("Guest mode"));

    let (code, _, _) = run_cli(
        dir.path(),
        &["session", "signup", "--email", "ada@example.com", "--password", "hunter22"],
    );
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(dir.path(), &["dashboard", "--seed", "1"]);
    assert_eq!(code, 0);
    assert!(!stdout.contains("[locked]"));
    assert!(stdout.contains("today"));
}

#[test]
fn test_dashboard_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["dashboard", "--seed", "9", "--mood", "5", "--json"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["signals"]["mood_input"].as_f64(), Some(5.0));
    assert_eq!(parsed["history"].as_array().unwrap().len(), 7);
    assert_eq!(parsed["capabilities"]["weekly_analytics"], false);
    assert_eq!(parsed["focus_recommended"], false);
    assert_eq!(parsed["velocity"]["completion_rate"].as_f64(), Some(0.5));
    assert_eq!(parsed["velocity"]["error_rate"].as_f64(), Some(1.5));
}

#[test]
fn test_session_signup_rejects_short_password() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["session", "signup", "--email", "ada@example.com", "--password", "abc"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_session_logout() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(
        dir.path(),
        &["session", "signup", "--email", "ada@example.com", "--password", "hunter22"],
    );
    let (code, stdout, _) = run_cli(dir.path(), &["session", "logout"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("guest-"));
    let (_, stdout, _) = run_cli(dir.path(), &["session", "status"]);
    assert!(stdout.contains("Guest mode"));
}

#[test]
fn test_task_list_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["task", "list", "--json"]);
    assert_eq!(code, 0);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 4);
}

#[test]
fn test_task_unknown_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["task", "complete", "task-99"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Task not found"));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "scoring.switch_ceiling", "20"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "scoring.switch_ceiling"]);
    assert_eq!(stdout.trim(), "20.0");

    // Ten switches now only cost half the penalty.
    let (_, stdout, _) = run_cli(
        dir.path(),
        &[
            "energy", "score", "--completion", "1", "--error-rate", "0", "--idle", "0",
            "--switches", "10", "--mood", "5",
        ],
    );
    assert!(stdout.contains("Energy score: 50.0/100"), "{stdout}");
}

#[test]
fn test_config_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "get", "nope.key"]);
    assert_ne!(code, 0);
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "nope.key", "1"]);
    assert_ne!(code, 0);
}

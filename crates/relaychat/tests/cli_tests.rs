//! CLI integration tests.
//!
//! These tests run the relaychat binary with config, data and state
//! directories pointed at a temporary directory.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const TRANSCRIPT: &str = r#"{
  "session": {"id": "ses_1", "agentState": {"controlledByUser": true}},
  "messages": [
    {"id": "m3", "kind": "agent-event", "event": {"type": "switch", "mode": "plan"}},
    {"id": "m2", "kind": "agent-text", "text": "Which db?\n<options><option>Postgres</option></options>"},
    {"id": "m1", "kind": "user-text", "text": "Set up a database"}
  ]
}"#;

fn relaychat(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_relaychat"))
        .args(args)
        .current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_STATE_HOME", home.join("state"))
        .env_remove("RELAYCHAT_HISTORY_MAX")
        .env_remove("RELAYCHAT_THEME")
        .env_remove("RELAYCHAT_LOG_LEVEL")
        .output()
        .expect("Failed to execute command")
}

fn write_transcript(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("transcript.json");
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = relaychat(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("chat"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("history"));
}

#[test]
fn test_render_command() {
    let dir = TempDir::new().unwrap();
    let transcript = write_transcript(&dir, TRANSCRIPT);
    let output = relaychat(
        dir.path(),
        &["render", "--session", "ses_1", "--transcript", &transcript, "--width", "60"],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let user = stdout.find("Set up a database").unwrap();
    let agent = stdout.find("Which db?").unwrap();
    let event = stdout.find("Switched to plan mode").unwrap();
    assert!(user < agent && agent < event);
    assert!(stdout.contains("Postgres"));
    assert!(stdout.trim_end().ends_with("Controlled by user"));
}

#[test]
fn test_render_rejects_unknown_kind() {
    let dir = TempDir::new().unwrap();
    let transcript = write_transcript(
        &dir,
        r#"{"session": {"id": "ses_1"}, "messages": [{"id": "m1", "kind": "agent-thought"}]}"#,
    );
    let output = relaychat(
        dir.path(),
        &["render", "--session", "ses_1", "--transcript", &transcript],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("agent-thought"));
}

#[test]
fn test_render_rejects_other_session() {
    let dir = TempDir::new().unwrap();
    let transcript = write_transcript(&dir, TRANSCRIPT);
    let output = relaychat(
        dir.path(),
        &["render", "--session", "ses_2", "--transcript", &transcript],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ses_1"));
}

#[test]
fn test_history_command() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("history");
    let data_dir = data_dir.to_string_lossy().to_string();

    let output = relaychat(dir.path(), &["history", "--session", "ses_1", "--data-dir", &data_dir]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No input history for ses_1"));

    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(
        Path::new(&data_dir).join("input-history-ses_1.json"),
        r#"["newest","older"]"#,
    )
    .unwrap();

    let output = relaychat(dir.path(), &["history", "--session", "ses_1", "--data-dir", &data_dir]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.find("newest").unwrap() < stdout.find("older").unwrap());

    let output = relaychat(
        dir.path(),
        &["history", "--session", "ses_1", "--data-dir", &data_dir, "--clear"],
    );
    assert!(output.status.success());

    let output = relaychat(dir.path(), &["history", "--session", "ses_1", "--data-dir", &data_dir]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No input history for ses_1"));
}

#[test]
fn test_history_uses_configured_data_dir() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("from-config");
    std::fs::write(
        dir.path().join("relaychat.json"),
        format!(r#"{{ "data_dir": {:?} }}"#, state.to_string_lossy()),
    )
    .unwrap();
    std::fs::create_dir_all(&state).unwrap();
    std::fs::write(
        state.join("input-history-team%2Fses_1.json"),
        r#"["from the config dir"]"#,
    )
    .unwrap();

    let output = relaychat(dir.path(), &["history", "--session", "team/ses_1"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("from the config dir"));
}

use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("studyagent-{nanos}-{file_name}"))
}

fn run_ask(store_path: &PathBuf, args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_study_cli");
    Command::new(exe)
        .args(args)
        .env("STUDYAGENT_REMINDERS_PATH", store_path)
        .env("STUDYAGENT_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run ask command")
}

#[test]
fn ask_plan_returns_json_plan() {
    let store_path = temp_path("cli-ask-plan.json");
    let output = run_ask(
        &store_path,
        &["--json", "ask", "Plan my study for 2 hours on DSA"],
    );

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(parsed["intent"], "plan");
    assert_eq!(parsed["result"]["total_minutes"], 110);
    assert_eq!(parsed["result"]["cycles"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["result"]["topic"], "2 hours on dsa");
    assert!(!store_path.exists());
}

#[test]
fn ask_reminder_persists_original_text() {
    let store_path = temp_path("cli-ask-reminder.json");
    let output = run_ask(&store_path, &["--json", "ask", "Remind", "me", "at", "6", "pm"]);

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(parsed["intent"], "reminder");
    assert_eq!(parsed["result"]["text"], "Remind me at 6 pm");
    assert!(
        parsed["result"]["when"]
            .as_str()
            .unwrap()
            .contains("T18:00:00")
    );

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).expect("stored json");
    std::fs::remove_file(&store_path).ok();

    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0], parsed["result"]);
}

#[test]
fn ask_progress_plain_output() {
    let store_path = temp_path("cli-ask-progress.json");
    let output = run_ask(&store_path, &["ask", "Check my progress"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[progress]"));
    assert!(stdout.contains("60%"));
}

#[test]
fn ask_unknown_message_returns_help() {
    let store_path = temp_path("cli-ask-help.json");
    let output = run_ask(&store_path, &["--json", "ask", "  HELLO  "]);

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(parsed["intent"], "help");
    assert!(
        parsed["result"]["description"]
            .as_str()
            .unwrap()
            .starts_with("I generate study plans")
    );
}

#[test]
fn ask_blank_message_returns_help() {
    let store_path = temp_path("cli-ask-blank.json");
    let output = run_ask(&store_path, &["--json", "ask", "   "]);

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(parsed["intent"], "help");
    assert!(!store_path.exists());
}

#[test]
fn ask_reports_corrupt_store() {
    let store_path = temp_path("cli-ask-corrupt.json");
    std::fs::write(&store_path, "not json").unwrap();

    let output = run_ask(&store_path, &["ask", "remind me"]);
    std::fs::remove_file(&store_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_data"));
}

#[test]
fn ask_rejects_malformed_override() {
    let store_path = temp_path("cli-ask-delay.json");
    let output = run_ask(
        &store_path,
        &[
            "--json",
            "--config-override",
            "reminder_delay_minutes=abc",
            "ask",
            "remind me",
        ],
    );

    assert!(!output.status.success());
    assert!(!store_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("studyagent-{nanos}-{file_name}"))
}

#[test]
fn demo_prints_each_sample_exchange() {
    let exe = env!("CARGO_BIN_EXE_study_cli");
    let store_path = temp_path("cli-demo.json");
    let output = Command::new(exe)
        .arg("demo")
        .env("STUDYAGENT_REMINDERS_PATH", &store_path)
        .env("STUDYAGENT_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run demo command");
    let stored = std::fs::read_to_string(&store_path);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("USER: ").count(), 4);
    assert_eq!(stdout.matches("AGENT: ").count(), 4);
    assert!(stdout.contains("USER: Hello"));
    assert!(stdout.contains(&"-".repeat(40)));

    let stored: serde_json::Value = serde_json::from_str(&stored.unwrap()).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["text"], "Remind me to study DSA tomorrow");
}

#[test]
fn demo_json_lists_intents_in_order() {
    let exe = env!("CARGO_BIN_EXE_study_cli");
    let store_path = temp_path("cli-demo-json.json");
    let output = Command::new(exe)
        .args(["--json", "demo"])
        .env("STUDYAGENT_REMINDERS_PATH", &store_path)
        .env("STUDYAGENT_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run demo command");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json output");
    let intents: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["response"]["intent"].as_str().unwrap())
        .collect();
    assert_eq!(intents, ["plan", "reminder", "progress", "help"]);
}

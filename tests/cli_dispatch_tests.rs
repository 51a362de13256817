use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_rulebook")
}

fn temp_data_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("rulebook-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("temp data dir should be creatable");
    dir
}

#[test]
fn sources_command_emits_the_registry() {
    let output = Command::new(bin())
        .arg("sources")
        .output()
        .expect("sources should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("sources should emit json");
    assert_eq!(payload["sources"].as_array().map(Vec::len), Some(8));
}

#[test]
fn browse_command_renders_cards_from_the_data_dir() {
    let dir = temp_data_dir("cli-browse");
    fs::write(
        dir.join("terms.csv"),
        "用語名,解説\nターン,一巡。\nコスト,支払う数。\n",
    )
    .expect("source file should be writable");

    let output = Command::new(bin())
        .env("RULEBOOK_DATA_DIR", &dir)
        .args(["browse", "terms.csv"])
        .output()
        .expect("browse should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("browse should emit json");
    assert_eq!(payload["count"], 2);
    assert_eq!(payload["cards"][0]["title"], "ターン");
}

#[test]
fn browse_command_fails_cleanly_for_a_missing_source() {
    let dir = temp_data_dir("cli-browse-missing");

    let output = Command::new(bin())
        .env("RULEBOOK_DATA_DIR", &dir)
        .args(["browse", "ghost.csv"])
        .output()
        .expect("browse should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ghost.csv"), "{stderr}");
}

#[test]
fn browse_command_without_a_source_prints_usage() {
    let output = Command::new(bin())
        .arg("browse")
        .output()
        .expect("browse should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: rulebook browse"));
}

#[test]
fn search_command_labels_results_across_sources() {
    let dir = temp_data_dir("cli-search");
    fs::write(dir.join("terms.csv"), "用語名,解説\nターン,説明A\n")
        .expect("source file should be writable");
    fs::write(dir.join("counters.csv"), "カウンター名,解説\nターン数,説明B\n")
        .expect("source file should be writable");

    let output = Command::new(bin())
        .env("RULEBOOK_DATA_DIR", &dir)
        .args(["search", "ターン"])
        .output()
        .expect("search should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("search should emit json");
    assert_eq!(payload["count"], 2);
    let cards = payload["cards"].as_array().expect("cards should be an array");
    assert!(cards.iter().all(|card| card["category_tag"].is_string()));
}

#[test]
fn search_command_blank_query_short_circuits() {
    // Data dir does not exist; a blank query must not try to read it.
    let dir = std::env::temp_dir().join("rulebook-cli-noop-never-created");

    let output = Command::new(bin())
        .env("RULEBOOK_DATA_DIR", &dir)
        .args(["search", "   "])
        .output()
        .expect("search should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("search should emit json");
    assert_eq!(payload["count"], 0);
}

#[test]
fn validate_command_reports_missing_sources() {
    let dir = temp_data_dir("cli-validate-missing");

    let output = Command::new(bin())
        .env("RULEBOOK_DATA_DIR", &dir)
        .arg("validate")
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[error]"), "{stdout}");
}

#[test]
fn validate_command_passes_on_the_shipped_data() {
    let output = Command::new(bin())
        .arg("validate")
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"), "{stdout}");
}

#[test]
fn missing_command_prints_usage() {
    let output = Command::new(bin()).output().expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: rulebook"));
}

//! Integration tests for init, prompts, config and schedule argument handling

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{authed_cmd, journal_bot_cmd, StubContentsApi};

fn init_root(temp: &TempDir) {
    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("init")
        .assert()
        .success();
}

#[test]
fn test_init_creates_config_and_readme() {
    let temp = TempDir::new().unwrap();

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized journal-bot journal"));

    let config = fs::read_to_string(temp.path().join("journal-bot.toml")).unwrap();
    assert!(config.contains("repository = \"daily-journal\""));
    assert!(config.contains("schedule = \"09:00\""));
    assert!(config.contains("What went well today?"));

    let readme = fs::read_to_string(temp.path().join("README.md")).unwrap();
    assert!(readme.starts_with("# Daily Journal"));
}

#[test]
fn test_init_uses_root_from_environment() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("journal");

    journal_bot_cmd()
        .env("JOURNAL_BOT_ROOT", &root)
        .arg("init")
        .assert()
        .success();

    assert!(root.join("journal-bot.toml").exists());
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();
    init_root(&temp);

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_prompts_lists_builtin_prompts() {
    let temp = TempDir::new().unwrap();

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("prompts")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. What went well today?"))
        .stdout(predicate::str::contains(
            "10. What's something I'm looking forward to?",
        ));
}

#[test]
fn test_prompts_lists_configured_prompts() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("journal-bot.toml"),
        "prompts = [\"What made you smile today?\", \"Who helped me?\"]\n",
    )
    .unwrap();

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("prompts")
        .assert()
        .success()
        .stdout("1. What made you smile today?\n2. Who helped me?\n");
}

#[test]
fn test_prompts_with_empty_list_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("journal-bot.toml"), "prompts = []\n").unwrap();

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("prompts")
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("no prompts configured"));
}

#[test]
fn test_config_set_and_get() {
    let temp = TempDir::new().unwrap();
    init_root(&temp);

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .args(["config", "schedule", "21:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set schedule = 21:30"));

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .args(["config", "schedule"])
        .assert()
        .success()
        .stdout("21:30\n");
}

#[test]
fn test_config_list_hides_credentials() {
    let temp = TempDir::new().unwrap();
    init_root(&temp);

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .env("GITHUB_TOKEN", "ghp_should_not_print")
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("repository = daily-journal"))
        .stdout(predicate::str::contains("prompts = 10 configured"))
        .stdout(predicate::str::contains("ghp_should_not_print").not());
}

#[test]
fn test_config_rejects_invalid_schedule() {
    let temp = TempDir::new().unwrap();
    init_root(&temp);

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .args(["config", "schedule", "7pm"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected HH:MM"));
}

#[test]
fn test_config_unknown_key() {
    let temp = TempDir::new().unwrap();
    init_root(&temp);

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .args(["config", "token"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: 'token'"));
}

#[test]
fn test_schedule_invalid_time_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let api = StubContentsApi::start();

    for bad in ["25:00", "9:00", "noon", "12:60"] {
        authed_cmd(temp.path(), &api.base_url)
            .args(["schedule", "--at", bad])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("HH:MM"));
    }

    assert!(!temp.path().join("journals").exists());
    assert!(api.requests().is_empty());
}

#[test]
fn test_schedule_missing_credentials_fails_fast() {
    let temp = TempDir::new().unwrap();

    journal_bot_cmd()
        .arg("--root")
        .arg(temp.path())
        .args(["schedule", "--at", "09:00"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing required environment variable"));
}

#[test]
fn test_schedule_invalid_config_time_fails_fast() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("journal-bot.toml"), "schedule = \"later\"\n").unwrap();
    let api = StubContentsApi::start();

    authed_cmd(temp.path(), &api.base_url)
        .arg("schedule")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid schedule 'later'"));

    assert!(api.requests().is_empty());
}

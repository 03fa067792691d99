//! End-to-end checks of the offline commands

use std::path::Path;

use anyhow::Result;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(data_dir: &Path) -> Result<assert_cmd::Command> {
    let mut cmd = assert_cmd::Command::cargo_bin("componentai-cli")?;
    cmd.arg("--data-dir").arg(data_dir);
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn frameworks_lists_machine_values() -> Result<()> {
    let home = TempDir::new()?;
    cli(home.path())?
        .arg("frameworks")
        .assert()
        .success()
        .stdout(contains("html-css").and(contains("HTML + Tailwind + Bootstrap")));
    Ok(())
}

#[test]
fn history_starts_empty() -> Result<()> {
    let home = TempDir::new()?;
    cli(home.path())?
        .arg("history")
        .assert()
        .success()
        .stdout(contains("No history yet."));
    Ok(())
}

#[test]
fn settings_persist_between_runs() -> Result<()> {
    let home = TempDir::new()?;
    cli(home.path())?
        .args(["settings", "--font-size", "20", "--include-comments", "false"])
        .assert()
        .success();

    cli(home.path())?
        .arg("settings")
        .assert()
        .success()
        .stdout(contains("Editor font size: 20px").and(contains("Include comments: false")));

    assert_eq!(
        std::fs::read_to_string(home.path().join("editor-font-size"))?,
        "20"
    );
    Ok(())
}

#[test]
fn export_without_history_fails() -> Result<()> {
    let home = TempDir::new()?;
    let target = home.path().join("out.html");
    cli(home.path())?
        .args(["export", "-o"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(contains("There is no generated code yet"));
    assert!(!target.exists());
    Ok(())
}

#[test]
fn export_and_clear_round_trip() -> Result<()> {
    let home = TempDir::new()?;
    std::fs::write(
        home.path().join("componentai-history"),
        r#"[{"prompt":"hero banner","framework":{"value":"html-tailwind","label":"HTML + Tailwind CSS"},"code":"<section>hero</section>","createdAt":1700000000000}]"#,
    )?;

    cli(home.path())?
        .arg("history")
        .assert()
        .success()
        .stdout(contains("hero banner").and(contains("html-tailwind")));

    let target = home.path().join("ComponentAI.html");
    cli(home.path())?
        .args(["export", "-o"])
        .arg(&target)
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(&target)?, "<section>hero</section>");

    cli(home.path())?
        .arg("clear-history")
        .assert()
        .success()
        .stdout(contains("History cleared"));
    assert!(!home.path().join("componentai-history").exists());
    Ok(())
}

#[test]
fn unknown_framework_is_a_usage_error() -> Result<()> {
    let home = TempDir::new()?;
    cli(home.path())?
        .args(["generate", "a card", "-f", "react"])
        .assert()
        .code(2)
        .stderr(contains("Unknown framework 'react'"));
    Ok(())
}

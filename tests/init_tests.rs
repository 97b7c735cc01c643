//! Integration tests for init command

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::jcard_cmd;

#[test]
fn test_init_writes_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("jcard").join("config.toml");
    let journal = temp.path().join("journal.txt");

    jcard_cmd(&config)
        .arg("init")
        .arg(&journal)
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered journal 'default'"));

    let contents = fs::read_to_string(&config).unwrap();
    assert!(contents.contains("linewrap = 79"));
    assert!(contents.contains("[journals.default]"));
    assert!(journal.exists());
}

#[test]
fn test_init_named_journal() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");

    jcard_cmd(&config)
        .arg("init")
        .arg(temp.path().join("work.txt"))
        .arg("--journal")
        .arg("work")
        .assert()
        .success();

    let contents = fs::read_to_string(&config).unwrap();
    assert!(contents.contains("[journals.work]"));
}

#[test]
fn test_init_twice_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    let journal = temp.path().join("journal.txt");

    jcard_cmd(&config).arg("init").arg(&journal).assert().success();
    jcard_cmd(&config)
        .arg("init")
        .arg(&journal)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already registered"));
}

#[test]
fn test_config_directory_is_file() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("jcard");
    fs::write(&config_dir, "oops").unwrap();

    jcard_cmd(&config_dir.join("config.toml"))
        .arg("init")
        .arg(temp.path().join("journal.txt"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "configuration directory is a file, not a directory",
        ))
        .stderr(predicate::str::contains(config_dir.display().to_string()));
}

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// `jcard` with a private config file and no inherited logging filter
pub fn jcard_cmd(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jcard").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("XDG_CONFIG_HOME");
    cmd.env("JCARD_CONFIG", config);
    cmd
}

pub const SAMPLE_JOURNAL: &str = "\
[2021-01-01 12:00] New year. Long walk by the river.

Breakfast was late.

[2021-01-02 08:30] Quiet Saturday
";

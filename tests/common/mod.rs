//! Shared helpers for the CLI integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get an inventory command isolated from user configuration
pub fn inventory() -> Command {
    let mut cmd = Command::cargo_bin("inventory").unwrap();
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("inventory-tests-no-config"))
        .env_remove("INVENTORY_FORMAT")
        .env_remove("INVENTORY_ECHO")
        .env_remove("INVENTORY_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to write a request script into a temp directory
pub fn script_file(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Two parts, a sub-assembly and a top-level assembly that uses it
pub const NESTED: &str = "\
addPart P1
addPart P2
addAssembly A1 10 P1 2
addAssembly A2 5 A1 1 P2 3
";

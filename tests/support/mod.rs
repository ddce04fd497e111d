#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use uxs_architect::{Catalog, load_catalog_from_path};

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn bundled_catalog_path() -> PathBuf {
    repo_root().join("data/catalog.json")
}

pub fn whitefrost_path() -> PathBuf {
    repo_root().join("data/whitefrost_mission_project.json")
}

pub fn bundled_catalog() -> Result<Catalog> {
    load_catalog_from_path(&bundled_catalog_path())
}

/// The CLI binary with logging pinned and the catalog env override cleared.
pub fn uxs_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_uxs-architect"));
    cmd.env_remove("UXS_CATALOG_PATH")
        .env_remove("UXS_LOG")
        .env("UXS_ARCHITECT_ROOT", repo_root());
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    cmd.output()
        .with_context(|| format!("failed to run {:?}", cmd.get_program()))
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).with_context(|| {
        format!(
            "stdout was not JSON: {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

pub fn read_json(path: &Path) -> Result<Value> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

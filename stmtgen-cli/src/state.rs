use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$STMTGEN_HOME`, or `~/.stmtgen`
pub fn stmtgen_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STMTGEN_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".stmtgen"))
}

pub fn ensure_stmtgen_home() -> Result<PathBuf> {
    let dir = stmtgen_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

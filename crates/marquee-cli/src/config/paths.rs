//! Config directory resolution.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Else if `XDG_CONFIG_HOME` is set and non-empty, returns
///   `{XDG_CONFIG_HOME}/marquee/config.toml`.
/// - Otherwise returns `~/.config/marquee/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set
/// (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let xdg = std::env::var("XDG_CONFIG_HOME").ok();
    let home = std::env::var("HOME").ok();
    resolve_from(dir, xdg.as_deref(), home.as_deref())
}

/// Resolution over already-read environment values.
fn resolve_from(dir: Option<&PathBuf>, xdg: Option<&str>, home: Option<&str>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    if let Some(base) = xdg.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(base).join("marquee").join("config.toml"));
    }

    let home = home.context("neither XDG_CONFIG_HOME nor HOME is set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("marquee")
        .join("config.toml"))
}

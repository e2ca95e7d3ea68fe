//! Configuration file loading for kev.
//!
//! Discovers and loads `kev.toml` from the project root. Label overrides in the file are layered
//! over the built-in base label tables.

use crate::tables::LabelTables;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "kev.toml";

/// Top-level configuration from kev.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KevConfig {
    /// Base label overrides.
    pub labels: LabelsConfig,
}

/// Labels section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    /// Drop the built-in defaults and use only the tables below.
    pub replace_builtin: bool,

    /// Default labels for newly created services.
    pub service: BTreeMap<String, String>,

    /// Default labels for newly created volumes.
    pub volume: BTreeMap<String, String>,
}

impl KevConfig {
    /// Base label tables with this config's overrides applied.
    pub fn label_tables(&self) -> LabelTables {
        let mut tables = if self.labels.replace_builtin {
            LabelTables::empty()
        } else {
            LabelTables::default()
        };
        tables.service.extend(self.labels.service.clone());
        tables.volume.extend(self.labels.volume.clone());
        tables
    }
}

/// Discover the kev.toml config file.
///
/// Returns `None` if no config file is found in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a kev.toml config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode into a [`KevConfig`]. The
/// error chain names the file path.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<KevConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
///
/// Unknown sections are ignored and missing sections fall back to their defaults, so an empty
/// string yields [`KevConfig::default`].
///
/// # Errors
///
/// Returns an error if `contents` is not valid TOML or a label value is not a string.
pub fn parse_config(contents: &str) -> anyhow::Result<KevConfig> {
    let config: KevConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `root`, or return the default if there is none.
///
/// A missing file is not an error. A file that exists but cannot be read or parsed is.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<KevConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(KevConfig::default()),
    }
}

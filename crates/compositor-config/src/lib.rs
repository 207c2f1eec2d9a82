//! Configuration loading for the compositor demo: a screen default size and
//! a log directory override, loaded from TOML with the same discovery
//! convention used elsewhere in this codebase (a local file first, then the
//! platform config directory, falling back to built-in defaults on any
//! missing or malformed file).

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
pub struct ScreenConfig {
    #[serde(default = "ScreenConfig::default_width")]
    pub default_width: u16,
    #[serde(default = "ScreenConfig::default_height")]
    pub default_height: u16,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            default_width: Self::default_width(),
            default_height: Self::default_height(),
        }
    }
}

impl ScreenConfig {
    const fn default_width() -> u16 {
        80
    }
    const fn default_height() -> u16 {
        24
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LogConfig {
    /// Directory the demo's rolling-never file appender writes into.
    /// `None` means the demo falls back to its own default.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,
    pub file: ConfigFile,
}

/// Best-effort config path: a local `compositor.toml` before falling back to
/// the platform config directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("compositor.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("compositor").join("compositor.toml");
    }
    PathBuf::from("compositor.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                info!(target: "config", path = %path.display(), "config_loaded");
                Ok(Config {
                    raw: Some(content),
                    file,
                })
            }
            Err(e) => {
                info!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}

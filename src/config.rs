//! Coordinator tuning, loaded from and saved to a `settings.toml` file.
//!
//! Every field is optional in the file; missing or unparseable values fall
//! back to the named defaults, which reproduce the stock stacking behavior
//! (15 px gap, 3 visible items, 550 ms entrance).
//!
//! # Examples
//!
//! ```no_run
//! use toast_stack::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.gap = Some(20.0);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastStack";

/// Default inter-item spacing in pixels.
pub const DEFAULT_GAP_PX: f64 = 15.0;
/// Default number of simultaneously fully-visible items per group.
pub const DEFAULT_MAX_VISIBLE: usize = 3;
/// Default for whether visible flashes widen the max-visible allowance.
pub const DEFAULT_MAX_VISIBLE_IGNORES_FLASHES: bool = true;
/// Default entrance/reflow transition length in milliseconds.
pub const DEFAULT_ENTER_DURATION_MS: u64 = 550;
/// Default exit offset transition length in milliseconds.
pub const DEFAULT_EXIT_DURATION_MS: u64 = 300;
/// Default exit opacity transition length in milliseconds.
pub const DEFAULT_EXIT_OPACITY_DURATION_MS: u64 = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gap: Option<f64>,
    #[serde(default)]
    pub max_visible: Option<usize>,
    #[serde(default)]
    pub max_visible_ignores_flashes: Option<bool>,
    #[serde(default)]
    pub enter_duration_ms: Option<u64>,
    #[serde(default)]
    pub exit_duration_ms: Option<u64>,
    #[serde(default)]
    pub exit_opacity_duration_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gap: Some(DEFAULT_GAP_PX),
            max_visible: Some(DEFAULT_MAX_VISIBLE),
            max_visible_ignores_flashes: Some(DEFAULT_MAX_VISIBLE_IGNORES_FLASHES),
            enter_duration_ms: Some(DEFAULT_ENTER_DURATION_MS),
            exit_duration_ms: Some(DEFAULT_EXIT_DURATION_MS),
            exit_opacity_duration_ms: Some(DEFAULT_EXIT_OPACITY_DURATION_MS),
        }
    }
}

impl Config {
    /// Inter-item gap in pixels, falling back to [`DEFAULT_GAP_PX`].
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap.unwrap_or(DEFAULT_GAP_PX)
    }

    /// Maximum fully-visible items, falling back to [`DEFAULT_MAX_VISIBLE`].
    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible.unwrap_or(DEFAULT_MAX_VISIBLE)
    }

    /// Whether visible flash-category items widen the max-visible allowance.
    #[must_use]
    pub fn max_visible_ignores_flashes(&self) -> bool {
        self.max_visible_ignores_flashes
            .unwrap_or(DEFAULT_MAX_VISIBLE_IGNORES_FLASHES)
    }

    /// Entrance/reflow transition length.
    #[must_use]
    pub fn enter_duration(&self) -> Duration {
        Duration::from_millis(self.enter_duration_ms.unwrap_or(DEFAULT_ENTER_DURATION_MS))
    }

    /// Exit offset transition length.
    #[must_use]
    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_duration_ms.unwrap_or(DEFAULT_EXIT_DURATION_MS))
    }

    /// Exit opacity transition length.
    #[must_use]
    pub fn exit_opacity_duration(&self) -> Duration {
        Duration::from_millis(
            self.exit_opacity_duration_ms
                .unwrap_or(DEFAULT_EXIT_OPACITY_DURATION_MS),
        )
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_ticks_per_icon")]
    pub ticks_per_icon: u64,
    #[serde(default = "default_wheel_step")]
    pub wheel_step: i32,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_theme() -> String {
    "parchment".to_string()
}
fn default_tick_rate_ms() -> u64 {
    100
}
fn default_ticks_per_icon() -> u64 {
    30
}
fn default_wheel_step() -> i32 {
    1
}
fn default_log_file() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("golembook")
        .join("golembook.log")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            catalog_path: None,
            tick_rate_ms: default_tick_rate_ms(),
            ticks_per_icon: default_ticks_per_icon(),
            wheel_step: default_wheel_step(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_toml(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("golembook")
            .join("config.toml")
    }

    /// Clamp values that would stall the event loop or freeze icon rotation.
    pub fn normalize(&mut self) {
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = default_tick_rate_ms();
        }
        if self.ticks_per_icon == 0 {
            self.ticks_per_icon = default_ticks_per_icon();
        }
        if self.wheel_step < 1 {
            self.wheel_step = default_wheel_step();
        }
        if self.catalog_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            self.catalog_path = None;
        }
    }
}

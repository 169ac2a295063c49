//! RON configuration for the terminal client.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use pricewatch_core::ChartPanel;
use pricewatch_engine::{ClientSettings, DEFAULT_SCHEDULE_PATH};
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "pricewatch.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PanelConfig {
    pub id: String,
    #[serde(default)]
    pub active: bool,
    /// Panel fetches its chart on activation (carries a load marker).
    #[serde(default)]
    pub lazy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub base_url: String,
    #[serde(default = "default_schedule_path")]
    pub schedule_path: String,
    #[serde(default)]
    pub breadcrumb: Vec<String>,
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
    #[serde(default)]
    pub cookies: Vec<(String, String)>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub log_destination: LogDestination,
    #[serde(default)]
    pub verbose: bool,
}

fn default_schedule_path() -> String {
    DEFAULT_SCHEDULE_PATH.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            schedule_path: self.schedule_path.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            cookies: self.cookies.clone(),
        }
    }

    pub fn chart_panels(&self) -> Vec<ChartPanel> {
        self.panels
            .iter()
            .map(|panel| ChartPanel::new(panel.id.clone(), panel.active, panel.lazy))
            .collect()
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// First CLI argument, or `./pricewatch.ron`.
pub fn config_path_from_args(mut args: impl Iterator<Item = String>) -> PathBuf {
    args.next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

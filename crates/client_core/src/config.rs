use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::animation::AnimationTiming;

pub const DEFAULT_CONFIG_FILE: &str = "predictor.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid api_url '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_url: String,
    pub count_up_ms: u64,
    pub gauge_max: f64,
    pub gauge_delay_ms: u64,
    pub gauge_transition_ms: u64,
    pub fade_in_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".into(),
            count_up_ms: 600,
            gauge_max: 800.0,
            gauge_delay_ms: 200,
            gauge_transition_ms: 800,
            fade_in_ms: 600,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    count_up_ms: Option<u64>,
    gauge_max: Option<f64>,
    gauge_delay_ms: Option<u64>,
    gauge_transition_ms: Option<u64>,
    fade_in_ms: Option<u64>,
}

/// Defaults, then the config file, then the environment.
///
/// Without an explicit path a missing `predictor.toml` is skipped silently.
pub fn load_settings(config_path: Option<&Path>) -> Result<ClientSettings, ConfigError> {
    load_settings_with(config_path, |name| std::env::var(name).ok())
}

/// [`load_settings`] with the environment lookup supplied by the caller.
pub fn load_settings_with(
    config_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, ConfigError> {
    let mut settings = ClientSettings::default();

    match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            settings.apply_file(&raw, path)?;
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if let Ok(raw) = fs::read_to_string(path) {
                settings.apply_file(&raw, path)?;
            }
        }
    }

    settings.apply_env(lookup);
    settings.api_url()?;
    Ok(settings)
}

impl ClientSettings {
    pub fn apply_file(&mut self, raw: &str, origin: &Path) -> Result<(), ConfigError> {
        let file_cfg: FileConfig = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        if let Some(v) = file_cfg.api_url {
            self.api_url = v;
        }
        if let Some(v) = file_cfg.count_up_ms {
            self.count_up_ms = v;
        }
        if let Some(v) = file_cfg.gauge_max {
            self.gauge_max = v;
        }
        if let Some(v) = file_cfg.gauge_delay_ms {
            self.gauge_delay_ms = v;
        }
        if let Some(v) = file_cfg.gauge_transition_ms {
            self.gauge_transition_ms = v;
        }
        if let Some(v) = file_cfg.fade_in_ms {
            self.fade_in_ms = v;
        }
        Ok(())
    }

    /// Overrides from environment variables; empty or unparseable values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = read("API_URL") {
            self.api_url = v;
        }
        if let Some(v) = read("APP__API_URL") {
            self.api_url = v;
        }
        if let Some(v) = read("APP__COUNT_UP_MS").and_then(|v| v.trim().parse().ok()) {
            self.count_up_ms = v;
        }
        if let Some(v) = read("APP__GAUGE_MAX").and_then(|v| v.trim().parse().ok()) {
            self.gauge_max = v;
        }
        if let Some(v) = read("APP__GAUGE_DELAY_MS").and_then(|v| v.trim().parse().ok()) {
            self.gauge_delay_ms = v;
        }
        if let Some(v) = read("APP__GAUGE_TRANSITION_MS").and_then(|v| v.trim().parse().ok()) {
            self.gauge_transition_ms = v;
        }
        if let Some(v) = read("APP__FADE_IN_MS").and_then(|v| v.trim().parse().ok()) {
            self.fade_in_ms = v;
        }
    }

    pub fn api_url(&self) -> Result<Url, ConfigError> {
        Url::parse(self.api_url.trim()).map_err(|source| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            source,
        })
    }

    pub fn timing(&self) -> AnimationTiming {
        AnimationTiming {
            count_up: Duration::from_millis(self.count_up_ms),
            gauge_delay: Duration::from_millis(self.gauge_delay_ms),
            gauge_transition: Duration::from_millis(self.gauge_transition_ms),
            fade_in: Duration::from_millis(self.fade_in_ms),
            gauge_max: self.gauge_max,
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

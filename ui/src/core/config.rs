//! Dashboard configuration.
//!
//! Every field has a default so a missing or partial source still yields a
//! usable config. Sources by platform:
//! - Web: JSON in the `data-config` attribute of the metadata element.
//! - Desktop: TOML at `$PROPDASH_CONFIG`, else `config.toml` in the platform
//!   config dir. `PROPDASH_METADATA` and `PROPDASH_LOG` override the file.
//!
//! Unusable sources are logged and replaced by defaults.

use serde::{Deserialize, Serialize};
use tracing::Level;

use super::error::ConfigError;
use super::timing::PollPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    pub metadata_element_id: String,
    pub metadata_attribute: String,
    pub config_attribute: String,
    pub chart_target_id: String,
    pub metadata_path: Option<String>,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: PollPolicy::DEFAULT_INTERVAL_MS,
            max_poll_attempts: PollPolicy::DEFAULT_MAX_ATTEMPTS,
            metadata_element_id: "analytics-metadata".to_string(),
            metadata_attribute: "data-metadata".to_string(),
            config_attribute: "data-config".to_string(),
            chart_target_id: "analytics-chart".to_string(),
            metadata_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(self.poll_interval_ms, self.max_poll_attempts)
    }

    /// Parsed log level; unknown names fall back to `INFO`.
    pub fn level(&self) -> Level {
        self.log_level.trim().parse().unwrap_or(Level::INFO)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::ParseJson)?;
        config.validate()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.chart_target_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "chart_target_id",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(self)
    }

    /// Apply `PROPDASH_*` overrides using the given lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("PROPDASH_METADATA").filter(|v| !v.trim().is_empty()) {
            self.metadata_path = Some(path);
        }
        if let Some(level) = lookup("PROPDASH_LOG").filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
    }

    /// Load the config for the current platform.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let defaults = Self::default();
        match super::platform::element_attribute(
            &defaults.metadata_element_id,
            &defaults.config_attribute,
        ) {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                tracing::warn!(%err, "ignoring embedded config");
                defaults
            }),
            None => defaults,
        }
    }

    /// Load the config for the current platform.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var_os("PROPDASH_CONFIG")
            .map(std::path::PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => match Self::read_file(&path) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded config");
                    config
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "ignoring config file");
                    Self::default()
                }
            },
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn read_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&raw)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_config_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "Propdash", "Propdash")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

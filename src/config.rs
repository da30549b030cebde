use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub filter: FilterSettings,
    pub menu: MenuConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Settings applied while compiling a query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Compiled size limit for a single value pattern, in bytes.
    pub pattern_size_limit: usize,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            pattern_size_limit: 1 << 20,
        }
    }
}

/// Entries offered by the quick-filter menu
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub methods: Vec<String>,
    pub status_codes: Vec<u16>,
    pub rank_thresholds: Vec<i32>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            methods: ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            status_codes: vec![200, 201, 301, 302, 400, 401, 403, 404, 500, 502, 503],
            rank_thresholds: vec![5, 10, 20, 50, 100],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub max_url_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { max_url_width: 100 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Any `EnvFilter` directive, e.g. "debug" or "anomaly_rank=trace".
    pub level: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<AppConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static AppConfig {
    static DEFAULT_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::default);
    &DEFAULT_CONFIG
}

use crate::error::AppError;
use crate::pricing::Tier;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `GPU_PRICING__DEFAULTS__GPU=A10`
pub const ENV_PREFIX: &str = "GPU_PRICING";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// External catalog file; the embedded catalog is used when unset
    #[serde(default)]
    pub path: Option<String>,

    /// Warn when the catalog's last_updated date is older than this
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            stale_after_days: default_stale_after_days(),
        }
    }
}

/// Values used when the corresponding CLI flag is omitted
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub gpu: Option<String>,

    #[serde(default = "default_hours")]
    pub hours: String,

    #[serde(default)]
    pub tier: Tier,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            gpu: None,
            hours: default_hours(),
            tier: Tier::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShareConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_stale_after_days() -> u32 {
    90
}

fn default_hours() -> String {
    "1".to_string()
}

fn default_base_url() -> String {
    "https://gpu-pricing.local/".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Load configuration from an optional TOML file, then the environment
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> Result<(), AppError> {
    if let Some(gpu) = &cfg.defaults.gpu {
        if gpu.trim().is_empty() {
            return Err(AppError::ConfigError("defaults.gpu cannot be empty".to_string()));
        }
    }

    if let Some(path) = &cfg.catalog.path {
        if path.trim().is_empty() {
            return Err(AppError::ConfigError("catalog.path cannot be empty".to_string()));
        }
    }

    if let Err(e) = url::Url::parse(&cfg.share.base_url) {
        return Err(AppError::ConfigError(format!(
            "share.base_url '{}' is not a valid URL: {}",
            cfg.share.base_url, e
        )));
    }

    Ok(())
}

//! Environment-based configuration module
//!
//! Configuration can be set via:
//! 1. Environment variables (highest priority)
//! 2. .env file
//! 3. Default values (lowest priority)
//!
//! Bootstrap code reads the global instance once; library code always
//! receives an explicit `&AppConfig` (or a section of it) so tests can
//! substitute their own.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::{env, fs};

use crate::logger::LogLevel;

/// Application environment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Get environment from APP_ENV variable or default to Development
    pub fn from_env() -> Self {
        match env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Environment mode
    pub environment: Environment,

    /// Application name
    pub app_name: String,

    /// Application version
    pub version: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Image asset resolution configuration
    pub imatges: ImatgesConfig,

    /// Local storage configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog backend
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Default page size for product listings
    pub default_page_size: i64,
}

/// Image asset resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImatgesConfig {
    /// Root path the storefront serves product images from
    pub root: String,

    /// Placeholder asset shown when a product has no image
    pub placeholder: String,
}

impl ImatgesConfig {
    /// Ruta completa del placeholder sota l'arrel d'imatges.
    pub fn placeholder_path(&self) -> String {
        format!("{}/{}", self.root, self.placeholder)
    }
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory for the persisted cart and log files
    pub data_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level that gets written
    pub level: String,

    /// Write a daily log file under the data directory
    pub log_to_file: bool,

    /// Mirror log lines to stdout/stderr
    pub log_to_stdout: bool,

    /// JSON lines instead of human-readable lines
    pub json_format: bool,
}

impl LoggingConfig {
    pub fn level(&self) -> LogLevel {
        match self.level.to_uppercase().as_str() {
            "TRACE" => LogLevel::Trace,
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARN" => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let env_mode = Environment::from_env();

        Self {
            environment: env_mode,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "BiciFood".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),

            api: ApiConfig {
                base_url: env::var("BICIFOOD_API_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string()),
                timeout_secs: env::var("BICIFOOD_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                default_page_size: env::var("BICIFOOD_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(20),
            },

            imatges: ImatgesConfig {
                root: env::var("BICIFOOD_IMAGES_ROOT")
                    .unwrap_or_else(|_| "../../images".to_string()),
                placeholder: env::var("BICIFOOD_PLACEHOLDER_IMAGE")
                    .unwrap_or_else(|_| "placeholder-product.jpg".to_string()),
            },

            storage: StorageConfig {
                data_dir: env::var("BICIFOOD_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("bicifood-data")),
            },

            logging: LoggingConfig {
                level: env::var("RUST_LOG").unwrap_or_else(|_| {
                    if env_mode.is_production() {
                        "warn".to_string()
                    } else {
                        "debug".to_string()
                    }
                }),
                log_to_file: true,
                log_to_stdout: env::var("LOG_TO_STDOUT")
                    .map(|s| s == "true")
                    .unwrap_or(true),
                json_format: env_mode.is_production(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and defaults
    pub fn load() -> Self {
        Self::default()
    }

    /// Load configuration from a .env file (if exists)
    pub fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        let content = fs::read_to_string(path).ok()?;

        // Simple .env parser (key=value format)
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');

                env::set_var(key, value);
            }
        }

        Some(Self::default())
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Global configuration instance
static GLOBAL_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration
pub fn init_config() -> &'static AppConfig {
    GLOBAL_CONFIG.get_or_init(AppConfig::load)
}

/// Get the global configuration
pub fn get_config() -> &'static AppConfig {
    GLOBAL_CONFIG
        .get()
        .expect("Configuration not initialized. Call init_config() first.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.api.default_page_size, 20);
        assert_eq!(config.imatges.root, "../../images");
        assert_eq!(
            config.imatges.placeholder_path(),
            "../../images/placeholder-product.jpg"
        );
    }
}

//! # Console Configuration
//!
//! Where the API lives and how the pages behave.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MEGAPC_API_URL=http://10.0.0.5:8000/api                            │
//! │     MEGAPC_API_TIMEOUT_SECS=30                                         │
//! │     MEGAPC_LOW_STOCK_THRESHOLD=5                                       │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform config dir)            │
//! │     ~/.config/console/console.toml (Linux)                             │
//! │     ~/Library/Application Support/tn.megapc.console/console.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8000/api, threshold 10                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//! timeout_secs = 15
//!
//! [catalogue]
//! low_stock_threshold = 10
//! default_sort = "name"
//!
//! [dashboard]
//! daily_days = 30
//! recent_sales_days = 7
//! top_products_limit = 10
//!
//! [general]
//! company = "MegaPC"
//! email = "admin@megapc.tn"
//! currency = "TND (Tunisian Dinar)"
//!
//! [notifications]
//! low_stock_alerts = false
//! daily_reports = false
//! ```

use megapc_core::validation::{validate_daily_days, validate_recent_days, validate_top_limit};
use megapc_core::{SortKey, DEFAULT_LOW_STOCK_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

// =============================================================================
// API Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Prefix every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses `base_url`; only http and https are usable.
    pub fn parsed_base_url(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        Ok(url)
    }
}

// =============================================================================
// Page Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueSettings {
    /// Stock below this (and above zero) is flagged as low.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,

    /// Sort applied when `--sort` is not given.
    #[serde(default)]
    pub default_sort: SortKey,
}

fn default_low_stock_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for CatalogueSettings {
    fn default() -> Self {
        CatalogueSettings {
            low_stock_threshold: default_low_stock_threshold(),
            default_sort: SortKey::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Window of `/analytics/daily`.
    #[serde(default = "default_daily_days")]
    pub daily_days: u32,

    /// Window of the recent sales list.
    #[serde(default = "default_recent_sales_days")]
    pub recent_sales_days: u32,

    #[serde(default = "default_top_products_limit")]
    pub top_products_limit: u32,
}

fn default_daily_days() -> u32 {
    30
}
fn default_recent_sales_days() -> u32 {
    7
}
fn default_top_products_limit() -> u32 {
    10
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            daily_days: default_daily_days(),
            recent_sales_days: default_recent_sales_days(),
            top_products_limit: default_top_products_limit(),
        }
    }
}

/// Company details shown on the settings page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default = "default_company")]
    pub company: String,

    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_company() -> String {
    "MegaPC".to_string()
}

fn default_email() -> String {
    "admin@megapc.tn".to_string()
}

fn default_currency() -> String {
    "TND (Tunisian Dinar)".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        GeneralSettings {
            company: default_company(),
            email: default_email(),
            currency: default_currency(),
        }
    }
}

/// Notification toggles. Both start disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub low_stock_alerts: bool,

    #[serde(default)]
    pub daily_reports: bool,
}

// =============================================================================
// Main Console Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub catalogue: CatalogueSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub general: GeneralSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl ConsoleConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (console.toml)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::load_file(config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Defaults plus the config file, without environment overrides.
    ///
    /// This is what [`save`](Self::save) should write back, so a temporary
    /// `MEGAPC_*` variable never ends up persisted.
    pub fn load_file(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let Some(path) = config_path.or_else(Self::default_config_path) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading console config from file");
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to `config_path`, or the platform default.
    pub fn save(&self, config_path: Option<&Path>) -> ClientResult<PathBuf> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Console config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.api.parsed_base_url()?;

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        validate_daily_days(self.dashboard.daily_days)?;
        validate_recent_days(self.dashboard.recent_sales_days)?;
        validate_top_limit(self.dashboard.top_products_limit)?;

        Ok(())
    }

    /// Applies `MEGAPC_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("MEGAPC_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("MEGAPC_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric MEGAPC_API_TIMEOUT_SECS"),
            }
        }

        if let Some(threshold) = lookup("MEGAPC_LOW_STOCK_THRESHOLD") {
            match threshold.parse::<u32>() {
                Ok(t) => {
                    debug!(threshold = t, "Overriding low stock threshold from environment");
                    self.catalogue.low_stock_threshold = t;
                }
                Err(_) => warn!(value = %threshold, "Ignoring non-numeric MEGAPC_LOW_STOCK_THRESHOLD"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("tn", "megapc", "console")
            .map(|dirs| dirs.config_dir().join("console.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("megapc-config-{}-{}", std::process::id(), name))
            .join("console.toml")
    }

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.catalogue.low_stock_threshold, 10);
        assert_eq!(config.catalogue.default_sort, SortKey::Name);
        assert_eq!(config.dashboard.recent_sales_days, 7);
        assert_eq!(config.general.company, "MegaPC");
        assert_eq!(config.general.email, "admin@megapc.tn");
        assert!(!config.notifications.low_stock_alerts);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ConsoleConfig::default();

        config.api.base_url = "ftp://files.megapc.tn".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "localhost:8000/api".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "https://console.megapc.tn/api".to_string();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.api.timeout_secs = 5;
        config.dashboard.daily_days = 400;
        assert!(matches!(config.validate(), Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MEGAPC_API_URL", "http://10.0.0.5:8000/api"),
            ("MEGAPC_API_TIMEOUT_SECS", "30"),
            ("MEGAPC_LOW_STOCK_THRESHOLD", "five"),
        ]);
        let mut config = ConsoleConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:8000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.catalogue.low_stock_threshold, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ConsoleConfig = toml::from_str(
            r#"
            [catalogue]
            low_stock_threshold = 3
            default_sort = "margin"

            [notifications]
            daily_reports = true
            "#,
        )
        .unwrap();

        assert_eq!(config.catalogue.low_stock_threshold, 3);
        assert_eq!(config.catalogue.default_sort, SortKey::Margin);
        assert!(config.notifications.daily_reports);
        assert_eq!(config.api, ApiSettings::default());
        assert_eq!(config.general, GeneralSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let mut config = ConsoleConfig::default();
        config.general.company = "MegaPC Sfax".to_string();
        config.notifications.low_stock_alerts = true;

        let written = config.save(Some(&path)).unwrap();
        assert_eq!(written, path);

        let loaded = ConsoleConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.general.company, "MegaPC Sfax");
        assert!(loaded.notifications.low_stock_alerts);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_file_skips_environment() {
        let path = scratch_path("file-only");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[api]\nbase_url = \"http://file-host:8000/api\"\n").unwrap();

        let stored = ConsoleConfig::load_file(Some(path.clone())).unwrap();
        assert_eq!(stored.api.base_url, "http://file-host:8000/api");
        assert_eq!(stored.catalogue, CatalogueSettings::default());

        let missing = ConsoleConfig::load_file(Some(scratch_path("absent"))).unwrap();
        assert_eq!(missing, ConsoleConfig::default());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = scratch_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let result = ConsoleConfig::load(Some(path.clone()));
        assert!(matches!(result, Err(ClientError::ConfigLoadFailed(_))));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&ConsoleConfig::default()).unwrap();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[notifications]"));
        assert!(toml_str.contains("default_sort = \"name\""));
    }
}

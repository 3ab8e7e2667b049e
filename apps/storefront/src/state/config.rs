//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`storefront.toml`, or the path in `STOREFRONT_CONFIG`)
//! 3. Environment variables (`STOREFRONT_*`)
//!
//! ## Example `storefront.toml`
//! ```toml
//! [storage]
//! database_path = "/var/lib/storefront/storefront.db"
//! cart_key = "online-store-cart"
//!
//! [toast]
//! default_duration_ms = 3000
//! max_visible = 5
//!
//! [display]
//! currency_symbol = "$"
//! currency_decimals = 2
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use storefront_core::{Money, CART_STORAGE_KEY, DEFAULT_TOAST_DURATION};

/// File name looked up in the platform config directory.
const CONFIG_FILE_NAME: &str = "storefront.toml";

/// File name of the SQLite mirror in the platform data directory.
const DATABASE_FILE_NAME: &str = "storefront.db";

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where the cart snapshot is mirrored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file for the mirror. `None` uses the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            cart_key: default_cart_key(),
        }
    }
}

/// Toast notification behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastSettings {
    /// Milliseconds a toast stays visible when the caller gives no duration.
    #[serde(default = "default_toast_ms")]
    pub default_duration_ms: u64,

    /// Upper bound on simultaneously visible toasts. `None` = unbounded.
    #[serde(default)]
    pub max_visible: Option<usize>,
}

fn default_toast_ms() -> u64 {
    DEFAULT_TOAST_DURATION.as_millis() as u64
}

impl Default for ToastSettings {
    fn default() -> Self {
        ToastSettings {
            default_duration_ms: default_toast_ms(),
            max_visible: None,
        }
    }
}

/// Currency display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Currency symbol (for display)
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Number of decimal places for currency
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub toast: ToastSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; a file that exists but does not
    /// parse is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var("STOREFRONT_CONFIG").ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides_from(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.cart_key.trim().is_empty() {
            return Err(ConfigError::Invalid("cart_key must not be empty".into()));
        }

        if self.toast.max_visible == Some(0) {
            return Err(ConfigError::Invalid(
                "max_visible must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` overrides looked up through `lookup`.
    ///
    /// Unparseable numeric values are ignored with a warning.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STOREFRONT_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("STOREFRONT_CART_KEY") {
            self.storage.cart_key = key;
        }

        if let Some(ms) = lookup("STOREFRONT_TOAST_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.toast.default_duration_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring invalid STOREFRONT_TOAST_MS"),
            }
        }

        if let Some(max) = lookup("STOREFRONT_TOAST_MAX") {
            match max.parse::<usize>() {
                Ok(max) => self.toast.max_visible = Some(max),
                Err(_) => warn!(value = %max, "Ignoring invalid STOREFRONT_TOAST_MAX"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolves the SQLite mirror path.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
    /// - **Windows**: `%APPDATA%\storefront\storefront\data\storefront.db`
    /// - **Linux**: `~/.local/share/storefront/storefront.db`
    ///
    /// Falls back to the working directory when no home directory exists.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.database_path {
            return path.clone();
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
    }

    pub fn cart_key(&self) -> &str {
        &self.storage.cart_key
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast.default_duration_ms)
    }

    /// Renders money with the configured symbol and decimals.
    ///
    /// ```rust,ignore
    /// config.format_currency(Money::from_cents(-1234)) // "-$12.34"
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = u32::from(self.display.currency_decimals.min(2));
        let cents = amount.cents().unsigned_abs();
        let symbol = &self.display.currency_symbol;

        // Round half away from zero to the displayed precision
        let step = 10_u64.pow(2 - decimals);
        let scaled = cents.saturating_add(step / 2) / step;
        let sign = if amount.is_negative() && scaled != 0 { "-" } else { "" };
        let unit = 10_u64.pow(decimals);
        let major = scaled / unit;
        let minor = scaled % unit;

        if decimals == 0 {
            format!("{}{}{}", sign, symbol, major)
        } else {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                symbol,
                major,
                minor,
                width = decimals as usize
            )
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "storefront", "storefront")
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Layered configuration: defaults, then `config.toml`, then `TRIPFORM_*`
//! environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::i18n::Locale;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or had the wrong shape.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// `api_base_url` is not an absolute http(s) URL.
    #[error("invalid api_base_url {url}: {reason}")]
    BaseUrl { url: String, reason: String },

    /// The platform does not provide a config directory.
    #[error("could not determine XDG config directory")]
    NoConfigDir,

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL every API path is appended to.
    pub api_base_url: String,
    /// Initial UI locale.
    pub locale: Locale,
    /// Running inside a host that can close the app.
    pub embedded: bool,
    /// Delay between a successful submission and closing the host surface.
    pub close_delay_ms: u64,
    /// Images listed on the guide page.
    pub gallery: Vec<String>,
    /// Log file; defaults to the XDG data directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            locale: Locale::En,
            embedded: true,
            close_delay_ms: 2000,
            gallery: Vec::new(),
            log_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from `path` (or the default location) and the
    /// environment. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };
        Self::figment(&path).extract().map_err(|e| Box::new(e).into())
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("TRIPFORM_").only(&[
                "api_base_url",
                "locale",
                "embedded",
                "close_delay_ms",
                "log_file",
            ]))
    }

    /// Parses and checks `api_base_url`.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::BaseUrl {
            url: self.api_base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.api_base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    /// Resolves the log file path.
    pub fn log_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        Ok(data_dir.join("tripform").join("tripform.log"))
    }
}

/// `~/.config/tripform/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("tripform").join("config.toml"))
}

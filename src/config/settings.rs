//! Application settings configuration
//!
//! Defines the filter criteria, lookup backend and external tool settings.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

/// Where DNS answers come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LookupBackend {
    /// Shell out to `dig +short`
    Dig,
    /// Query with the built-in hickory resolver
    Native,
}

/// Domain filter settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub a_record_prefix: String,
    pub nameservers: Vec<String>,
    pub ignore_case: bool,
    pub parallel: usize,
    pub lookup_timeout_secs: u64,
    pub backend: LookupBackend,
    pub dig_path: String,
    /// Upstream servers for the native backend; empty means system config
    pub resolvers: Vec<IpAddr>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            a_record_prefix: "5.249".to_string(),
            nameservers: vec![
                "ns01.no.brand.one.com".to_string(),
                "ns02.no.brand.one.com".to_string(),
                "*.uniweb.no".to_string(),
                "*.fastname.no".to_string(),
            ],
            ignore_case: false,
            parallel: 5,
            lookup_timeout_secs: 10,
            backend: LookupBackend::Dig,
            dig_path: "dig".to_string(),
            resolvers: Vec::new(),
        }
    }
}

impl FilterSettings {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel == 0 {
            return Err(ConfigError::InvalidValue {
                key: "filter.parallel".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.lookup_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "filter.lookup_timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.nameservers.iter().all(|ns| ns.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "filter.nameservers".to_string(),
                message: "at least one nameserver pattern is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Settings for the `openssl` based tools
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpensslSettings {
    pub binary: String,
    pub timeout_secs: u64,
}

impl Default for OpensslSettings {
    fn default() -> Self {
        Self {
            binary: "openssl".to_string(),
            timeout_secs: 15,
        }
    }
}

impl OpensslSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub filter: FilterSettings,
    #[serde(default)]
    pub openssl: OpensslSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }
}

//! Configuration management.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Name of the config file in the home directory.
pub const CONFIG_FILE_NAME: &str = ".dnsdb-query.conf";

/// CLI configuration, read from a TOML file.
///
/// Keys are upper-case to stay compatible with existing
/// `~/.dnsdb-query.conf` files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// DNSDB API key.
    #[serde(rename = "APIKEY", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API server base URL.
    #[serde(rename = "SERVER", default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Default output format.
    #[serde(rename = "OUTPUT", default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = BaseDirs::new()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        Ok(dirs.home_dir().join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path; a missing file is an empty
    /// configuration.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;

        // An empty key is the same as no key
        if config.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            config.api_key = None;
        }

        Ok(config)
    }
}

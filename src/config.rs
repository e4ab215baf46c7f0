use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Timeout for every HTTP fetch in milliseconds (10 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 10_000;

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("purl-source/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_PYPI_URL: &str = "https://pypi.org";
pub const DEFAULT_NPM_URL: &str = "https://registry.npmjs.org";
pub const DEFAULT_CRATES_URL: &str = "https://crates.io";
pub const DEFAULT_MAVEN_URL: &str = "https://repo1.maven.org";

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    pub user_agent: String,
    pub registries: RegistriesConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: FETCH_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            registries: RegistriesConfig::default(),
        }
    }
}

/// Registry base URLs
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistriesConfig {
    pub pypi: String,
    pub npm: String,
    pub crates: String,
    pub maven: String,
}

impl Default for RegistriesConfig {
    fn default() -> Self {
        Self {
            pypi: DEFAULT_PYPI_URL.to_string(),
            npm: DEFAULT_NPM_URL.to_string(),
            crates: DEFAULT_CRATES_URL.to_string(),
            maven: DEFAULT_MAVEN_URL.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load the explicit file if given, else the default file if it exists,
    /// else built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = config_path();
        if default_path.is_file() {
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the path to the config directory for purl-source.
/// Uses $XDG_CONFIG_HOME/purl-source if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/purl-source,
/// or ./purl-source if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("purl-source")
}

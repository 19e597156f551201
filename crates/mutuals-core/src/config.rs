use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use mutuals_util::errors::MutualsError;

/// Default scraper API host.
pub const DEFAULT_API_HOST: &str = "instagram-scraper-api2.p.rapidapi.com";

/// Largest page the provider will serve in one request.
pub const MAX_BATCH_SIZE: u32 = 1000;

/// Environment variable overriding `[api] key`.
pub const ENV_API_KEY: &str = "MUTUALS_API_KEY";
/// Environment variable overriding `[api] host`.
pub const ENV_API_HOST: &str = "MUTUALS_API_HOST";
/// Environment variable overriding `[api] base-url`.
pub const ENV_BASE_URL: &str = "MUTUALS_BASE_URL";

/// Global user configuration loaded from `~/.mutuals/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Provider connection settings from `[api]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub key: Option<String>,
    /// Overrides the `https://{host}` base URL, e.g. for a local mirror.
    #[serde(default, rename = "base-url")]
    pub base_url: Option<String>,
    #[serde(default = "default_batch_size", rename = "batch-size")]
    pub batch_size: u32,
    #[serde(default = "default_timeout_secs", rename = "timeout-secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_in_flight", rename = "max-in-flight")]
    pub max_in_flight: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            key: None,
            base_url: None,
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_batch_size() -> u32 {
    MAX_BATCH_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_in_flight() -> usize {
    8
}

impl ApiConfig {
    /// Base URL requests are issued against, without a trailing slash.
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.host),
        }
    }

    /// Page size clamped to the provider's `1..=1000` range.
    pub fn effective_batch_size(&self) -> u32 {
        self.batch_size.clamp(1, MAX_BATCH_SIZE)
    }

    /// The API key, or a configuration error explaining how to set one.
    pub fn require_key(&self) -> Result<&str, MutualsError> {
        match self.key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(MutualsError::Config {
                message: format!(
                    "No API key configured (set [api] key in {} or {ENV_API_KEY})",
                    GlobalConfig::default_path().display()
                ),
            }),
        }
    }
}

/// Search defaults from `[search]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_depth", rename = "max-depth")]
    pub max_depth: usize,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_max_depth() -> usize {
    3
}

fn default_concurrency() -> usize {
    4
}

impl GlobalConfig {
    /// Load `~/.mutuals/config.toml` (or defaults if it doesn't exist), then
    /// apply `MUTUALS_*` environment overrides.
    pub fn load() -> miette::Result<Self> {
        let mut config = Self::load_from(&Self::default_path())?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load a config file without consulting the environment.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| MutualsError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| {
            MutualsError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Override file values with non-empty variables returned by `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = get(ENV_API_KEY) {
            self.api.key = Some(key);
        }
        if let Some(host) = get(ENV_API_HOST) {
            self.api.host = host;
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.api.base_url = Some(url);
        }
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the mutuals data directory (`~/.mutuals/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".mutuals")
}

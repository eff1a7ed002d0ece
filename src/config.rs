use std::fmt;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use url::Url;

use crate::client::API_ENDPOINT;
use crate::error::ConfigError;

pub const API_KEY_ENV: &str = "LINEAR_API_KEY";
pub const API_URL_ENV: &str = "LINEAR_API_URL";

const CONFIG_DIR: &str = "linear-project-updates";
const CONFIG_FILE: &str = "config";

/// Everything the pipeline needs from the environment, resolved once at startup.
pub struct Config {
    api_key: String,
    endpoint: Url,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>, endpoint: Url) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint,
        }
    }

    /// Resolve configuration from `LINEAR_API_KEY`, `LINEAR_API_URL` and the config file.
    pub fn load() -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(std::env::var(API_URL_ENV).ok())?;

        let api_key = resolve_api_key(std::env::var(API_KEY_ENV).ok(), Self::config_path)?;

        Ok(Self::new(api_key, endpoint))
    }

    /// `~/.config/linear-project-updates/config`
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::NoHomeDir)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Pick the API key: a non-empty environment value wins, then the first
/// non-empty content of the config file.
///
/// `config_path` is only called when the environment value is missing or blank.
pub fn resolve_api_key(
    env_value: Option<String>,
    config_path: impl FnOnce() -> Result<PathBuf, ConfigError>,
) -> Result<String, ConfigError> {
    if let Some(key) = non_empty(env_value) {
        tracing::debug!(source = API_KEY_ENV, "using API key from environment");
        return Ok(key);
    }

    let path = config_path()?;
    if let Some(key) = read_key_file(&path)? {
        tracing::debug!(path = %path.display(), "using API key from config file");
        return Ok(key);
    }

    Err(ConfigError::MissingApiKey {
        env_var: API_KEY_ENV,
        path,
    })
}

fn read_key_file(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(non_empty(Some(contents)))
}

fn parse_endpoint(value: Option<String>) -> Result<Url, ConfigError> {
    let raw = non_empty(value).unwrap_or_else(|| API_ENDPOINT.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidEndpoint(format!("{raw}: {e}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "config.json";
const DEFAULT_REDDIT_BASE_URL: &str = "https://oauth.reddit.com";
const DEFAULT_REDDIT_AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
const DEFAULT_FETCH_DELAY_IN_SECONDS: u64 = 3600;
const DEFAULT_REQUEST_TIMEOUT_IN_SECONDS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub store: StoreConfig,
    pub reddit: RedditConfig,
    #[serde(default = "default_fetch_delay")]
    pub fetch_delay_in_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_in_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
}

/// Script-app credentials for Reddit's OAuth password grant.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RedditConfig {
    pub user_agent: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_reddit_base_url")]
    pub base_url: String,
    #[serde(default = "default_reddit_auth_url")]
    pub auth_url: String,
}

impl Config {
    /// Loads the file named by `CONFIG_PATH`, falling back to `config.json`.
    pub fn from_env() -> Result<Config, ConfigError> {
        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Self::load(path)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let display_path = path.display().to_string();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display_path.clone(),
            source,
        })?;

        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: display_path,
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_secs(self.fetch_delay_in_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_in_seconds)
    }
}

fn default_fetch_delay() -> u64 {
    DEFAULT_FETCH_DELAY_IN_SECONDS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_IN_SECONDS
}

fn default_reddit_base_url() -> String {
    DEFAULT_REDDIT_BASE_URL.to_string()
}

fn default_reddit_auth_url() -> String {
    DEFAULT_REDDIT_AUTH_URL.to_string()
}

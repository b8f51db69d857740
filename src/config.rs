// Environment-driven configuration
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::comments::DEFAULT_COMMENT_LIMIT;
use crate::youtube_client::DEFAULT_BASE_URL;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YouTube Data API key is missing. Set API_KEY (or YOUTUBE_API_KEY) in the environment or .env file")]
    MissingApiKey,
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub allowed_origins: Vec<String>,
    pub bind_addr: SocketAddr,
    pub youtube_base_url: String,
    pub request_timeout: Duration,
    pub comment_limit: usize,
    pub cache_capacity: u64,
    pub cache_ttl: Duration,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .or_else(|| lookup("YOUTUBE_API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            api_key,
            allowed_origins,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 5000)))?,
            youtube_base_url: lookup("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10)?),
            comment_limit: parse_or(&lookup, "COMMENT_LIMIT", DEFAULT_COMMENT_LIMIT)?,
            cache_capacity: parse_or(&lookup, "CHANNEL_CACHE_CAPACITY", 1000)?,
            cache_ttl: Duration::from_secs(parse_or(&lookup, "CHANNEL_CACHE_TTL_SECS", 300)?),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::info;
use url::Url;

const DEFAULT_PORT: &str = "8010";
const DEFAULT_API_BASE_URL: &str = "https://api.realdevsquad.com";
const DEFAULT_IMAGE_BASE_URL: &str =
    "https://raw.githubusercontent.com/Real-Dev-Squad/website-static/main/members";
const DEFAULT_MEMBERS_URL: &str = "https://members.realdevsquad.com";
const DEFAULT_CACHE_MAX_AGE: &str = "3600";
const DEFAULT_FETCH_TIMEOUT_SECS: &str = "10";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_base_url: Url,
    pub image_base_url: Url,
    pub members_url: Url,
    /// `max-age` in seconds sent on every member page
    pub cache_max_age: u32,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Config {
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            api_base_url: try_load(&lookup, "API_BASE_URL", DEFAULT_API_BASE_URL)?,
            image_base_url: try_load(&lookup, "IMAGE_BASE_URL", DEFAULT_IMAGE_BASE_URL)?,
            members_url: try_load(&lookup, "MEMBERS_URL", DEFAULT_MEMBERS_URL)?,
            cache_max_age: try_load(&lookup, "CACHE_MAX_AGE", DEFAULT_CACHE_MAX_AGE)?,
            fetch_timeout: Duration::from_secs(try_load(
                &lookup,
                "FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )?),
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_owned()
    });

    value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
        value,
    })
}

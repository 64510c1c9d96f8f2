use std::env;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, Secrets};

pub const DEFAULT_REQUEST_TOKEN_URL: &str = "https://www.plurk.com/OAuth/request_token";
pub const DEFAULT_AUTHORIZE_URL: &str = "https://www.plurk.com/OAuth/authorize";
pub const DEFAULT_ACCESS_TOKEN_URL: &str = "https://www.plurk.com/OAuth/access_token";
pub const DEFAULT_API_BASE_URL: &str = "https://www.plurk.com/APP/";

pub const PLURK_CONSUMER_KEY: &str = "PLURK_CONSUMER_KEY";
pub const PLURK_CONSUMER_SECRET: &str = "PLURK_CONSUMER_SECRET";
pub const PLURK_REQUEST_TOKEN_URL: &str = "PLURK_REQUEST_TOKEN_URL";
pub const PLURK_AUTHORIZE_URL: &str = "PLURK_AUTHORIZE_URL";
pub const PLURK_ACCESS_TOKEN_URL: &str = "PLURK_ACCESS_TOKEN_URL";
pub const PLURK_API_BASE_URL: &str = "PLURK_API_BASE_URL";

/// Client configuration: consumer credentials and service endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub secrets: Secrets,
    pub request_token_url: String,
    pub authorize_url: String,
    pub access_token_url: String,
    pub api_base_url: String,
}

impl Config {
    /// Creates a configuration pointing at the Plurk endpoints.
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Config {
            secrets: Secrets::new(consumer_key, consumer_secret),
            request_token_url: DEFAULT_REQUEST_TOKEN_URL.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            access_token_url: DEFAULT_ACCESS_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Loads the configuration from the environment.
    ///
    /// - [`PLURK_CONSUMER_KEY`] and [`PLURK_CONSUMER_SECRET`] are required.
    /// - [`PLURK_REQUEST_TOKEN_URL`], [`PLURK_AUTHORIZE_URL`],
    ///   [`PLURK_ACCESS_TOKEN_URL`] and [`PLURK_API_BASE_URL`] override the
    ///   default endpoints when set.
    pub fn from_env() -> Result<Self> {
        let consumer_key = required_env(PLURK_CONSUMER_KEY)?;
        let consumer_secret = required_env(PLURK_CONSUMER_SECRET)?;

        let mut config = Config::new(consumer_key, consumer_secret);
        if let Ok(v) = env::var(PLURK_REQUEST_TOKEN_URL) {
            config.request_token_url = v;
        }
        if let Ok(v) = env::var(PLURK_AUTHORIZE_URL) {
            config.authorize_url = v;
        }
        if let Ok(v) = env::var(PLURK_ACCESS_TOKEN_URL) {
            config.access_token_url = v;
        }
        if let Ok(v) = env::var(PLURK_API_BASE_URL) {
            config.api_base_url = v;
        }
        Ok(config)
    }

    /// set the request token endpoint
    pub fn request_token_url<T: Into<String>>(self, url: T) -> Self {
        Config {
            request_token_url: url.into(),
            ..self
        }
    }

    /// set the authorization page url
    pub fn authorize_url<T: Into<String>>(self, url: T) -> Self {
        Config {
            authorize_url: url.into(),
            ..self
        }
    }

    /// set the access token endpoint
    pub fn access_token_url<T: Into<String>>(self, url: T) -> Self {
        Config {
            access_token_url: url.into(),
            ..self
        }
    }

    /// set the base url every API path is relative to
    pub fn api_base_url<T: Into<String>>(self, url: T) -> Self {
        Config {
            api_base_url: url.into(),
            ..self
        }
    }

    /// Joins `path` onto the API base with exactly one `/` in between.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn required_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Configuration(format!(
            "environment variable {} is not set",
            key
        ))),
    }
}

use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Static settings for one provider connector. Set once at construction.
#[derive(Clone)]
pub struct ConnectorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub country: String,
    pub page_size: u32,
    pub timeout: Duration,
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("country", &self.country)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ConnectorConfig {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the API key and an optional base URL override from the environment.
    ///
    /// A missing key is accepted as-is; the provider will reject the request.
    pub fn from_env(key_var: &str, base_url_var: &str, default_base_url: &str) -> Result<Self> {
        Self::from_lookup(key_var, base_url_var, default_base_url, |name| env::var(name).ok())
    }

    pub fn from_lookup<F>(key_var: &str, base_url_var: &str, default_base_url: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(key_var);
        let config = Self::new(api_key, default_base_url);
        match lookup(base_url_var).filter(|url| !url.trim().is_empty()) {
            Some(url) => config.with_base_url(url),
            None => Ok(config),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        self.base_url = base_url;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

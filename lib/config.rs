//! Configuration for the docs MCP server.
//!
//! Defaults point at the OpenBB Workspace documentation. Every field can be
//! overridden from the environment with [`DocsConfig::from_env`].

use std::time::Duration;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{DocsError, Result};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Default table-of-contents document.
pub const DEFAULT_TOC_URL: &str = "https://docs.openbb.co/workspace/llms.txt";

/// Default full documentation document.
pub const DEFAULT_FULL_DOCS_URL: &str = "https://docs.openbb.co/workspace/llms-full.txt";

/// Default timeout for `discover_sections`, in seconds.
pub const DEFAULT_DISCOVER_TIMEOUT_SECS: u64 = 30;

/// Default timeout for `fetch_content`, in seconds. The full docs payload is larger.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Origins allowed to call the server from a browser by default.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://pro.openbb.co",
    "https://pro.openbb.dev",
    "http://localhost:1420",
];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Global configuration for the docs server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsConfig {
    /// URL of the table-of-contents document.
    pub toc_url: String,

    /// URL of the full documentation document.
    pub full_docs_url: String,

    /// Request timeout for section discovery, in seconds.
    pub discover_timeout_secs: u64,

    /// Request timeout for content fetching, in seconds.
    pub fetch_timeout_secs: u64,

    /// Origins allowed by the CORS policy.
    pub allowed_origins: Vec<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DocsConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DOCS_TOC_URL`: table-of-contents URL
    /// - `DOCS_FULL_URL`: full documentation URL
    /// - `DOCS_DISCOVER_TIMEOUT_SECS`: discovery timeout (default: 30)
    /// - `DOCS_FETCH_TIMEOUT_SECS`: fetch timeout (default: 60)
    /// - `DOCS_ALLOWED_ORIGINS`: comma separated CORS origins
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        Self {
            toc_url: lookup("DOCS_TOC_URL").unwrap_or(default.toc_url),
            full_docs_url: lookup("DOCS_FULL_URL").unwrap_or(default.full_docs_url),
            discover_timeout_secs: lookup("DOCS_DISCOVER_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.discover_timeout_secs),
            fetch_timeout_secs: lookup("DOCS_FETCH_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.fetch_timeout_secs),
            allowed_origins: lookup("DOCS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Check that the upstream URLs and CORS origins are usable.
    pub fn validate(&self) -> Result<()> {
        validate_http_url("toc_url", &self.toc_url)?;
        validate_http_url("full_docs_url", &self.full_docs_url)?;

        if self.discover_timeout_secs == 0 {
            return Err(config_error("discover_timeout_secs", "must be greater than zero"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(config_error("fetch_timeout_secs", "must be greater than zero"));
        }

        self.origin_headers().map(|_| ())
    }

    /// Timeout for section discovery.
    pub fn discover_timeout(&self) -> Duration {
        Duration::from_secs(self.discover_timeout_secs)
    }

    /// Timeout for content fetching.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Allowed origins as header values for the CORS layer.
    pub fn origin_headers(&self) -> Result<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|e| config_error("allowed_origins", &format!("{origin}: {e}")))
            })
            .collect()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn config_error(key: &str, message: &str) -> DocsError {
    DocsError::Config {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn validate_http_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| config_error(key, &format!("{value}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(config_error(key, &format!("unsupported scheme: {scheme}"))),
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            toc_url: DEFAULT_TOC_URL.into(),
            full_docs_url: DEFAULT_FULL_DOCS_URL.into(),
            discover_timeout_secs: DEFAULT_DISCOVER_TIMEOUT_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DocsConfig::default();
        assert_eq!(config.toc_url, DEFAULT_TOC_URL);
        assert_eq!(config.full_docs_url, DEFAULT_FULL_DOCS_URL);
        assert_eq!(config.discover_timeout(), Duration::from_secs(30));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(60));
        assert_eq!(config.allowed_origins.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = DocsConfig::from_lookup(lookup_from(&[
            ("DOCS_TOC_URL", "http://localhost:9000/llms.txt"),
            ("DOCS_FETCH_TIMEOUT_SECS", "5"),
            ("DOCS_ALLOWED_ORIGINS", "http://a.test, http://b.test,,"),
        ]));

        assert_eq!(config.toc_url, "http://localhost:9000/llms.txt");
        assert_eq!(config.full_docs_url, DEFAULT_FULL_DOCS_URL);
        assert_eq!(config.fetch_timeout_secs, 5);
        assert_eq!(config.discover_timeout_secs, DEFAULT_DISCOVER_TIMEOUT_SECS);
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_from_lookup_ignores_unparsable_numbers() {
        let config = DocsConfig::from_lookup(lookup_from(&[("DOCS_DISCOVER_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.discover_timeout_secs, DEFAULT_DISCOVER_TIMEOUT_SECS);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = DocsConfig {
            toc_url: "not-a-url".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("toc_url"));
    }

    #[test]
    fn test_validate_rejects_unsupported_scheme() {
        let config = DocsConfig {
            full_docs_url: "ftp://example.com/llms-full.txt".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = DocsConfig {
            fetch_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_origin() {
        let config = DocsConfig {
            allowed_origins: vec!["http://ok.test".into(), "bad\norigin".into()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

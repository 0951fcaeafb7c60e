//! Plain-text document fetching over HTTP.

use std::time::Duration;

use crate::types::{DocsError, Result};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// User-Agent header for requests.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; MCPDocsServer/1.0)";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// HTTP client scoped to a single operation call.
///
/// Every request made through one fetcher shares the same overall timeout.
pub struct Fetcher {
    client: reqwest::Client,
    timeout: Duration,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Fetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(DocsError::Client)?;

        Ok(Self { client, timeout })
    }

    /// GET `url` and return the body as text. Non-2xx statuses are errors.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "fetching document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocsError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.request_error(url, e))?;

        tracing::debug!(url, bytes = text.len(), "fetched document");
        Ok(text)
    }

    fn request_error(&self, url: &str, error: reqwest::Error) -> DocsError {
        if error.is_timeout() {
            DocsError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            DocsError::Request {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        assert!(Fetcher::new(Duration::from_secs(30)).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_request_error() {
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch_text("not a url").await.unwrap_err();
        assert_eq!(err.code(), "REQUEST_FAILED");
        assert_eq!(err.kind(), "FetchError");
    }
}

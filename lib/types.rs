//! Shared types and error definitions for the docs MCP server.

use std::error::Error as StdError;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

//--------------------------------------------------------------------------------------------------
// Types: Error
//--------------------------------------------------------------------------------------------------

/// Docs server error types.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("HTTP error {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Section '{0}' not found in documentation.")]
    SectionNotFound(String),

    #[error("Error extracting section '{title}': {reason}")]
    Extraction { title: String, reason: String },

    #[error("Invalid configuration value for {key}: {message}")]
    Config { key: String, message: String },
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DocsError {
    /// Get the error code for this error variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::HttpStatus { .. } => "HTTP_ERROR",
            Self::Timeout { .. } => "TIMEOUT",
            Self::Request { .. } => "REQUEST_FAILED",
            Self::Client(_) => "CLIENT_ERROR",
            Self::SectionNotFound(_) => "SECTION_NOT_FOUND",
            Self::Extraction { .. } => "EXTRACTION_ERROR",
            Self::Config { .. } => "CONFIG_ERROR",
        }
    }

    /// Error kind reported to callers as `error_type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HttpStatus { .. } | Self::Timeout { .. } | Self::Request { .. } | Self::Client(_) => {
                "FetchError"
            }
            Self::SectionNotFound(_) => "SectionNotFound",
            Self::Extraction { .. } => "ExtractionError",
            Self::Config { .. } => "ConfigError",
        }
    }

    /// Render the error and its source chain, one cause per line.
    pub fn trace(&self) -> String {
        let mut lines = vec![format!("{}: {}", self.kind(), self)];
        let mut source = StdError::source(self);
        while let Some(cause) = source {
            lines.push(format!("caused by: {}", cause));
            source = cause.source();
        }
        lines.join("\n")
    }
}

//--------------------------------------------------------------------------------------------------
// Types: Common
//--------------------------------------------------------------------------------------------------

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SectionDescriptor {
    /// Section title as written in the link text.
    pub title: String,

    /// Category header the entry was listed under (empty if none).
    pub category: String,

    /// Link target of the entry.
    pub url: String,

    /// `"<category>: <title>"`, or just the title without a category.
    pub description: String,
}

/// Content extracted for one requested section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedSection {
    /// URL from the table of contents, or `"URL not found"`.
    pub url: String,

    /// Verbatim section body, or a placeholder message.
    pub content: String,
}

/// Result type for docs operations.
pub type Result<T> = std::result::Result<T, DocsError>;

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let fetch = DocsError::HttpStatus {
            url: "https://x/toc".into(),
            status: 404,
        };
        assert_eq!(fetch.kind(), "FetchError");

        let timeout = DocsError::Timeout {
            url: "https://x/toc".into(),
            timeout_secs: 30,
        };
        assert_eq!(timeout.kind(), "FetchError");

        assert_eq!(DocsError::SectionNotFound("A".into()).kind(), "SectionNotFound");
        assert_eq!(
            DocsError::Extraction {
                title: "A".into(),
                reason: "boom".into()
            }
            .kind(),
            "ExtractionError"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DocsError::HttpStatus {
                url: "u".into(),
                status: 500
            }
            .code(),
            "HTTP_ERROR"
        );
        assert_eq!(
            DocsError::Timeout {
                url: "u".into(),
                timeout_secs: 1
            }
            .code(),
            "TIMEOUT"
        );
        assert_eq!(DocsError::SectionNotFound("x".into()).code(), "SECTION_NOT_FOUND");
        assert_eq!(
            DocsError::Config {
                key: "k".into(),
                message: "m".into()
            }
            .code(),
            "CONFIG_ERROR"
        );
    }

    #[test]
    fn test_placeholder_messages() {
        assert_eq!(
            DocsError::SectionNotFound("Widgets".into()).to_string(),
            "Section 'Widgets' not found in documentation."
        );
        assert_eq!(
            DocsError::Extraction {
                title: "Widgets".into(),
                reason: "index out of range".into()
            }
            .to_string(),
            "Error extracting section 'Widgets': index out of range"
        );
    }

    #[test]
    fn test_trace_without_source() {
        let err = DocsError::HttpStatus {
            url: "https://x/toc".into(),
            status: 503,
        };
        assert_eq!(err.trace(), "FetchError: HTTP error 503 fetching https://x/toc");
    }
}

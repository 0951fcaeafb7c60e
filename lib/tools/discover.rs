//! discover_sections tool implementation.

use std::sync::Arc;

use indexmap::IndexMap;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{ErrorData as McpError, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Failure;
use crate::config::DocsConfig;
use crate::fetcher::Fetcher;
use crate::toc::{parse_toc, section_url_map};
use crate::types::Result;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Input for discover_sections tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DiscoverSectionsInput {
    /// The user's question or information request.
    pub user_query: String,
}

/// Output for discover_sections tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DiscoverSectionsOutput {
    /// Whether the table of contents was fetched and parsed.
    pub success: bool,

    /// The original user query, for reference.
    pub query: String,

    /// The complete table of contents, verbatim. Empty on failure.
    pub raw_toc_content: String,

    /// Section titles mapped to their documentation URLs, in TOC order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_urls: Option<IndexMap<String, String>>,

    /// Error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error kind on failure (e.g. "FetchError").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// Error and its causes, one per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

/// Result of a successful discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverPayload {
    pub raw_toc_content: String,
    pub section_urls: IndexMap<String, String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DiscoverSectionsOutput {
    /// Fold an operation result into the tool response.
    pub fn from_result(query: String, result: Result<DiscoverPayload>) -> Self {
        match result {
            Ok(payload) => Self {
                success: true,
                query,
                raw_toc_content: payload.raw_toc_content,
                section_urls: Some(payload.section_urls),
                error: None,
                error_type: None,
                traceback: None,
            },
            Err(err) => {
                tracing::error!(error_type = err.kind(), "discover_sections failed: {}", err);
                let failure = Failure::from(&err);
                Self {
                    success: false,
                    query,
                    raw_toc_content: String::new(),
                    section_urls: None,
                    error: Some(failure.error),
                    error_type: Some(failure.error_type),
                    traceback: Some(failure.traceback),
                }
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Fetch the table of contents and map every section title to its URL.
///
/// The TOC is not filtered by the query: relevance is left to the caller.
pub async fn discover(config: &DocsConfig) -> Result<DiscoverPayload> {
    let fetcher = Fetcher::new(config.discover_timeout())?;
    let raw_toc_content = fetcher.fetch_text(&config.toc_url).await?;

    let sections = parse_toc(&raw_toc_content);
    tracing::debug!(sections = sections.len(), "parsed table of contents");

    Ok(DiscoverPayload {
        section_urls: section_url_map(&sections),
        raw_toc_content,
    })
}

/// Handle the discover_sections tool call.
pub async fn handle_discover_sections(
    config: Arc<DocsConfig>,
    params: Parameters<DiscoverSectionsInput>,
) -> std::result::Result<Json<DiscoverSectionsOutput>, McpError> {
    let input = params.0;
    let result = discover(&config).await;
    Ok(Json(DiscoverSectionsOutput::from_result(input.user_query, result)))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

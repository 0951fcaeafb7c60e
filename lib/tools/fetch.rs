//! fetch_content tool implementation.

use std::sync::Arc;

use indexmap::IndexMap;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{ErrorData as McpError, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Failure;
use crate::config::DocsConfig;
use crate::fetcher::Fetcher;
use crate::sections::extract_sections;
use crate::toc::{parse_toc, section_url_map};
use crate::types::{ExtractedSection, Result};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// URL reported for a requested title that has no TOC entry.
pub const URL_NOT_FOUND: &str = "URL not found";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Input for fetch_content tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchContentInput {
    /// Exact section titles, as listed by discover_sections (at most 3).
    pub section_titles: Vec<String>,

    /// The original user question.
    pub user_query: String,
}

/// Output for fetch_content tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchContentOutput {
    /// Whether both documents were fetched.
    pub success: bool,

    /// The original user question.
    pub user_query: String,

    /// Requested titles, in request order, mapped to their URL and content.
    /// Empty on failure.
    pub extracted_content: IndexMap<String, ExtractedSection>,

    /// Number of entries in extracted_content, including not-found placeholders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections_found: Option<usize>,

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

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl FetchContentOutput {
    /// Fold an operation result into the tool response.
    pub fn from_result(
        user_query: String,
        result: Result<IndexMap<String, ExtractedSection>>,
    ) -> Self {
        match result {
            Ok(extracted_content) => Self {
                success: true,
                user_query,
                sections_found: Some(extracted_content.len()),
                extracted_content,
                error: None,
                error_type: None,
                traceback: None,
            },
            Err(err) => {
                tracing::error!(error_type = err.kind(), "fetch_content failed: {}", err);
                let failure = Failure::from(&err);
                Self {
                    success: false,
                    user_query,
                    extracted_content: IndexMap::new(),
                    sections_found: None,
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

/// Fetch the TOC and full docs, then extract only the requested sections.
///
/// Both documents are requested concurrently; either failing fails the call.
pub async fn fetch(
    config: &DocsConfig,
    section_titles: &[String],
) -> Result<IndexMap<String, ExtractedSection>> {
    let fetcher = Fetcher::new(config.fetch_timeout())?;
    let (toc, full_docs) = tokio::try_join!(
        fetcher.fetch_text(&config.toc_url),
        fetcher.fetch_text(&config.full_docs_url),
    )?;

    let section_urls = section_url_map(&parse_toc(&toc));

    let extracted = extract_sections(&full_docs, section_titles)
        .into_iter()
        .map(|(title, content)| {
            let url = section_urls
                .get(&title)
                .cloned()
                .unwrap_or_else(|| URL_NOT_FOUND.to_string());
            (title, ExtractedSection { url, content })
        })
        .collect();

    Ok(extracted)
}

/// Handle the fetch_content tool call.
pub async fn handle_fetch_content(
    config: Arc<DocsConfig>,
    params: Parameters<FetchContentInput>,
) -> std::result::Result<Json<FetchContentOutput>, McpError> {
    let input = params.0;
    tracing::info!(titles = ?input.section_titles, "fetching documentation sections");

    let result = fetch(&config, &input.section_titles).await;
    Ok(Json(FetchContentOutput::from_result(input.user_query, result)))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

//! MCP tool implementations.
//!
//! Both tools capture every failure into their output (`success: false`) rather
//! than returning an MCP error, so callers always get a well-formed object.

mod discover;
mod fetch;

use crate::types::DocsError;

pub use discover::{
    DiscoverPayload, DiscoverSectionsInput, DiscoverSectionsOutput, discover, handle_discover_sections,
};
pub use fetch::{
    FetchContentInput, FetchContentOutput, URL_NOT_FOUND, fetch, handle_fetch_content,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Error details reported in a failed tool response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Failure {
    pub error: String,
    pub error_type: String,
    pub traceback: String,
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<&DocsError> for Failure {
    fn from(err: &DocsError) -> Self {
        Self {
            error: err.to_string(),
            error_type: err.kind().to_string(),
            traceback: err.trace(),
        }
    }
}

//! MCP server implementation.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    ErrorData as McpError, Json, ServerHandler,
    handler::server::tool::ToolRouter,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::config::DocsConfig;
use crate::tools::{
    DiscoverSectionsInput, DiscoverSectionsOutput, FetchContentInput, FetchContentOutput,
    handle_discover_sections, handle_fetch_content,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const INSTRUCTIONS: &str = "This server provides access to the OpenBB Workspace documentation. \
     Use 'discover_sections' to read the table of contents and choose relevant sections, \
     then use 'fetch_content' to retrieve the content of those sections.";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Docs MCP server.
#[derive(Clone)]
pub struct Server {
    tool_router: ToolRouter<Self>,
    config: Arc<DocsConfig>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Server {
    /// Create a new server with default configuration.
    pub fn new() -> Self {
        Self::with_config(DocsConfig::default())
    }

    /// Create a new server with custom configuration.
    pub fn with_config(config: DocsConfig) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    /// Create a new server sharing an existing configuration.
    pub fn with_shared_config(config: Arc<DocsConfig>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
        }
    }

    /// Get the server configuration.
    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Public wrapper for discover_sections (for testing).
    pub async fn discover(&self, input: DiscoverSectionsInput) -> Result<DiscoverSectionsOutput, McpError> {
        self.discover_sections(Parameters(input)).await.map(|j| j.0)
    }

    /// Public wrapper for fetch_content (for testing).
    pub async fn fetch(&self, input: FetchContentInput) -> Result<FetchContentOutput, McpError> {
        self.fetch_content(Parameters(input)).await.map(|j| j.0)
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Tool Router
//--------------------------------------------------------------------------------------------------

#[tool_router]
impl Server {
    /// Returns the complete documentation table of contents for the caller to analyze.
    #[tool(
        name = "discover_sections",
        description = "Identify the documentation sections most relevant to a user's query. \
            Returns the COMPLETE table of contents (raw_toc_content) and a mapping of section titles \
            to URLs (section_urls). Read both the title and the description of each entry, match the \
            meaning of the query rather than keywords, and select at most 3 sections ranked by relevance. \
            If nothing is genuinely relevant, select none. Then call fetch_content with the exact \
            section titles as they appear in the table of contents and the original user_query."
    )]
    async fn discover_sections(
        &self,
        params: Parameters<DiscoverSectionsInput>,
    ) -> Result<Json<DiscoverSectionsOutput>, McpError> {
        handle_discover_sections(self.config.clone(), params).await
    }

    /// Returns the verbatim content of the requested sections.
    #[tool(
        name = "fetch_content",
        description = "Fetch the content of specific documentation sections. Call discover_sections first \
            and pass up to 3 exact section titles plus the original user_query. Returns extracted_content \
            mapping each title to its url and content, and sections_found. Answer only from \
            extracted_content: give step-by-step instructions, keep code blocks, parameter names and \
            syntax exactly as documented, cite a section URL only when referencing it, and respond in \
            the language of the user's query. If no section is relevant, say that no relevant \
            documentation was found."
    )]
    async fn fetch_content(
        &self,
        params: Parameters<FetchContentInput>,
    ) -> Result<Json<FetchContentOutput>, McpError> {
        handle_fetch_content(self.config.clone(), params).await
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Server Handler
//--------------------------------------------------------------------------------------------------

#[tool_handler]
impl ServerHandler for Server {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

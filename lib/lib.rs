//! Docs MCP Server
//!
//! An MCP server that exposes a remote documentation corpus to AI agents as two
//! tools: one to read the table of contents, one to retrieve named sections.
//!
//! # Features
//!
//! - **Section Discovery**: Returns the full table of contents plus a title to URL map,
//!   leaving relevance judgment to the calling model
//! - **Section Retrieval**: Extracts only the requested sections from the full docs,
//!   keeping responses small enough for a model's context window
//! - **Never Raises**: Failures come back as `success: false` objects with error details
//! - **Browser Ready**: Streamable HTTP transport with an origin allow-list
//!
//! Both documents are fetched fresh on every call; nothing is cached.

pub mod config;
pub mod fetcher;
pub mod sections;
pub mod server;
pub mod toc;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::DocsConfig;
pub use server::Server;
pub use types::{DocsError, ExtractedSection, Result, SectionDescriptor};

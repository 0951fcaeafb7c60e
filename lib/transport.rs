//! Streamable HTTP transport for the docs MCP server.
//!
//! Serves the MCP endpoint at [`MCP_PATH`] behind a CORS policy that only admits
//! the configured origins and exposes the MCP session headers to browsers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    http::{HeaderName, Method, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any_service, get},
};
use rmcp::transport::{
    StreamableHttpServerConfig,
    streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
};
use serde_json::json;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::DocsConfig;
use crate::server::Server;
use crate::types::Result;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Path of the MCP endpoint.
pub const MCP_PATH: &str = "/mcp";

/// Session header set by the streamable HTTP transport.
const MCP_SESSION_ID: &str = "mcp-session-id";

/// Protocol version header set by the streamable HTTP transport.
const MCP_PROTOCOL_VERSION: &str = "mcp-protocol-version";

/// How long browsers may cache a preflight response.
const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Build the CORS policy for the configured origins.
pub fn cors_layer(config: &DocsConfig) -> Result<CorsLayer> {
    let origins = config.origin_headers()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([
            HeaderName::from_static(MCP_SESSION_ID),
            HeaderName::from_static(MCP_PROTOCOL_VERSION),
        ])
        .max_age(CORS_MAX_AGE))
}

/// Build the application router: MCP endpoint, health probe, CORS and request logging.
pub fn router(config: Arc<DocsConfig>) -> Result<Router> {
    let cors = cors_layer(&config)?;

    let mcp_service: StreamableHttpService<Server, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(Server::with_shared_config(config.clone())),
            LocalSessionManager::default().into(),
            StreamableHttpServerConfig::default(),
        );

    Ok(Router::new()
        .route("/health", get(health))
        .route(MCP_PATH, any_service(mcp_service))
        .layer(cors)
        .layer(middleware::from_fn(log_request)))
}

/// Bind `0.0.0.0:<port>` and serve until Ctrl+C.
pub async fn serve(config: DocsConfig, port: u16) -> anyhow::Result<()> {
    let app = router(Arc::new(config))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let tcp_listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("docs MCP server running on http://{}{}", addr, MCP_PATH);
    tracing::info!("tools available: discover_sections, fetch_content");

    axum::serve(tcp_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("docs MCP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}

/// Liveness probe.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Request logging middleware
async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    tracing::debug!("REQUEST: {} {}", method, uri);
    let response = next.run(request).await;
    tracing::info!("{} {} -> {}", method, uri, response.status());
    response
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

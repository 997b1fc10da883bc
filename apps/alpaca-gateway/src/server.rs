//! HTTP transport for the dispatch table.
//!
//! # Endpoints
//!
//! - `GET /health` - liveness probe
//! - `GET /v1/tools` - the dispatch table, as JSON
//! - `POST /v1/tools/{name}` - invoke one tool; JSON argument object in,
//!   plain text out. Always HTTP 200: operation failures are in-band text.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde_json::Value;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::tools::{ToolDefinition, ToolRouter};

/// Gateway HTTP server.
pub struct GatewayServer {
    port: u16,
    tools: Arc<ToolRouter>,
    cancel: CancellationToken,
}

/// Fatal server error.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Could not bind the listen port.
    #[error("failed to bind port {0}: {1}")]
    BindFailed(u16, String),
    /// The HTTP server failed while running.
    #[error("server error: {0}")]
    ServerFailed(String),
}

impl GatewayServer {
    /// Create a new gateway server.
    #[must_use]
    pub const fn new(port: u16, tools: Arc<ToolRouter>, cancel: CancellationToken) -> Self {
        Self {
            port,
            tools,
            cancel,
        }
    }

    /// Run the server until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if binding fails or the HTTP server
    /// encounters a fatal error while running.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = create_router(self.tools);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(self.port, e.to_string()))?;

        tracing::info!(port = self.port, "Gateway listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(self.cancel.cancelled_owned())
            .await
            .map_err(|e| ServerError::ServerFailed(e.to_string()))?;

        tracing::info!("Gateway stopped");
        Ok(())
    }
}

/// Build the axum router over a tool dispatch table.
#[must_use]
pub fn create_router(tools: Arc<ToolRouter>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/tools", get(list_tools))
        .route("/v1/tools/{name}", post(call_tool))
        .with_state(tools)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn list_tools() -> Json<Vec<ToolDefinition>> {
    Json(ToolRouter::tool_definitions())
}

async fn call_tool(
    State(tools): State<Arc<ToolRouter>>,
    Path(name): Path<String>,
    body: Option<Json<Value>>,
) -> String {
    let arguments = body.map_or(Value::Null, |Json(value)| value);
    tracing::debug!(tool = %name, "Dispatching tool call");
    tools.dispatch(&name, arguments).await
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the echo handler
//! - Wire up middleware (tracing, timeout, tus header decoding)
//! - Bind server to listener with graceful shutdown
//!
//! The echo handler answers every path and method with the JSON form of the
//! request's decoded tus headers, which makes the service useful for
//! checking what a client actually sends.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::any,
    Extension, Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::middleware::tus_headers_middleware;
use crate::tus::{HeaderName, HeaderParser, TusHeaders, TUS_RESUMABLE};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Version sent back in the `Tus-Resumable` response header.
    pub advertised_version: String,
}

/// HTTP server echoing decoded tus headers.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let parser = Arc::new(config.protocol.header_parser());
        let state = AppState {
            advertised_version: config
                .protocol
                .supported_versions
                .first()
                .cloned()
                .unwrap_or_else(|| TUS_RESUMABLE.to_string()),
        };

        let router = Self::build_router(&config, parser, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, parser: Arc<HeaderParser>, state: AppState) -> Router {
        Router::new()
            .route("/", any(echo_handler))
            .route("/{*path}", any(echo_handler))
            .with_state(state)
            .layer(middleware::from_fn_with_state(parser, tus_headers_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            supported_versions = ?self.config.protocol.supported_versions,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn echo_handler(
    State(state): State<AppState>,
    Extension(headers): Extension<TusHeaders>,
) -> impl IntoResponse {
    tracing::debug!(decoded = headers.len(), "Echoing tus headers");
    (
        [(HeaderName::TusResumable.as_str(), state.advertised_version)],
        Json(headers),
    )
}

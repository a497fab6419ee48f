//! tus header echo server.
//!
//! ```text
//!     Client Request ──▶ TraceLayer ──▶ TimeoutLayer ──▶ tus header middleware ──▶ echo handler
//!                                                        (decode → extensions)      (JSON of TusHeaders)
//! ```
//!
//! Usage: `tus-header-parser [config.toml]`. Without a path the built-in
//! defaults are used.

use std::path::Path;

use tokio::net::TcpListener;

use tus_header_parser::config::{load_config, ServerConfig};
use tus_header_parser::observability::{logging, metrics};
use tus_header_parser::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => ServerConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!("tus-header-parser v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        supported_versions = ?config.protocol.supported_versions,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to install metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

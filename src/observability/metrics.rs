//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tus_headers_total` (counter): recognised headers seen, by `header` and
//!   `outcome` (`valid` / `invalid`)

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::tus::HeaderName;

/// Install the Prometheus exporter with an HTTP scrape listener on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Count one present header and whether it decoded.
pub fn record_header(header: HeaderName, valid: bool) {
    let outcome = if valid { "valid" } else { "invalid" };
    ::metrics::counter!(
        "tus_headers_total",
        "header" => header.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

//! tus header decoding middleware.
//!
//! Decodes the recognised tus headers of every request and attaches the
//! resulting [`TusHeaders`] to the request extensions. The next stage is
//! always run: missing or invalid headers only shrink the map, they never
//! produce a response of their own.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::tus::{HeaderParser, TusHeaders};

impl HeaderParser {
    /// Decode the tus headers of `req` and store them in its extensions.
    pub fn decorate<B>(&self, req: &mut Request<B>) {
        let headers: TusHeaders = self.parse_headers(req.headers());
        tracing::trace!(decoded = headers.len(), "tus headers attached");
        req.extensions_mut().insert(headers);
    }
}

/// Axum middleware; install with `middleware::from_fn_with_state(parser, tus_headers_middleware)`.
///
/// Handlers read the result with `Extension<TusHeaders>`.
pub async fn tus_headers_middleware(
    State(parser): State<Arc<HeaderParser>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    parser.decorate(&mut req);
    next.run(req).await
}

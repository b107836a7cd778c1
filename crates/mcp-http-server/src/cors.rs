//! CORS policy (spec §6.2): "CORS exposes `Mcp-Session-Id`" so a
//! browser-based client can read the session header off a streamable-
//! HTTP response. Grounded on the teacher's hand-rolled `CorsLayer`
//! (`turul-http-mcp-server/src/cors.rs`), reimplemented on top of
//! `tower_http::cors::CorsLayer` per DESIGN.md's crate ledger.

use http::{HeaderName, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const SESSION_HEADER: &str = "mcp-session-id";

/// Mirrors the request's `Origin` back rather than a blanket `*`, since a
/// wildcard origin cannot be paired with `Access-Control-Allow-
/// Credentials` and the streamable-HTTP session cookie-equivalent (the
/// `Mcp-Session-Id` header) is exchanged over the same response.
pub fn layer() -> CorsLayer {
    let session_header = HeaderName::from_static(SESSION_HEADER);
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT, session_header.clone()])
        .expose_headers([session_header])
}

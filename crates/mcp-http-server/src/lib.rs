//! Streamable HTTP transport for MCP servers (spec §4.8–§4.9, §6.2):
//! stateful mode (session table + `GET /mcp` SSE) and stateless mode (a
//! throwaway session per request), both dispatched onto the same
//! [`mcp_server::Dispatcher`]/[`mcp_server::Registry`] pair the stdio
//! transport uses. Grounded on the teacher's `turul-http-mcp-server`
//! crate, collapsed to one in-memory session store and one CORS
//! implementation (`tower_http`) instead of the teacher's pluggable
//! storage backends and hand-rolled header injection (see DESIGN.md).

pub mod cors;
pub mod health;
pub mod origin;
pub mod server;
pub mod sse;
pub mod streamable_http;

pub use server::{HttpMcpServer, HttpMcpServerBuilder, ServerConfig};
pub use streamable_http::{StreamableHttpTransport, TransportMode};

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type HttpResult<T> = Result<T, HttpError>;

//! Server bootstrap (spec §4.9 "Transport Layer entry point"): binds a
//! `TcpListener`, wires a [`StreamableHttpTransport`] through tower's
//! CORS layer, and accepts connections until the process is signalled
//! to stop. Grounded on the teacher's `HttpMcpServer::run`
//! (`turul-http-mcp-server/src/server.rs`), trimmed of its pluggable
//! session-storage backend selection — this crate always runs the one
//! in-memory [`SessionManager`].

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{debug, error, info};

use mcp_server::{Dispatcher, Registry};

use crate::streamable_http::{StreamableHttpTransport, TransportMode};
use crate::{cors, HttpError, HttpResult};

/// Everything an [`HttpMcpServerBuilder`] needs before it can `build()`
/// (spec §4.9): where to listen, what path serves `/mcp`, which of the
/// two transport modes to run, and the identity the server reports.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub mcp_path: String,
    pub enable_cors: bool,
    pub mode: TransportMode,
    pub server_name: String,
    pub server_version: String,
    pub server_description: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".parse().expect("static address"),
            mcp_path: "/mcp".to_string(),
            enable_cors: true,
            mode: TransportMode::Stateful,
            server_name: "mcp-server".to_string(),
            server_version: "0.1.0".to_string(),
            server_description: None,
        }
    }
}

/// Fluent construction of an [`HttpMcpServer`] over a [`Registry`]
/// populated by the Interface Compiler's generated bindings or built by
/// hand (spec §4.9).
pub struct HttpMcpServerBuilder {
    config: ServerConfig,
    registry: Registry,
    logging_capability: bool,
}

impl HttpMcpServerBuilder {
    pub fn new(registry: Registry) -> Self {
        Self { config: ServerConfig::default(), registry, logging_capability: false }
    }

    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.config.bind_address = addr;
        self
    }

    pub fn mcp_path(mut self, path: impl Into<String>) -> Self {
        self.config.mcp_path = path.into();
        self
    }

    pub fn cors(mut self, enable: bool) -> Self {
        self.config.enable_cors = enable;
        self
    }

    pub fn mode(mut self, mode: TransportMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn server_name(mut self, name: impl Into<String>) -> Self {
        self.config.server_name = name.into();
        self
    }

    pub fn server_version(mut self, version: impl Into<String>) -> Self {
        self.config.server_version = version.into();
        self
    }

    pub fn server_description(mut self, description: impl Into<String>) -> Self {
        self.config.server_description = Some(description.into());
        self
    }

    pub fn logging_capability(mut self, enable: bool) -> Self {
        self.logging_capability = enable;
        self
    }

    /// Marks the registry started (spec §3.2: no mutation after this
    /// point) and assembles the running server.
    pub fn build(mut self) -> HttpMcpServer {
        self.registry.mark_started();
        let dispatcher = Arc::new(Dispatcher::new(Arc::new(self.registry), self.logging_capability));
        let transport = Arc::new(StreamableHttpTransport::new(
            dispatcher,
            self.config.mode,
            self.config.mcp_path.clone(),
            self.config.server_name.clone(),
            self.config.server_version.clone(),
            self.config.server_description.clone(),
            self.config.bind_address.port(),
        ));
        HttpMcpServer { config: self.config, transport }
    }
}

/// A bound, ready-to-`run()` streamable HTTP MCP server.
#[derive(Clone)]
pub struct HttpMcpServer {
    config: ServerConfig,
    transport: Arc<StreamableHttpTransport>,
}

impl HttpMcpServer {
    pub fn builder(registry: Registry) -> HttpMcpServerBuilder {
        HttpMcpServerBuilder::new(registry)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Accepts connections until the listener errors or the process is
    /// killed. Each connection is served on its own task with the
    /// transport's `handle()` wrapped in tower's CORS layer, matching
    /// the teacher's one-task-per-connection `http1` loop.
    pub async fn run(&self) -> HttpResult<()> {
        let listener = TcpListener::bind(self.config.bind_address).await.map_err(HttpError::Io)?;
        info!("HTTP MCP server listening on {}", self.config.bind_address);
        info!("MCP endpoint available at {}", self.config.mcp_path);

        loop {
            let (stream, peer_addr) = listener.accept().await.map_err(HttpError::Io)?;
            debug!("new connection from {peer_addr}");

            let transport = Arc::clone(&self.transport);
            let enable_cors = self.config.enable_cors;
            tokio::spawn(async move {
                let io = TokioIo::new(stream);
                let base = tower::service_fn(move |req| {
                    let transport = Arc::clone(&transport);
                    async move { Ok::<_, std::convert::Infallible>(transport.handle(req).await) }
                });

                let result = if enable_cors {
                    let service = ServiceBuilder::new().layer(cors::layer()).service(base);
                    http1::Builder::new().serve_connection(io, TowerToHyperService::new(service)).await
                } else {
                    http1::Builder::new().serve_connection(io, TowerToHyperService::new(base)).await
                };

                if let Err(err) = result {
                    error!("error serving connection: {err}");
                }
            });
        }
    }
}

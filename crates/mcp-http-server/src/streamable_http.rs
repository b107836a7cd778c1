//! Streamable HTTP request handling (spec §4.8, §6.2): the `POST`/`GET`/
//! `DELETE /mcp` trio plus `GET /health` and `GET /`, dispatched against
//! the same [`mcp_server::Dispatcher`] the stdio transport uses. Grounded
//! on the teacher's `StreamableHttpHandler`/`SessionMcpHandler`
//! (`turul-http-mcp-server/src/{streamable_http,session_handler}.rs`),
//! collapsed to the two modes the spec names (stateful session table +
//! SSE, stateless one-shot-per-request) instead of the teacher's
//! protocol-version-detection branch across three wire generations.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::{combinators::BoxBody, BodyExt, Empty, Full, StreamBody};
use hyper::body::{Frame, Incoming};
use mcp_protocol::{
    CallToolParams, GetPromptParams, JsonRpcErrorCode, JsonRpcErrorObject, JsonRpcRequest, JsonRpcResponse,
    ReadResourceParams, RequestId,
};
use mcp_server::{Dispatcher, SessionContext, SessionManager};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{health, origin, sse};

pub const MCP_SESSION_HEADER: &str = "mcp-session-id";

/// Stateful keeps a session table and serves `GET`/`DELETE /mcp`;
/// stateless allocates a throwaway session per `POST` and accepts
/// neither (spec §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Stateful,
    Stateless,
}

pub type ResponseBody = BoxBody<Bytes, Infallible>;

/// Owns the pieces every `/mcp` request needs: the Dispatcher it routes
/// onto, the session table (stateful mode only), and the identity this
/// server reports in `initialize`/`/health`/`/`.
pub struct StreamableHttpTransport {
    dispatcher: Arc<Dispatcher>,
    sessions: Option<Arc<SessionManager>>,
    mode: TransportMode,
    mcp_path: String,
    server_name: String,
    server_version: String,
    server_description: Option<String>,
    bind_port: u16,
    started_at: Instant,
}

impl StreamableHttpTransport {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        mode: TransportMode,
        mcp_path: impl Into<String>,
        server_name: impl Into<String>,
        server_version: impl Into<String>,
        server_description: Option<String>,
        bind_port: u16,
    ) -> Self {
        let sessions = match mode {
            TransportMode::Stateful => Some(SessionManager::new()),
            TransportMode::Stateless => None,
        };
        Self {
            dispatcher,
            sessions,
            mode,
            mcp_path: mcp_path.into(),
            server_name: server_name.into(),
            server_version: server_version.into(),
            server_description,
            bind_port,
            started_at: Instant::now(),
        }
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// Entry point a hyper `Service` calls for every connection. Routes
    /// on path first, then method — matching §6.2's endpoint table.
    pub async fn handle(&self, req: Request<Incoming>) -> Response<ResponseBody> {
        if !origin::is_allowed(req.headers()) {
            return json_error_response(StatusCode::FORBIDDEN, JsonRpcErrorObject::bad_origin());
        }

        let path = req.uri().path().to_string();
        if path == self.mcp_path {
            return match *req.method() {
                Method::POST => self.handle_post(req).await,
                Method::GET => self.handle_get(req).await,
                Method::DELETE => self.handle_delete(req).await,
                _ => empty_response(StatusCode::METHOD_NOT_ALLOWED),
            };
        }

        match (req.method(), path.as_str()) {
            (&Method::GET, "/health") => self.handle_health().await,
            (&Method::GET, "/") => self.handle_landing(),
            _ => empty_response(StatusCode::NOT_FOUND),
        }
    }

    async fn handle_post(&self, req: Request<Incoming>) -> Response<ResponseBody> {
        let header_session_id = session_id_header(req.headers());

        let body_bytes = match req.into_body().collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(err) => {
                return json_error_response(StatusCode::BAD_REQUEST, JsonRpcErrorObject::new(JsonRpcErrorCode::ParseError, err.to_string()));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
            Ok(request) => request,
            Err(err) => {
                return json_error_response(StatusCode::BAD_REQUEST, JsonRpcErrorObject::new(JsonRpcErrorCode::ParseError, err.to_string()));
            }
        };

        let (session, new_session_id) = match self.resolve_session(&request, header_session_id).await {
            Ok(pair) => pair,
            Err(response) => return response,
        };

        if request.is_notification() {
            if request.method == "notifications/initialized" {
                session.mark_initialized().await;
            }
            return empty_response(StatusCode::ACCEPTED);
        }

        let id = request.id.clone().expect("checked above: not a notification");
        let outcome = route(&self.dispatcher, &session, &request, &self.server_name, &self.server_version).await;
        let body = match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        };

        let mut response = json_response(StatusCode::OK, &body);
        if let Some(new_id) = new_session_id {
            response.headers_mut().insert(
                header::HeaderName::from_static(MCP_SESSION_HEADER),
                HeaderValue::from_str(&new_id).expect("uuid is a valid header value"),
            );
        }
        response
    }

    /// Resolves the [`SessionContext`] a `POST` runs against (spec
    /// §4.8): a fresh ephemeral session per stateless request, or the
    /// stateful table's `initialize`-creates / header-looks-up split.
    /// Returns the header value to echo back only when a *new* session
    /// was minted — an existing session's id is already known to the
    /// caller.
    async fn resolve_session(
        &self,
        request: &JsonRpcRequest,
        header_session_id: Option<String>,
    ) -> Result<(SessionContext, Option<String>), Response<ResponseBody>> {
        match self.mode {
            TransportMode::Stateless => {
                let sessions = SessionManager::new();
                let session = sessions.create().await;
                Ok((session, None))
            }
            TransportMode::Stateful => {
                let sessions = self.sessions.as_ref().expect("stateful mode always carries a SessionManager").clone();
                if request.method == "initialize" && header_session_id.is_none() {
                    let session = sessions.create().await;
                    let id = session.session_id.clone();
                    return Ok((session, Some(id)));
                }
                match header_session_id {
                    None => Err(json_error_response(StatusCode::UNAUTHORIZED, JsonRpcErrorObject::no_valid_session())),
                    Some(id) => match sessions.get(&id).await {
                        Some(session) => Ok((session, None)),
                        None => Err(json_error_response(StatusCode::BAD_REQUEST, JsonRpcErrorObject::no_valid_session())),
                    },
                }
            }
        }
    }

    /// `GET /mcp` (stateful only): opens an SSE stream forwarding every
    /// notification queued on the named session (spec §4.8, §6.2).
    async fn handle_get(&self, req: Request<Incoming>) -> Response<ResponseBody> {
        if self.mode != TransportMode::Stateful {
            return empty_response(StatusCode::METHOD_NOT_ALLOWED);
        }
        let sessions = self.sessions.as_ref().expect("stateful mode always carries a SessionManager");

        let Some(session_id) = session_id_header(req.headers()) else {
            return json_error_response(StatusCode::BAD_REQUEST, JsonRpcErrorObject::no_valid_session());
        };
        let Some(session) = sessions.get(&session_id).await else {
            return json_error_response(StatusCode::BAD_REQUEST, JsonRpcErrorObject::no_valid_session());
        };

        debug!(session_id = %session.session_id, "opening SSE stream");
        let target_session_id = session.session_id.clone();
        let receiver = session.subscribe();

        let stream = futures::stream::unfold(receiver, move |mut receiver| {
            let target_session_id = target_session_id.clone();
            async move {
                loop {
                    match receiver.recv().await {
                        Ok(event) if event.session_id == target_session_id => {
                            let frame = Frame::data(Bytes::from(sse::format_notification(&event.notification)));
                            return Some((Ok::<_, Infallible>(frame), receiver));
                        }
                        Ok(_) => continue,
                        Err(_) => return None,
                    }
                }
            }
        });

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/event-stream")
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::HeaderName::from_static(MCP_SESSION_HEADER), session.session_id.as_str())
            .body(StreamBody::new(stream).boxed())
            .expect("static headers are always valid")
    }

    /// `DELETE /mcp` (stateful only): terminates the named session
    /// (spec §4.8, scenario S6).
    async fn handle_delete(&self, req: Request<Incoming>) -> Response<ResponseBody> {
        if self.mode != TransportMode::Stateful {
            return empty_response(StatusCode::METHOD_NOT_ALLOWED);
        }
        let sessions = self.sessions.as_ref().expect("stateful mode always carries a SessionManager");

        let Some(session_id) = session_id_header(req.headers()) else {
            return json_error_response(StatusCode::BAD_REQUEST, JsonRpcErrorObject::no_valid_session());
        };
        if sessions.get(&session_id).await.is_none() {
            return json_error_response(StatusCode::BAD_REQUEST, JsonRpcErrorObject::no_valid_session());
        }
        sessions.close(&session_id).await;
        empty_response(StatusCode::NO_CONTENT)
    }

    async fn handle_health(&self) -> Response<ResponseBody> {
        let session_count = match &self.sessions {
            Some(sessions) => sessions.session_count().await,
            None => 0,
        };
        let body = health::HealthResponse {
            status: "ok",
            server: health::ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
                description: self.server_description.clone(),
            },
            transport: health::TransportInfo {
                kind: "http",
                mode: match self.mode {
                    TransportMode::Stateful => "stateful",
                    TransportMode::Stateless => "stateless",
                },
                sessions: session_count,
                port: self.bind_port,
            },
            resources: health::ResourceCounts {
                tools: self.dispatcher.tools_list().tools.len(),
                prompts: self.dispatcher.prompts_list().prompts.len(),
                resources: self.dispatcher.resources_list().resources.len(),
            },
            uptime: self.started_at.elapsed().as_secs(),
            timestamp: health::unix_timestamp(),
        };
        json_response(StatusCode::OK, &body)
    }

    fn handle_landing(&self) -> Response<ResponseBody> {
        let body = serde_json::json!({
            "name": self.server_name,
            "version": self.server_version,
            "description": self.server_description,
            "mcpEndpoint": self.mcp_path,
        });
        json_response(StatusCode::OK, &body)
    }
}

/// Resolves one already-parsed JSON-RPC request against the Dispatcher.
/// Shared shape with `mcp_server::stdio`'s `route`, duplicated rather
/// than extracted — the two transports' error-to-status mapping differs
/// enough (HTTP status codes vs. a bare `JsonRpcErrorObject`) that a
/// shared helper would need a transport-specific callback either way.
async fn route(
    dispatcher: &Dispatcher,
    session: &SessionContext,
    request: &JsonRpcRequest,
    server_name: &str,
    server_version: &str,
) -> Result<Value, JsonRpcErrorObject> {
    let params = request.params.clone().unwrap_or(Value::Null);

    match request.method.as_str() {
        "initialize" => {
            session.mark_initialized().await;
            Ok(serde_json::json!({
                "protocolVersion": mcp_protocol::LATEST_PROTOCOL_VERSION,
                "capabilities": {},
                "serverInfo": { "name": server_name, "version": server_version },
            }))
        }
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => to_value(dispatcher.tools_list()),
        "tools/call" => {
            let call: CallToolParams = from_params(params)?;
            let progress_token = call.meta.as_ref().and_then(|meta| meta.progress_token.clone());
            let result = dispatcher
                .tools_call(&call.name, call.arguments, session.clone(), progress_token, None)
                .await
                .map_err(|err| err.to_json_rpc())?;
            to_value(result)
        }
        "prompts/list" => to_value(dispatcher.prompts_list()),
        "prompts/get" => {
            let get: GetPromptParams = from_params(params)?;
            let result = dispatcher.prompts_get(get).await.map_err(|err| err.to_json_rpc())?;
            to_value(result)
        }
        "resources/list" => to_value(dispatcher.resources_list()),
        "resources/read" => {
            let read: ReadResourceParams = from_params(params)?;
            let result = dispatcher.resources_read(read).await.map_err(|err| err.to_json_rpc())?;
            to_value(result)
        }
        other => {
            warn!("unknown method: {other}");
            Err(JsonRpcErrorObject::method_not_found(other, &[]))
        }
    }
}

fn from_params<T: serde::de::DeserializeOwned>(params: Value) -> Result<T, JsonRpcErrorObject> {
    serde_json::from_value(params).map_err(|err| JsonRpcErrorObject::new(JsonRpcErrorCode::InvalidParams, err.to_string()))
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, JsonRpcErrorObject> {
    serde_json::to_value(value).map_err(|err| JsonRpcErrorObject::new(JsonRpcErrorCode::InternalError, err.to_string()))
}

fn session_id_header(headers: &HeaderMap) -> Option<String> {
    headers.get(header::HeaderName::from_static(MCP_SESSION_HEADER)).and_then(|v| v.to_str().ok()).map(str::to_string)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response<ResponseBody> {
    let payload = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(payload)).map_err(|never: Infallible| match never {}).boxed())
        .expect("static headers are always valid")
}

fn json_error_response(status: StatusCode, error: JsonRpcErrorObject) -> Response<ResponseBody> {
    let envelope = JsonRpcResponse::error(RequestId::Number(0), error);
    json_response(status, &envelope)
}

fn empty_response(status: StatusCode) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .body(Empty::<Bytes>::new().map_err(|never: Infallible| match never {}).boxed())
        .expect("static headers are always valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_server::Registry;

    fn dispatcher_with_add_tool() -> Arc<Dispatcher> {
        let mut registry = Registry::new();
        registry
            .add_tool(
                mcp_builders::ToolBuilder::new("add")
                    .input_schema(
                        mcp_schema::JsonSchema::object()
                            .with_properties(std::collections::HashMap::from([
                                ("a".to_string(), mcp_schema::JsonSchema::number()),
                                ("b".to_string(), mcp_schema::JsonSchema::number()),
                            ]))
                            .with_required(vec!["a".to_string(), "b".to_string()]),
                    )
                    .execute(|args| async move {
                        let a = args.get("a").and_then(Value::as_f64).unwrap_or_default();
                        let b = args.get("b").and_then(Value::as_f64).unwrap_or_default();
                        Ok(mcp_protocol::CallToolResult::success(vec![mcp_protocol::ContentBlock::text(
                            serde_json::json!({"sum": a + b}).to_string(),
                        )]))
                    })
                    .build(),
            )
            .unwrap();
        registry.mark_started();
        Arc::new(Dispatcher::new(Arc::new(registry), false))
    }

    fn transport(mode: TransportMode) -> StreamableHttpTransport {
        StreamableHttpTransport::new(dispatcher_with_add_tool(), mode, "/mcp", "test-server", "1.0.0", None, 8080)
    }

    #[tokio::test]
    async fn stateful_initialize_without_header_mints_a_session_scenario_s6() {
        let transport = transport(TransportMode::Stateful);
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "initialize".to_string(),
            params: None,
            id: Some(RequestId::Number(1)),
        };
        let (_session, new_id) = transport.resolve_session(&request, None).await.unwrap();
        assert!(new_id.is_some());
    }

    #[tokio::test]
    async fn stateful_non_initialize_without_header_is_unauthorized() {
        let transport = transport(TransportMode::Stateful);
        let request =
            JsonRpcRequest { jsonrpc: "2.0".to_string(), method: "tools/list".to_string(), params: None, id: Some(RequestId::Number(1)) };
        let result = transport.resolve_session(&request, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn stateful_unknown_session_id_is_rejected() {
        let transport = transport(TransportMode::Stateful);
        let request =
            JsonRpcRequest { jsonrpc: "2.0".to_string(), method: "tools/list".to_string(), params: None, id: Some(RequestId::Number(1)) };
        let result = transport.resolve_session(&request, Some("not-a-real-session".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn stateless_every_post_gets_a_fresh_session() {
        let transport = transport(TransportMode::Stateless);
        let request =
            JsonRpcRequest { jsonrpc: "2.0".to_string(), method: "tools/list".to_string(), params: None, id: Some(RequestId::Number(1)) };
        let (first, _) = transport.resolve_session(&request, None).await.unwrap();
        let (second, _) = transport.resolve_session(&request, None).await.unwrap();
        assert_ne!(first.session_id, second.session_id);
    }

    #[tokio::test]
    async fn route_tools_call_scenario_s1() {
        let dispatcher = dispatcher_with_add_tool();
        let sessions = SessionManager::new();
        let session = sessions.create().await;
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: "tools/call".to_string(),
            params: Some(serde_json::json!({"name": "add", "arguments": {"a": 5, "b": 3}})),
            id: Some(RequestId::Number(1)),
        };
        let result = route(&dispatcher, &session, &request, "test-server", "1.0.0").await.unwrap();
        assert_eq!(result["content"][0]["text"], r#"{"sum":8}"#);
    }
}

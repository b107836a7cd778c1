//! Stdio transport (spec §4.8): line-delimited JSON-RPC over standard
//! streams, one implicit session for the lifetime of the process. A
//! SIGINT handler drives graceful shutdown — close the transport, then
//! the server, then exit. Grounded on the corpus's signal-handling idiom
//! (`tokio::signal::ctrl_c`) rather than the teacher's own transports,
//! which are all HTTP — stdio has no direct teacher counterpart.

use std::sync::Arc;

use mcp_protocol::{
    CallToolParams, GetPromptParams, JsonRpcErrorCode, JsonRpcErrorObject, JsonRpcOutcome,
    JsonRpcRequest, JsonRpcResponse, ReadResourceParams, RequestId,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::dispatcher::Dispatcher;
use crate::session::SessionManager;

/// Runs the stdio transport to completion: reads one JSON-RPC request
/// per line from `stdin`, dispatches it, and writes one JSON-RPC
/// response per line to `stdout`. Returns once stdin is closed or a
/// SIGINT arrives, whichever happens first (spec §4.8).
pub async fn serve(dispatcher: Arc<Dispatcher>, sessions: Arc<SessionManager>) -> std::io::Result<()> {
    let session = sessions.create().await;
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    info!("stdio transport ready, session {}", session.session_id);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("SIGINT received, shutting down stdio transport");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed, shutting down stdio transport");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(response) = handle_line(&dispatcher, &session, &line).await {
                    let payload = serde_json::to_string(&response)?;
                    stdout.write_all(payload.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
            }
        }
    }

    sessions.close(&session.session_id).await;
    Ok(())
}

/// Parses and dispatches one inbound line. Returns `None` for
/// notifications (no `id`), which per JSON-RPC never receive a reply.
async fn handle_line(
    dispatcher: &Dispatcher,
    session: &crate::session::SessionContext,
    line: &str,
) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => {
            warn!("malformed request: {err}");
            return Some(JsonRpcResponse::error(
                RequestId::Number(0),
                JsonRpcErrorObject::new(JsonRpcErrorCode::ParseError, err.to_string()),
            ));
        }
    };

    if request.is_notification() {
        handle_notification(session, &request).await;
        return None;
    }

    let id = request.id.clone().expect("checked above: not a notification");
    let outcome = route(dispatcher, session, &request).await;
    Some(match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(error) => JsonRpcResponse::error(id, error),
    })
}

async fn handle_notification(session: &crate::session::SessionContext, request: &JsonRpcRequest) {
    if request.method == "notifications/initialized" {
        session.mark_initialized().await;
    }
}

async fn route(
    dispatcher: &Dispatcher,
    session: &crate::session::SessionContext,
    request: &JsonRpcRequest,
) -> Result<serde_json::Value, JsonRpcErrorObject> {
    let params = request.params.clone().unwrap_or(serde_json::Value::Null);

    match request.method.as_str() {
        "initialize" => {
            session.mark_initialized().await;
            Ok(serde_json::json!({
                "protocolVersion": mcp_protocol::LATEST_PROTOCOL_VERSION,
                "capabilities": {},
                "serverInfo": { "name": "mcp-server", "version": metadata_version() },
            }))
        }
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => to_value(dispatcher.tools_list()),
        "tools/call" => {
            let call: CallToolParams = from_params(params)?;
            let result = dispatcher
                .tools_call(&call.name, call.arguments, session.clone(), None, None)
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
            error!("unknown method: {other}");
            Err(JsonRpcErrorObject::method_not_found(other, &[]))
        }
    }
}

fn from_params<T: serde::de::DeserializeOwned>(params: serde_json::Value) -> Result<T, JsonRpcErrorObject> {
    serde_json::from_value(params)
        .map_err(|err| JsonRpcErrorObject::new(JsonRpcErrorCode::InvalidParams, err.to_string()))
}

fn to_value<T: serde::Serialize>(value: T) -> Result<serde_json::Value, JsonRpcErrorObject> {
    serde_json::to_value(value)
        .map_err(|err| JsonRpcErrorObject::new(JsonRpcErrorCode::InternalError, err.to_string()))
}

fn metadata_version() -> String {
    crate::metadata_store::fallback_version().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use mcp_builders::ToolBuilder;
    use std::sync::Arc;

    fn dispatcher_with_echo() -> Arc<Dispatcher> {
        let mut registry = Registry::new();
        registry.add_tool(
            ToolBuilder::new("echo")
                .execute(|args| async move { Ok(mcp_protocol::CallToolResult::success(vec![mcp_protocol::ContentBlock::text(args.to_string())])) })
                .build(),
        ).unwrap();
        Arc::new(Dispatcher::new(Arc::new(registry), false))
    }

    #[tokio::test]
    async fn tools_list_round_trips_through_line_handling() {
        let dispatcher = dispatcher_with_echo();
        let sessions = SessionManager::new();
        let session = sessions.create().await;
        let request = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let response = handle_line(&dispatcher, &session, request).await.unwrap();
        let JsonRpcOutcome::Success { result } = response.outcome else { panic!("expected success") };
        assert_eq!(result["tools"][0]["name"], "echo");
    }

    #[tokio::test]
    async fn notification_never_produces_a_response() {
        let dispatcher = dispatcher_with_echo();
        let sessions = SessionManager::new();
        let session = sessions.create().await;
        let request = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(handle_line(&dispatcher, &session, request).await.is_none());
        assert!(session.is_initialized().await);
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let dispatcher = dispatcher_with_echo();
        let sessions = SessionManager::new();
        let session = sessions.create().await;
        let request = r#"{"jsonrpc":"2.0","id":2,"method":"bogus/verb"}"#;
        let response = handle_line(&dispatcher, &session, request).await.unwrap();
        let JsonRpcOutcome::Error { error } = response.outcome else { panic!("expected error") };
        assert_eq!(error.code, JsonRpcErrorCode::MethodNotFound.code());
    }
}

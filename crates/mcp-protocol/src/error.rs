//! `McpError` — the one error enum spanning every `ErrorKind` in the spec
//! (§7). Grounded on `turul-mcp-protocol::McpError`'s shape, generalized
//! with the kinds SPEC_FULL.md's Error Handling Design names.

use serde_json::Value;
use thiserror::Error;

use crate::jsonrpc::{JsonRpcErrorCode, JsonRpcErrorObject};

#[derive(Debug, Error)]
pub enum McpError {
    /// Load-time diagnostic from the Validator & Linker. Never surfaced
    /// over the wire; collected into `ParseResult::validation_errors`.
    #[error("{0}")]
    Parse(String),

    /// Unknown tool/prompt/resource at dispatch.
    #[error("unknown {kind} '{name}'")]
    UnknownEntity { kind: &'static str, name: String, known: Vec<String> },

    /// Argument schema mismatch — surfaced as `isError:true` content,
    /// never as a protocol exception (spec §4.6 step 2).
    #[error("validation error: {0}")]
    Validation(String),

    /// A handler threw a typed failure.
    #[error("{message}")]
    HandlerExecution {
        code: String,
        message: String,
        details: Option<Value>,
    },

    /// Transport-level failure: bad origin, missing/invalid session.
    #[error("{0}")]
    Transport(String),

    /// Registry mutation attempted after the server entered the running
    /// state.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Sampling requested without the capability declared, or the client
    /// rejected it.
    #[error("unsupported capability: {0}")]
    UnsupportedCapability(String),

    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type McpResult<T> = Result<T, McpError>;

impl McpError {
    pub fn unknown_tool(name: impl Into<String>, known: Vec<String>) -> Self {
        McpError::UnknownEntity { kind: "tool", name: name.into(), known }
    }

    pub fn unknown_prompt(name: impl Into<String>, known: Vec<String>) -> Self {
        McpError::UnknownEntity { kind: "prompt", name: name.into(), known }
    }

    pub fn unknown_resource(uri: impl Into<String>, known: Vec<String>) -> Self {
        McpError::UnknownEntity { kind: "resource", name: uri.into(), known }
    }

    /// Used where the caller has no convenient `known` list at hand
    /// (e.g. a context's ad hoc `readResource` lookup).
    pub fn unknown_entity(kind: &'static str, name: impl Into<String>) -> Self {
        McpError::UnknownEntity { kind, name: name.into(), known: Vec::new() }
    }

    pub fn missing_param(name: impl Into<String>) -> Self {
        McpError::MissingParameter(name.into())
    }

    pub fn unsupported_capability(name: impl Into<String>) -> Self {
        McpError::UnsupportedCapability(name.into())
    }

    pub fn handler(code: impl Into<String>, message: impl Into<String>) -> Self {
        McpError::HandlerExecution { code: code.into(), message: message.into(), details: None }
    }

    /// Map to the HTTP status / JSON-RPC error envelope a transport
    /// returns for errors that do escape to the client (§6.2, §7).
    pub fn to_json_rpc(&self) -> JsonRpcErrorObject {
        match self {
            McpError::UnknownEntity { name, known, .. } => {
                JsonRpcErrorObject::method_not_found(name, known)
            }
            McpError::Transport(msg) => {
                JsonRpcErrorObject::new(JsonRpcErrorCode::ServerError, msg.clone())
            }
            McpError::Lifecycle(msg) => {
                JsonRpcErrorObject::new(JsonRpcErrorCode::InvalidRequest, msg.clone())
            }
            other => JsonRpcErrorObject::new(JsonRpcErrorCode::InternalError, other.to_string()),
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            McpError::Transport(_) => 400,
            McpError::Lifecycle(_) => 400,
            McpError::UnsupportedCapability(_) => 400,
            _ => 500,
        }
    }
}

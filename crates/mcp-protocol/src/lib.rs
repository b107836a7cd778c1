//! Wire types for the Model Context Protocol core: JSON-RPC envelope,
//! content blocks, capability negotiation, and the five verb
//! request/response pairs the Dispatcher serves (spec §6.1).

pub mod auth;
pub mod capabilities;
pub mod content;
pub mod error;
pub mod jsonrpc;
pub mod meta;
pub mod prompts;
pub mod resources;
pub mod sampling;
pub mod tools;

pub use auth::AuthConfig;
pub use capabilities::*;
pub use content::*;
pub use error::{McpError, McpResult};
pub use jsonrpc::*;
pub use meta::*;
pub use prompts::{GetPromptParams, GetPromptResult, ListPromptsResult, Prompt, PromptArgument, PromptMessage, Role};
pub use resources::{ListResourcesResult, ReadResourceParams, ReadResourceResult, Resource};
pub use sampling::{CreateMessageParams, CreateMessageResult, SamplingMessage};
pub use tools::{CallToolMeta, CallToolParams, CallToolResult, ListToolsResult, Tool, ToolAnnotations};

pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ClientCapabilities,
    #[serde(rename = "clientInfo")]
    pub client_info: Implementation,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

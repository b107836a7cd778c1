//! Dispatcher (spec §4.6): serves the five protocol verbs against a
//! [`Registry`], performing argument validation, Context assembly,
//! handler invocation, and result normalization — "the 20%" of the
//! workload the spec calls out as this module's share of the whole.

use std::sync::Arc;

use mcp_protocol::{
    CallToolResult, GetPromptParams, GetPromptResult, ListPromptsResult, ListResourcesResult, ListToolsResult, McpError,
    McpResult, ReadResourceParams, ReadResourceResult, ResourceContents,
};
use mcp_builders::traits::{HasInputSchema, PromptDefinition};
use mcp_schema::{properties, required_fields};
use serde_json::Value;

use crate::context::{with_context, Context, SamplingFn};
use crate::normalize::error_result;
use crate::registry::Registry;
use crate::session::SessionContext;

pub struct Dispatcher {
    registry: Arc<Registry>,
    logging_capability: bool,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, logging_capability: bool) -> Self {
        Self { registry, logging_capability }
    }

    pub fn tools_list(&self) -> ListToolsResult {
        ListToolsResult { tools: self.registry.list_tools(), next_cursor: None }
    }

    pub fn prompts_list(&self) -> ListPromptsResult {
        ListPromptsResult { prompts: self.registry.list_prompts(), next_cursor: None }
    }

    pub fn resources_list(&self) -> ListResourcesResult {
        ListResourcesResult { resources: self.registry.list_resources(), next_cursor: None }
    }

    /// Step-by-step per spec §4.6 "tools/call algorithm". Schema
    /// violations and handler failures both come back as `isError:true`
    /// content — only a genuinely unknown tool name is an error the
    /// caller must distinguish from a normal response.
    pub async fn tools_call(
        &self,
        name: &str,
        arguments: Value,
        session: SessionContext,
        progress_token: Option<Value>,
        sample_fn: Option<SamplingFn>,
    ) -> McpResult<CallToolResult> {
        let tool = self
            .registry
            .get_tool(name)
            .ok_or_else(|| McpError::unknown_tool(name, self.registry.tool_names()))?;

        if let Some(violations) = validate_arguments(&arguments, tool.input_schema()) {
            return Ok(error_result(format!("Validation Error: {}", violations.join("; "))));
        }

        let context = Arc::new(Context::new(
            name.to_string(),
            session,
            self.logging_capability,
            progress_token,
            sample_fn,
            None,
            Arc::clone(&self.registry),
        ));

        let result = with_context(Arc::clone(&context), || tool.execute(arguments)).await;
        Ok(result.unwrap_or_else(|err| error_result(err.to_string())))
    }

    /// `prompts/get` (spec §4.6): literal templates substitute inline;
    /// dynamic prompts call their bound handler. Both paths return a
    /// single user-role message, so the contract is identical either way.
    pub async fn prompts_get(&self, params: GetPromptParams) -> McpResult<GetPromptResult> {
        let prompt = self
            .registry
            .get_prompt(&params.name)
            .ok_or_else(|| McpError::unknown_prompt(params.name.clone(), self.registry.prompt_names()))?;
        prompt.resolve(params.arguments.unwrap_or_default()).await
    }

    /// `resources/read` (spec §4.6): `skill://` URIs resolve to the
    /// skill's generated Markdown bundle; everything else goes through
    /// the registered resource's own read algorithm.
    pub async fn resources_read(&self, params: ReadResourceParams) -> McpResult<ReadResourceResult> {
        if let Some(markdown) = self.registry.skill_markdown(&params.uri) {
            return Ok(ReadResourceResult {
                contents: vec![ResourceContents::Text(mcp_protocol::TextResourceContents {
                    uri: params.uri,
                    mime_type: Some("text/markdown".to_string()),
                    text: markdown,
                })],
            });
        }
        let resource = self.registry.get_resource(&params.uri).ok_or_else(|| {
            McpError::unknown_resource(params.uri.clone(), self.registry.resource_uris())
        })?;
        Ok(ReadResourceResult { contents: resource.read().await? })
    }
}

/// Validates `arguments` against a tool's JSON Schema the way a
/// Zod-equivalent parse would (spec §4.6 step 2): checks required-field
/// presence and each present field's type. Returns `None` on success,
/// or the list of human-readable violations otherwise.
fn validate_arguments(arguments: &Value, schema: &mcp_schema::JsonSchema) -> Option<Vec<String>> {
    let mut violations = Vec::new();
    let object = arguments.as_object().cloned().unwrap_or_default();

    for field in required_fields(schema) {
        if !object.contains_key(field) {
            violations.push(format!("'{field}' is required"));
        }
    }

    if let Some(props) = properties(schema) {
        for (field, field_schema) in props {
            if let Some(value) = object.get(field) {
                if !mcp_schema::type_matches(field_schema, value) {
                    violations.push(format!("'{field}' has the wrong type"));
                }
            }
        }
    }

    if violations.is_empty() {
        None
    } else {
        Some(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionManager;
    use mcp_builders::ToolBuilder;

    async fn dispatcher_with_add_tool() -> (Dispatcher, SessionContext) {
        let mut registry = Registry::new();
        registry.add_tool(
            ToolBuilder::new("add")
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
                    Ok(CallToolResult::success(vec![mcp_protocol::ContentBlock::text(
                        serde_json::json!({"sum": a + b}).to_string(),
                    )]))
                })
                .build(),
        ).unwrap();
        let manager = SessionManager::new();
        let session = manager.create().await;
        (Dispatcher::new(Arc::new(registry), false), session)
    }

    #[tokio::test]
    async fn tools_call_scenario_s1() {
        let (dispatcher, session) = dispatcher_with_add_tool().await;
        let result = dispatcher
            .tools_call("add", serde_json::json!({"a": 5, "b": 3}), session, None, None)
            .await
            .unwrap();
        assert!(!result.is_error);
        let mcp_protocol::ContentBlock::Text { text } = &result.content[0] else { panic!("expected text") };
        assert_eq!(text, r#"{"sum":8}"#);
    }

    #[tokio::test]
    async fn tools_call_missing_required_arg_returns_error_content_scenario_s2() {
        let (dispatcher, session) = dispatcher_with_add_tool().await;
        let result = dispatcher.tools_call("add", serde_json::json!({"a": 5}), session, None, None).await.unwrap();
        assert!(result.is_error);
        let mcp_protocol::ContentBlock::Text { text } = &result.content[0] else { panic!("expected text") };
        assert!(text.contains("Validation Error") && text.contains("'b' is required"));
    }

    #[tokio::test]
    async fn tools_call_unknown_tool_is_an_error() {
        let (dispatcher, session) = dispatcher_with_add_tool().await;
        let result = dispatcher.tools_call("does_not_exist", serde_json::json!({}), session, None, None).await;
        assert!(matches!(result, Err(McpError::UnknownEntity { .. })));
    }
}

//! Runtime tool construction — the programmatic builder API that is the
//! "ground truth" the spec's Design Notes call for (§9): both
//! `mcp-compiler` (reading annotated structs) and `mcp-derive` (proc
//! macros) ultimately assemble one of these.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use mcp_protocol::{CallToolResult, McpResult, ToolAnnotations};
use mcp_schema::JsonSchema;
use serde_json::Value;

use crate::traits::{HasAnnotations, HasBaseMetadata, HasDescription, HasInputSchema, HasOutputSchema, HasToolMeta, HasVisibility};

/// A tool's execution function: arguments in, a `CallToolResult` out.
/// Boxed/`Arc`'d so the Registry can hold heterogeneous tools behind one
/// trait object (mirrors `McpTool` in the teacher).
pub type ToolFn = Arc<
    dyn Fn(Value) -> Pin<Box<dyn Future<Output = McpResult<CallToolResult>> + Send>> + Send + Sync,
>;

#[derive(Clone)]
pub struct BuiltTool {
    name: String,
    title: Option<String>,
    description: Option<String>,
    input_schema: JsonSchema,
    output_schema: Option<JsonSchema>,
    annotations: Option<ToolAnnotations>,
    meta: Option<HashMap<String, Value>>,
    hidden: bool,
    execute_fn: ToolFn,
}

impl HasBaseMetadata for BuiltTool {
    fn name(&self) -> &str {
        &self.name
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
impl HasDescription for BuiltTool {
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
impl HasInputSchema for BuiltTool {
    fn input_schema(&self) -> &JsonSchema {
        &self.input_schema
    }
}
impl HasOutputSchema for BuiltTool {
    fn output_schema(&self) -> Option<&JsonSchema> {
        self.output_schema.as_ref()
    }
}
impl HasAnnotations for BuiltTool {
    fn annotations(&self) -> Option<&ToolAnnotations> {
        self.annotations.as_ref()
    }
}
impl HasToolMeta for BuiltTool {
    fn tool_meta(&self) -> Option<&HashMap<String, Value>> {
        self.meta.as_ref()
    }
}
impl HasVisibility for BuiltTool {
    fn hidden(&self) -> bool {
        self.hidden
    }
}

impl BuiltTool {
    pub async fn execute(&self, args: Value) -> McpResult<CallToolResult> {
        (self.execute_fn)(args).await
    }
}

pub struct ToolBuilder {
    name: String,
    title: Option<String>,
    description: Option<String>,
    input_schema: JsonSchema,
    output_schema: Option<JsonSchema>,
    annotations: Option<ToolAnnotations>,
    meta: Option<HashMap<String, Value>>,
    hidden: bool,
    execute_fn: Option<ToolFn>,
}

impl ToolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            input_schema: JsonSchema::object(),
            output_schema: None,
            annotations: None,
            meta: None,
            hidden: false,
            execute_fn: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn input_schema(mut self, schema: JsonSchema) -> Self {
        self.input_schema = schema;
        self
    }

    pub fn output_schema(mut self, schema: JsonSchema) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Mark hidden at build time — the Registry also forces this when a
    /// skill bundles the tool, regardless of this flag (spec §3.2).
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn execute<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = McpResult<CallToolResult>> + Send + 'static,
    {
        self.execute_fn = Some(Arc::new(move |args| Box::pin(f(args))));
        self
    }

    pub fn build(self) -> BuiltTool {
        let execute_fn = self.execute_fn.unwrap_or_else(|| {
            Arc::new(|_| {
                Box::pin(async move {
                    Ok(CallToolResult::error_text(
                        "tool has no bound implementation",
                    ))
                })
            })
        });
        BuiltTool {
            name: self.name,
            title: self.title,
            description: self.description,
            input_schema: self.input_schema,
            output_schema: self.output_schema,
            annotations: self.annotations,
            meta: self.meta,
            hidden: self.hidden,
            execute_fn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ToolDefinition;

    #[tokio::test]
    async fn builder_produces_callable_tool() {
        let tool = ToolBuilder::new("add")
            .description("Add two numbers")
            .execute(|args| async move {
                let a = args.get("a").and_then(Value::as_f64).unwrap_or(0.0);
                let b = args.get("b").and_then(Value::as_f64).unwrap_or(0.0);
                Ok(CallToolResult::success(vec![mcp_protocol::ContentBlock::text(
                    serde_json::json!({"sum": a + b}).to_string(),
                )]))
            })
            .build();

        assert_eq!(tool.name(), "add");
        let result = tool.execute(serde_json::json!({"a": 5, "b": 3})).await.unwrap();
        assert!(!result.is_error);
    }
}

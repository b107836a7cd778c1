//! Integration tests for `#[derive(Tool)]` — exercises the generated
//! code against the real `mcp-builders`/`mcp-server` runtime rather than
//! asserting on the macro's token output, matching scenario S1 (AddTool).

use mcp_derive::Tool;
use serde::Deserialize;

#[derive(Tool, Deserialize)]
#[tool(name = "add", description = "Add two numbers")]
struct AddTool {
    #[param(description = "First number")]
    a: f64,
    #[param(description = "Second number")]
    b: f64,
}

impl AddTool {
    async fn execute(&self) -> mcp_protocol::McpResult<serde_json::Value> {
        Ok(serde_json::json!({ "sum": self.a + self.b }))
    }
}

#[derive(Tool, Deserialize)]
struct WeatherForecastTool {
    #[param(description = "City name")]
    location: String,
    #[param(description = "Forecast days", optional, min = "1", max = "14")]
    days: Option<u32>,
}

impl WeatherForecastTool {
    async fn execute(&self) -> mcp_protocol::McpResult<String> {
        Ok(format!("forecast for {}", self.location))
    }
}

#[tokio::test]
async fn derived_tool_dispatches_through_the_real_registry() {
    let mut registry = mcp_server::Registry::new();
    registry.add_tool(AddTool::into_built_tool()).unwrap();
    let dispatcher = mcp_server::Dispatcher::new(std::sync::Arc::new(registry), false);
    let session = mcp_server::session::SessionManager::new().create().await;

    let result = dispatcher
        .tools_call("add", serde_json::json!({ "a": 2.0, "b": 3.0 }), session, None, None)
        .await
        .unwrap();

    assert!(!result.is_error);
    let mcp_protocol::ContentBlock::Text { text } = &result.content[0] else {
        panic!("expected text content");
    };
    assert!(text.contains('5'));
}

#[test]
fn missing_explicit_name_falls_back_to_kebab_case() {
    let tool = WeatherForecastTool::into_built_tool();
    assert_eq!(mcp_builders::traits::HasBaseMetadata::name(&tool), "weather_forecast_tool");
}

#[test]
fn schema_marks_optional_numeric_param_with_bounds() {
    let schema = WeatherForecastTool::__mcp_input_schema();
    let required = mcp_schema::required_fields(&schema);
    assert!(required.iter().any(|r| r == "location"));
    assert!(!required.iter().any(|r| r == "days"));
}

#[test]
fn registering_populates_the_metadata_keyring() {
    let _ = AddTool::into_built_tool();
    let entry = mcp_server::metadata_store::all()
        .into_iter()
        .find(|e| e.declared_name.as_deref() == Some("add"))
        .expect("AddTool registers itself in the keyring");
    assert_eq!(entry.kind, "tool");
}

#[tokio::test]
async fn invalid_arguments_are_rejected_before_execute_runs() {
    let tool = AddTool::into_built_tool();
    let err = tool.execute(serde_json::json!({ "a": "not a number", "b": 1.0 })).await;
    assert!(err.is_err());
}

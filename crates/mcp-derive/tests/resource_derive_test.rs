//! Integration tests for `#[derive(Resource)]` — static literal and
//! dynamic read forms, plus the `ui://` MIME constraint (spec §3.2).

use mcp_derive::Resource;

#[derive(Resource)]
#[resource(uri = "config://server", name = "Server Config", mime_type = "application/json",
           value = r#"{"apiVersion":"3.0.0","debug":false}"#)]
struct ServerConfigResource;

#[derive(Resource)]
#[resource(uri = "clock://now", name = "Current Time", dynamic = true)]
struct ClockResource;

impl ClockResource {
    async fn read() -> mcp_protocol::McpResult<mcp_builders::ResourcePayload> {
        Ok(mcp_builders::ResourcePayload::Text("2026-07-27T00:00:00Z".to_string()))
    }
}

#[derive(Resource)]
#[resource(uri = "ui://widget", name = "Widget", mime_type = "application/json", value = "{}")]
struct MismatchedUiResource;

#[tokio::test]
async fn static_json_resource_serializes_scenario_s3() {
    let resource = ServerConfigResource::into_built_resource().unwrap();
    let contents = resource.read().await.unwrap();
    let mcp_protocol::ResourceContents::Text(text) = &contents[0] else {
        panic!("expected text content");
    };
    assert_eq!(text.text, r#"{"apiVersion":"3.0.0","debug":false}"#);
}

#[tokio::test]
async fn dynamic_resource_calls_the_authored_read() {
    let resource = ClockResource::into_built_resource().unwrap();
    let contents = resource.read().await.unwrap();
    let mcp_protocol::ResourceContents::Text(text) = &contents[0] else {
        panic!("expected text content");
    };
    assert_eq!(text.text, "2026-07-27T00:00:00Z");
}

#[test]
fn ui_resource_mime_mismatch_rejected_at_build() {
    assert!(MismatchedUiResource::into_built_resource().is_err());
}

//! Result normalization (spec §4.6.1): maps whatever a handler returns
//! onto the wire-format `CallToolResult`. A handler can hand back an
//! already-built result, a bare string, raw bytes, a tagged content
//! object, or any other serializable value — this is the single choke
//! point that makes all of those equivalent to the caller.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use mcp_protocol::{BlobResourceContents, CallToolResult, ContentBlock, ResourceContents};
use serde_json::Value;

/// What a tool handler is allowed to return. Handlers written against
/// [`mcp_builders::ToolFn`] produce this directly; handlers that return
/// a bare `serde_json::Value` go through [`normalize_value`] instead.
#[derive(Debug, Clone)]
pub enum HandlerOutput {
    Result(CallToolResult),
    Text(String),
    Image { bytes: Vec<u8>, mime_type: String },
    Audio { bytes: Vec<u8>, mime_type: String },
    Json(Value),
}

pub fn normalize(output: HandlerOutput) -> CallToolResult {
    match output {
        HandlerOutput::Result(result) => result,
        HandlerOutput::Text(text) => CallToolResult::success(vec![ContentBlock::text(text)]),
        HandlerOutput::Image { bytes, mime_type } => {
            CallToolResult::success(vec![ContentBlock::image(BASE64.encode(bytes), mime_type)])
        }
        HandlerOutput::Audio { bytes, mime_type } => {
            CallToolResult::success(vec![ContentBlock::audio(BASE64.encode(bytes), mime_type)])
        }
        HandlerOutput::Json(value) => normalize_value(value),
    }
}

/// Normalizes a bare `serde_json::Value` the way a dynamically-typed
/// handler's return value arrives off the wire — tools compiled from
/// declarations that return a plain struct go through here.
pub fn normalize_value(value: Value) -> CallToolResult {
    if let Some(result) = as_existing_result(&value) {
        return result;
    }
    match value {
        Value::String(text) => CallToolResult::success(vec![ContentBlock::text(text)]),
        Value::Object(ref map) => match map.get("type").and_then(Value::as_str) {
            Some("image") => content_from_tagged(map, ContentBlock::image),
            Some("audio") => content_from_tagged(map, ContentBlock::audio),
            Some("binary") | Some("file") => content_from_binary_tagged(map),
            _ => json_text(&value),
        },
        other => json_text(&other),
    }
}

fn as_existing_result(value: &Value) -> Option<CallToolResult> {
    let Value::Object(map) = value else { return None };
    if !map.contains_key("content") {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}

fn content_from_tagged(
    map: &serde_json::Map<String, Value>,
    build: impl Fn(String, String) -> ContentBlock,
) -> CallToolResult {
    let data = map.get("data").and_then(Value::as_str).unwrap_or_default().to_string();
    let mime_type = map
        .get("mimeType")
        .or_else(|| map.get("mime_type"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default_mime_for(map.get("type").and_then(Value::as_str).unwrap_or("binary")));
    CallToolResult::success(vec![build(data, mime_type)])
}

/// `binary`/`file` tagged objects carry a resource, not a tool-content
/// block directly — MCP has no bare "blob" content type, so these
/// become a `resource` content entry wrapping a blob resource (spec
/// §4.6.1 "may read from a file path ... detect MIME from extension").
fn content_from_binary_tagged(map: &serde_json::Map<String, Value>) -> CallToolResult {
    let uri = map.get("uri").or_else(|| map.get("path")).and_then(Value::as_str).unwrap_or("file://unnamed").to_string();
    let blob = match map.get("data").and_then(Value::as_str) {
        Some(already_base64) => already_base64.to_string(),
        None => map
            .get("path")
            .and_then(Value::as_str)
            .and_then(|path| std::fs::read(path).ok())
            .map(|bytes| BASE64.encode(bytes))
            .unwrap_or_default(),
    };
    let mime_type = map
        .get("mimeType")
        .or_else(|| map.get("mime_type"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| mime_from_extension(&uri));
    CallToolResult::success(vec![ContentBlock::Resource {
        resource: ResourceContents::Blob(BlobResourceContents { uri, mime_type, blob }),
    }])
}

fn mime_from_extension(uri: &str) -> Option<String> {
    let ext = uri.rsplit('.').next()?;
    Some(
        match ext {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "pdf" => "application/pdf",
            "wav" => "audio/wav",
            "mp3" => "audio/mpeg",
            _ => "application/octet-stream",
        }
        .to_string(),
    )
}

fn default_mime_for(tag: &str) -> String {
    match tag {
        "image" => "image/png",
        "audio" => "audio/wav",
        _ => "application/octet-stream",
    }
    .to_string()
}

fn json_text(value: &Value) -> CallToolResult {
    let text = serde_json::to_string(value).unwrap_or_else(|_| value.to_string());
    CallToolResult::success(vec![ContentBlock::text(text)])
}

pub fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![ContentBlock::text(message.into())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_becomes_single_text_block() {
        let result = normalize_value(Value::String("hi".into()));
        assert_eq!(result.content.len(), 1);
        assert!(matches!(&result.content[0], ContentBlock::Text { text, .. } if text == "hi"));
    }

    #[test]
    fn plain_object_becomes_json_text() {
        let result = normalize_value(serde_json::json!({"sum": 8}));
        let ContentBlock::Text { text, .. } = &result.content[0] else { panic!("expected text") };
        assert_eq!(text, r#"{"sum":8}"#);
    }

    #[test]
    fn already_wrapped_result_passes_through_scenario_normalization_idempotence() {
        let result = CallToolResult::success(vec![ContentBlock::text("ok")]);
        let as_value = serde_json::to_value(&result).unwrap();
        let first = normalize_value(as_value.clone());
        let second = normalize_value(serde_json::to_value(&first).unwrap());
        assert_eq!(serde_json::to_value(&first).unwrap(), serde_json::to_value(&second).unwrap());
    }

    #[test]
    fn tagged_image_object_base64_round_trips_its_data_field() {
        let result = normalize_value(serde_json::json!({"type": "image", "data": "Zm9v", "mimeType": "image/jpeg"}));
        let ContentBlock::Image { data, mime_type, .. } = &result.content[0] else { panic!("expected image") };
        assert_eq!(data, "Zm9v");
        assert_eq!(mime_type, "image/jpeg");
    }

    #[test]
    fn raw_bytes_default_to_png() {
        let result = normalize(HandlerOutput::Image { bytes: vec![1, 2, 3], mime_type: "image/png".into() });
        let ContentBlock::Image { mime_type, .. } = &result.content[0] else { panic!("expected image") };
        assert_eq!(mime_type, "image/png");
    }
}

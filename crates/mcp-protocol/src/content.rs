//! Content block and resource-content wire types (spec §4.6.1, §6.4).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Audio {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Resource {
        resource: ResourceContents,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn image(data_base64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ContentBlock::Image { data: data_base64.into(), mime_type: mime_type.into() }
    }

    pub fn audio(data_base64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ContentBlock::Audio { data: data_base64.into(), mime_type: mime_type.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceContents {
    Text(TextResourceContents),
    Blob(BlobResourceContents),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextResourceContents {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobResourceContents {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub blob: String,
}

/// `{content:[...], isError}` — the shape every `tools/call` response
/// normalizes to (spec §4.6.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not", default)]
    pub is_error: bool,
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

impl CallToolResult {
    pub fn success(content: Vec<ContentBlock>) -> Self {
        Self { content, is_error: false, structured_content: None }
    }

    pub fn error(content: Vec<ContentBlock>) -> Self {
        Self { content, is_error: true, structured_content: None }
    }

    pub fn error_text(text: impl Into<String>) -> Self {
        Self::error(vec![ContentBlock::text(text)])
    }

    pub fn with_structured_content(mut self, value: Value) -> Self {
        self.structured_content = Some(value);
        self
    }
}

/// Annotations carried by resources/prompts/tools for client rendering
/// hints. Not interpreted by the core; passed through verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

/// The three MCP-UI resource MIME types a `ui://`-scheme resource must
/// use (spec §3.2).
pub const UI_MIME_TYPES: &[&str] = &[
    "text/html",
    "text/uri-list",
    "application/vnd.mcp-ui.remote-dom+javascript",
];

pub fn validate_ui_resource(uri: &str, mime_type: &str) -> Result<(), String> {
    let is_ui_uri = uri.starts_with("ui://");
    let is_ui_mime = UI_MIME_TYPES.contains(&mime_type);
    if is_ui_uri && !is_ui_mime {
        return Err(format!(
            "resource '{uri}' uses ui:// scheme but mimeType '{mime_type}' is not one of {UI_MIME_TYPES:?}"
        ));
    }
    if is_ui_mime && !is_ui_uri {
        return Err(format!(
            "resource '{uri}' uses a UI mimeType '{mime_type}' but its URI must start with ui://"
        ));
    }
    Ok(())
}

/// `Object|String → JSON | string form` per spec §6.4: JSON-family MIME
/// types serialize structured literal data to JSON text; anything else
/// uses the value's string form.
pub fn literal_to_text(value: &Value, mime_type: &str) -> String {
    let is_json_family = mime_type == "application/json" || mime_type.ends_with("+json");
    if is_json_family {
        serde_json::to_string(value).unwrap_or_default()
    } else {
        match value {
            Value::String(s) => s.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}

/// Hash map alias used by `_meta` fields across protocol types.
pub type Meta = HashMap<String, Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_resource_requires_matching_mime() {
        assert!(validate_ui_resource("ui://widget", "text/html").is_ok());
        assert!(validate_ui_resource("ui://widget", "application/json").is_err());
        assert!(validate_ui_resource("config://server", "text/html").is_err());
    }

    #[test]
    fn literal_to_text_json_family_serializes() {
        let value = serde_json::json!({"apiVersion": "3.0.0", "debug": false});
        assert_eq!(
            literal_to_text(&value, "application/json"),
            r#"{"apiVersion":"3.0.0","debug":false}"#
        );
    }

    #[test]
    fn literal_to_text_plain_string_passes_through() {
        let value = Value::String("hello".into());
        assert_eq!(literal_to_text(&value, "text/plain"), "hello");
    }
}

//! Runtime resource construction: static literal `data`/`value` and
//! dynamic read functions (spec §3.1 `ResourceDecl`, §4.6 read
//! algorithm, §6.4 static content serialization).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use base64::Engine;
use mcp_protocol::content::{literal_to_text, validate_ui_resource, BlobResourceContents, ResourceContents, TextResourceContents};
use mcp_protocol::McpResult;
use serde_json::Value;

use crate::traits::{HasResourceDescription, HasResourceMetadata, HasResourceMimeType, HasResourceVisibility};

pub enum ResourcePayload {
    Text(String),
    Binary(Vec<u8>),
}

pub type ResourceFn = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = McpResult<ResourcePayload>> + Send>> + Send + Sync>;

enum ResourceBody {
    Static(Value),
    Dynamic(ResourceFn),
}

pub struct BuiltResource {
    uri: String,
    name: String,
    description: Option<String>,
    mime_type: Option<String>,
    hidden: bool,
    body: ResourceBody,
}

impl HasResourceMetadata for BuiltResource {
    fn uri(&self) -> &str {
        &self.uri
    }
    fn name(&self) -> &str {
        &self.name
    }
}
impl HasResourceDescription for BuiltResource {
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
impl HasResourceMimeType for BuiltResource {
    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}
impl HasResourceVisibility for BuiltResource {
    fn hidden(&self) -> bool {
        self.hidden
    }
}

impl BuiltResource {
    pub fn is_static(&self) -> bool {
        matches!(self.body, ResourceBody::Static(_))
    }

    /// Resolve this resource's content the way `resources/read` does:
    /// a callable body is invoked; binary payloads are base64-encoded
    /// into `blob`, everything else becomes `text` (JSON-stringified for
    /// non-strings) — spec §4.6 read algorithm.
    pub async fn read(&self) -> McpResult<Vec<ResourceContents>> {
        let mime_type = self.mime_type.clone();
        match &self.body {
            ResourceBody::Static(value) => {
                let text = literal_to_text(value, mime_type.as_deref().unwrap_or("text/plain"));
                Ok(vec![ResourceContents::Text(TextResourceContents { uri: self.uri.clone(), mime_type, text })])
            }
            ResourceBody::Dynamic(f) => match f().await? {
                ResourcePayload::Text(text) => {
                    Ok(vec![ResourceContents::Text(TextResourceContents { uri: self.uri.clone(), mime_type, text })])
                }
                ResourcePayload::Binary(bytes) => {
                    let blob = base64::engine::general_purpose::STANDARD.encode(bytes);
                    Ok(vec![ResourceContents::Blob(BlobResourceContents { uri: self.uri.clone(), mime_type, blob })])
                }
            },
        }
    }
}

pub struct ResourceBuilder {
    uri: String,
    name: String,
    description: Option<String>,
    mime_type: Option<String>,
    hidden: bool,
    body: Option<ResourceBody>,
}

impl ResourceBuilder {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self { uri: uri.into(), name: name.into(), description: None, mime_type: None, hidden: false, body: None }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn literal(mut self, value: Value) -> Self {
        self.body = Some(ResourceBody::Static(value));
        self
    }

    pub fn dynamic<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = McpResult<ResourcePayload>> + Send + 'static,
    {
        self.body = Some(ResourceBody::Dynamic(Arc::new(move || Box::pin(f()))));
        self
    }

    /// Validates the `ui://` scheme / MIME-type pairing before building
    /// (spec §3.2); callers that want load-time enforcement should check
    /// the `Result`, mirroring the Validator & Linker's rule 6.
    pub fn build(self) -> Result<BuiltResource, String> {
        validate_ui_resource(&self.uri, self.mime_type.as_deref().unwrap_or(""))?;
        Ok(BuiltResource {
            uri: self.uri,
            name: self.name,
            description: self.description,
            mime_type: self.mime_type,
            hidden: self.hidden,
            body: self.body.unwrap_or(ResourceBody::Static(Value::Null)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_json_resource_serializes_scenario_s3() {
        let resource = ResourceBuilder::new("config://server", "Server Config")
            .mime_type("application/json")
            .literal(serde_json::json!({"apiVersion": "3.0.0", "debug": false}))
            .build()
            .unwrap();

        let contents = resource.read().await.unwrap();
        let ResourceContents::Text(text) = &contents[0] else {
            panic!("expected text content");
        };
        assert_eq!(text.text, r#"{"apiVersion":"3.0.0","debug":false}"#);
    }

    #[test]
    fn ui_resource_mime_mismatch_rejected_at_build() {
        let result = ResourceBuilder::new("ui://widget", "Widget").mime_type("application/json").build();
        assert!(result.is_err());
    }
}

//! Runtime prompt construction: static literal `template`s and dynamic
//! render functions (spec §3.1 `PromptDecl`).

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use mcp_protocol::{GetPromptResult, McpResult, PromptArgument};
use serde_json::Value;

use crate::message::render_template;
use crate::traits::{HasPromptArguments, HasPromptDescription, HasPromptMetadata, HasPromptVisibility, single_user_message};

pub type PromptFn = Arc<
    dyn Fn(HashMap<String, Value>) -> Pin<Box<dyn Future<Output = McpResult<String>> + Send>> + Send + Sync,
>;

enum PromptBody {
    Static(String),
    Dynamic(PromptFn),
}

pub struct BuiltPrompt {
    name: String,
    description: Option<String>,
    arguments: Vec<PromptArgument>,
    hidden: bool,
    body: PromptBody,
}

impl HasPromptMetadata for BuiltPrompt {
    fn name(&self) -> &str {
        &self.name
    }
}
impl HasPromptDescription for BuiltPrompt {
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
impl HasPromptArguments for BuiltPrompt {
    fn arguments(&self) -> Vec<PromptArgument> {
        self.arguments.clone()
    }
}
impl HasPromptVisibility for BuiltPrompt {
    fn hidden(&self) -> bool {
        self.hidden
    }
}

impl BuiltPrompt {
    pub fn is_static(&self) -> bool {
        matches!(self.body, PromptBody::Static(_))
    }

    pub async fn resolve(&self, args: HashMap<String, Value>) -> McpResult<GetPromptResult> {
        let text = match &self.body {
            PromptBody::Static(template) => render_template(template, &args),
            PromptBody::Dynamic(f) => f(args).await?,
        };
        Ok(single_user_message(self.description.clone(), text))
    }
}

pub struct PromptBuilder {
    name: String,
    description: Option<String>,
    arguments: Vec<PromptArgument>,
    hidden: bool,
    body: Option<PromptBody>,
}

impl PromptBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: None, arguments: Vec::new(), hidden: false, body: None }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn argument(mut self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.arguments.push(PromptArgument {
            name: name.into(),
            description: Some(description.into()),
            required: Some(required),
        });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Static literal `template` containing `{var}`/`{{var}}` placeholders.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.body = Some(PromptBody::Static(template.into()));
        self
    }

    /// Dynamic marker with a bound render function (spec §3.1).
    pub fn dynamic<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(HashMap<String, Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = McpResult<String>> + Send + 'static,
    {
        self.body = Some(PromptBody::Dynamic(Arc::new(move |args| Box::pin(f(args)))));
        self
    }

    pub fn build(self) -> BuiltPrompt {
        BuiltPrompt {
            name: self.name,
            description: self.description,
            arguments: self.arguments,
            hidden: self.hidden,
            body: self.body.unwrap_or(PromptBody::Static(String::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_template_renders_scenario_s4() {
        let prompt = PromptBuilder::new("weather_report")
            .template("Generate a {style} weather report for {location}.")
            .argument("location", "City", true)
            .argument("style", "Tone", true)
            .build();

        let mut args = HashMap::new();
        args.insert("location".to_string(), Value::String("Paris".into()));
        args.insert("style".to_string(), Value::String("formal".into()));

        let result = prompt.resolve(args).await.unwrap();
        assert_eq!(result.messages.len(), 1);
        let mcp_protocol::ContentBlock::Text { text } = &result.messages[0].content else {
            panic!("expected text content");
        };
        assert!(text.contains("Paris") && text.contains("formal"));
    }
}

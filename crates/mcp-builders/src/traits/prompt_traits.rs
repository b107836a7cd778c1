//! Fine-grained prompt metadata traits — the prompt analogue of
//! `tool_traits.rs`. A prompt is either static (literal `template`) or
//! dynamic (a bound render function elsewhere); this trait only carries
//! the metadata shared by both.

use mcp_protocol::{GetPromptResult, Prompt, PromptArgument};

pub trait HasPromptMetadata {
    fn name(&self) -> &str;
    fn title(&self) -> Option<&str> {
        None
    }
}

pub trait HasPromptDescription {
    fn description(&self) -> Option<&str> {
        None
    }
}

pub trait HasPromptArguments {
    fn arguments(&self) -> Vec<PromptArgument> {
        Vec::new()
    }
}

pub trait HasPromptVisibility {
    fn hidden(&self) -> bool {
        false
    }
}

pub trait PromptDefinition: HasPromptMetadata + HasPromptDescription + HasPromptArguments + HasPromptVisibility + Send + Sync {
    fn to_prompt(&self) -> Prompt {
        Prompt {
            name: self.name().to_string(),
            description: self.description().map(String::from),
            arguments: Some(self.arguments()),
        }
    }
}

impl<T> PromptDefinition for T where T: HasPromptMetadata + HasPromptDescription + HasPromptArguments + HasPromptVisibility + Send + Sync {}

/// Render the result of resolving a prompt invocation into the one
/// user-role message the spec's `prompts/get` always returns (§4.6).
pub fn single_user_message(description: Option<String>, text: String) -> GetPromptResult {
    GetPromptResult {
        description,
        messages: vec![mcp_protocol::PromptMessage::user_text(text)],
    }
}

//! Fine-grained tool metadata traits.
//!
//! **Framework feature, not part of the wire protocol.** The protocol
//! only defines the concrete `Tool` struct; these traits are the seam
//! the Interface Compiler, the `#[derive(Tool)]` macro, and
//! hand-written builders all target, so that a struct implementing them
//! gets [`ToolDefinition`] (and therefore registrability) for free.

use std::collections::HashMap;

use mcp_protocol::{Tool, ToolAnnotations};
use mcp_schema::JsonSchema;
use serde_json::Value;

pub trait HasBaseMetadata {
    /// Programmatic identifier.
    fn name(&self) -> &str;
    /// Human-readable display name.
    fn title(&self) -> Option<&str> {
        None
    }
}

pub trait HasDescription {
    fn description(&self) -> Option<&str> {
        None
    }
}

pub trait HasInputSchema {
    fn input_schema(&self) -> &JsonSchema;
}

pub trait HasOutputSchema {
    fn output_schema(&self) -> Option<&JsonSchema> {
        None
    }
}

pub trait HasAnnotations {
    fn annotations(&self) -> Option<&ToolAnnotations> {
        None
    }
}

pub trait HasToolMeta {
    fn tool_meta(&self) -> Option<&HashMap<String, Value>> {
        None
    }
}

/// A tool is `hidden` when it is a skill/router member marked so at
/// registration; hidden tools stay executable but drop out of
/// `tools/list` (spec §4.5/§4.6).
pub trait HasVisibility {
    fn hidden(&self) -> bool {
        false
    }
}

/// Complete tool definition, composed from the fine-grained traits
/// above. Any type implementing the required traits gets this for free
/// via the blanket impl below — the same "decorator accrual without
/// decorators" pattern the Decorator Metadata Store describes.
pub trait ToolDefinition:
    HasBaseMetadata + HasDescription + HasInputSchema + HasOutputSchema + HasAnnotations + HasToolMeta + HasVisibility + Send + Sync
{
    fn display_name(&self) -> &str {
        self.title()
            .or_else(|| self.annotations().and_then(|a| a.title.as_deref()))
            .unwrap_or_else(|| self.name())
    }

    fn to_tool(&self) -> Tool {
        Tool {
            name: self.name().to_string(),
            title: self.title().map(String::from),
            description: self.description().map(String::from),
            input_schema: self.input_schema().clone(),
            output_schema: self.output_schema().cloned(),
            annotations: self.annotations().cloned(),
            meta: self.tool_meta().cloned(),
        }
    }
}

impl<T> ToolDefinition for T where
    T: HasBaseMetadata + HasDescription + HasInputSchema + HasOutputSchema + HasAnnotations + HasToolMeta + HasVisibility + Send + Sync
{
}

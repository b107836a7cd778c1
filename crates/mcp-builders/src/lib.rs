//! Fine-grained metadata traits and runtime builders for tools, prompts,
//! resources, routers, and skills.
//!
//! **Framework features, not part of the MCP specification.** The wire
//! protocol (`mcp-protocol`) defines only the concrete descriptor
//! structs; this crate is the common seam the Interface Compiler
//! (`mcp-compiler`), the decorator-style proc macros (`mcp-derive`), and
//! hand-written servers all target — the "programmatic API... remains
//! the ground truth" the spec's Design Notes call for.

pub mod message;
pub mod prompt;
pub mod resource;
pub mod router;
pub mod skill;
pub mod tool;
pub mod traits;

pub mod prelude {
    pub use crate::message::render_template;
    pub use crate::prompt::{BuiltPrompt, PromptBuilder};
    pub use crate::resource::{BuiltResource, ResourceBuilder, ResourcePayload};
    pub use crate::router::RouterBuilder;
    pub use crate::skill::SkillBuilder;
    pub use crate::tool::{BuiltTool, ToolBuilder};
    pub use crate::traits::*;
}

pub use prelude::*;

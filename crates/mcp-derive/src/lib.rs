//! Proc-macro decorator alternative for the bare-interface pattern (spec
//! §4.9 EXPANDED, "Decorator Metadata Store without decorators").
//!
//! Rust has no runtime class decorators, so there is nothing here that
//! mutates a live class the way the original's `@tool(...)` would. Each
//! derive instead expands, at compile time, into an inherent method that
//! assembles the same [`mcp_builders`] runtime value a hand-written
//! server would build directly — the annotated struct is simultaneously
//! what [`mcp_compiler`]'s static source parser reads back out of
//! source text and what these macros turn into executable schema +
//! dispatch glue.
//!
//! ```ignore
//! #[derive(Tool, serde::Deserialize)]
//! #[tool(name = "add", description = "Add two numbers")]
//! struct AddTool {
//!     #[param(description = "First number")]
//!     a: f64,
//!     #[param(description = "Second number")]
//!     b: f64,
//! }
//!
//! impl AddTool {
//!     async fn execute(&self) -> mcp_protocol::McpResult<serde_json::Value> {
//!         Ok(serde_json::json!({ "sum": self.a + self.b }))
//!     }
//! }
//!
//! let tool = AddTool::into_built_tool();
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, ItemStruct};

mod attrs;
mod prompt_derive;
mod resource_derive;
mod router_derive;
mod server_attr;
mod skill_derive;
mod tool_derive;
mod utils;

/// `#[derive(Tool)]`: struct fields become the input schema and the
/// deserialization target; the author writes `impl Self { async fn
/// execute(&self) -> McpResult<impl Serialize> }` by hand.
#[proc_macro_derive(Tool, attributes(tool, param))]
pub fn derive_tool(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    tool_derive::expand(input).unwrap_or_else(|err| err.to_compile_error()).into()
}

/// `#[derive(Prompt)]`: a literal `template` attribute for the static
/// form, or struct fields as argument schema plus an author-supplied
/// `async fn render(&self) -> McpResult<String>` for the dynamic form.
#[proc_macro_derive(Prompt, attributes(prompt, param))]
pub fn derive_prompt(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    prompt_derive::expand(input).unwrap_or_else(|err| err.to_compile_error()).into()
}

/// `#[derive(Resource)]`: a literal `data`/`value` attribute for the
/// static form, or `dynamic = true` plus an author-supplied associated
/// `async fn read() -> McpResult<ResourcePayload>` for the dynamic form.
#[proc_macro_derive(Resource, attributes(resource))]
pub fn derive_resource(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    resource_derive::expand(input).unwrap_or_else(|err| err.to_compile_error()).into()
}

/// `#[derive(Router)]`: bundles already-declared tool names behind one
/// namespaced entry point.
#[proc_macro_derive(Router, attributes(router))]
pub fn derive_router(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    router_derive::expand(input).unwrap_or_else(|err| err.to_compile_error()).into()
}

/// `#[derive(Skill)]`: bundles already-declared tools, resources, and
/// prompts into one named, markdown-renderable unit.
#[proc_macro_derive(Skill, attributes(skill))]
pub fn derive_skill(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    skill_derive::expand(input).unwrap_or_else(|err| err.to_compile_error()).into()
}

/// `#[mcp_server(name = "...", version = "...", description = "...")]`:
/// generates `server_info()` / `auth_config()` on the annotated struct
/// and, for unit structs, an auto-instantiation `instance()`.
#[proc_macro_attribute]
pub fn mcp_server(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemStruct);
    server_attr::expand(attr.into(), item).unwrap_or_else(|err| err.to_compile_error()).into()
}

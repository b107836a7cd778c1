//! Data model produced by the Parser and consumed by the Discoverer,
//! Validator & Linker, and — one layer up — the Registry adapter (spec
//! §3.1).

use mcp_schema::FieldDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperKind {
    Tool,
    Prompt,
    Resource,
}

#[derive(Debug, Clone)]
pub struct ToolDecl {
    pub name: String,
    pub struct_name: String,
    pub description: Option<String>,
    pub params: Vec<FieldDescriptor>,
    pub result: Vec<FieldDescriptor>,
    pub hidden: bool,
}

#[derive(Debug, Clone)]
pub struct PromptDecl {
    pub name: String,
    pub struct_name: String,
    pub description: Option<String>,
    pub args: Vec<FieldDescriptor>,
    pub body: PromptBody,
    pub hidden: bool,
}

#[derive(Debug, Clone)]
pub enum PromptBody {
    /// Literal `template` string.
    Template(String),
    /// `dynamic: true` marker — bound to a method implementation.
    Dynamic,
}

#[derive(Debug, Clone)]
pub struct ResourceDecl {
    pub uri: String,
    pub struct_name: String,
    pub name: String,
    pub description: Option<String>,
    pub mime_type: Option<String>,
    pub body: ResourceBody,
    pub hidden: bool,
}

#[derive(Debug, Clone)]
pub enum ResourceBody {
    /// Literal `data`/`value`.
    Literal(String),
    /// Absent member, or explicit `dynamic: true` — bound to a method.
    Dynamic,
}

#[derive(Debug, Clone)]
pub struct SkillDecl {
    pub name: String,
    pub description: Option<String>,
    pub tool_names: Vec<String>,
    pub resource_uris: Vec<String>,
    pub prompt_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RouterDecl {
    pub name: String,
    pub description: Option<String>,
    pub tool_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AuthDecl {
    pub keys: Vec<String>,
    pub clients: Vec<String>,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ServerDecl {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub auth: Option<AuthDecl>,
    pub struct_name: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Declaration {
    Tool(ToolDecl),
    Prompt(PromptDecl),
    Resource(ResourceDecl),
    Skill(SkillDecl),
    Router(RouterDecl),
    Server(ServerDecl),
}

/// A binding from a handler to a declaration (spec §3.1 `Implementation`).
#[derive(Debug, Clone)]
pub struct Implementation {
    pub name: String,
    pub interface_name: String,
    pub helper_type: HelperKind,
    pub kind: ImplementationKind,
    pub class_name: Option<String>,
    pub is_bare_interface: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplementationKind {
    Const,
    ClassProperty,
}

/// A top-level `StructName::new(...)` call, or a struct auto-resolved as
/// instantiated under the Rust relaxation of `export default class`
/// (DESIGN.md decision #4).
#[derive(Debug, Clone)]
pub struct StructInstance {
    pub instance_name: String,
    pub struct_name: String,
    pub auto: bool,
}

#[derive(Debug, Default)]
pub struct ParseResult {
    pub server: Option<ServerDecl>,
    pub tools: Vec<ToolDecl>,
    pub prompts: Vec<PromptDecl>,
    pub resources: Vec<ResourceDecl>,
    pub skills: Vec<SkillDecl>,
    pub routers: Vec<RouterDecl>,
    pub implementations: Vec<Implementation>,
    pub instances: Vec<StructInstance>,
    pub validation_errors: Vec<String>,
}

impl ParseResult {
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name.clone()).collect()
    }
    pub fn prompt_names(&self) -> Vec<String> {
        self.prompts.iter().map(|p| p.name.clone()).collect()
    }
    pub fn resource_uris(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.uri.clone()).collect()
    }
}

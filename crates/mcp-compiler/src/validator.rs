//! Validator & Linker (spec §4.4): cross-checks declarations against
//! discovered implementations and instances, producing diagnostics. Each
//! rule's message offers both fix-it forms (bare-interface method, or a
//! `*Helper<T>` wrapper binding) since either is an equally valid fix.

use std::collections::HashSet;

use crate::model::{Declaration, HelperKind, Implementation, ParseResult, StructInstance};

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub bare_fix: String,
    pub wrapper_fix: String,
}

impl Diagnostic {
    fn new(message: impl Into<String>, bare_fix: impl Into<String>, wrapper_fix: impl Into<String>) -> Self {
        Self { message: message.into(), bare_fix: bare_fix.into(), wrapper_fix: wrapper_fix.into() }
    }
}

/// Runs all 6 rules and returns every diagnostic found (does not short
/// circuit on the first failure — an author fixing a whole file wants
/// the full list in one pass).
pub fn validate(result: &ParseResult) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    diagnostics.extend(rule_completeness(result));
    diagnostics.extend(rule_implementation_references_known_interface(result));
    diagnostics.extend(rule_instantiation_required(result));
    diagnostics.extend(rule_unique_names(result));
    diagnostics.extend(rule_skill_references_resolve(result));
    diagnostics.extend(rule_ui_resource_constraint(result));
    diagnostics
}

/// Rule 1 — completeness: every declared tool/prompt (resources may be
/// purely literal) has a bound implementation somewhere, bare or wrapped.
fn rule_completeness(result: &ParseResult) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for tool in &result.tools {
        if !has_implementation(&result.implementations, &tool.struct_name, HelperKind::Tool) {
            diagnostics.push(Diagnostic::new(
                format!("tool `{}` has no bound implementation", tool.name),
                format!("impl {} {{ async fn execute(&self) -> ... {{ .. }} }}", tool.struct_name),
                format!(
                    "const {}_IMPL: ToolHelper<{}> = ToolHelper::new(..);",
                    tool.struct_name.to_uppercase(),
                    tool.struct_name
                ),
            ));
        }
    }

    for prompt in &result.prompts {
        let is_template = matches!(prompt.body, crate::model::PromptBody::Template(_));
        if is_template {
            continue;
        }
        if !has_implementation(&result.implementations, &prompt.struct_name, HelperKind::Prompt) {
            diagnostics.push(Diagnostic::new(
                format!("dynamic prompt `{}` has no bound implementation", prompt.name),
                format!("impl {} {{ async fn render(&self) -> ... {{ .. }} }}", prompt.struct_name),
                format!(
                    "const {}_IMPL: PromptHelper<{}> = PromptHelper::new(..);",
                    prompt.struct_name.to_uppercase(),
                    prompt.struct_name
                ),
            ));
        }
    }

    for resource in &result.resources {
        let is_literal = matches!(resource.body, crate::model::ResourceBody::Literal(_));
        if is_literal {
            continue;
        }
        if !has_implementation(&result.implementations, &resource.struct_name, HelperKind::Resource) {
            diagnostics.push(Diagnostic::new(
                format!("dynamic resource `{}` has no bound implementation", resource.uri),
                format!("impl {} {{ async fn read(&self) -> ... {{ .. }} }}", resource.struct_name),
                format!(
                    "const {}_IMPL: ResourceHelper<{}> = ResourceHelper::new(..);",
                    resource.struct_name.to_uppercase(),
                    resource.struct_name
                ),
            ));
        }
    }

    diagnostics
}

fn has_implementation(implementations: &[Implementation], struct_name: &str, kind: HelperKind) -> bool {
    implementations.iter().any(|i| i.interface_name == struct_name && i.helper_type == kind)
}

/// Rule 2 — every implementation's `interface_name` names a declaration
/// that was actually parsed; an implementation pointing at an unknown
/// struct is almost always a typo.
fn rule_implementation_references_known_interface(result: &ParseResult) -> Vec<Diagnostic> {
    let known: HashSet<&str> = result
        .tools
        .iter()
        .map(|t| t.struct_name.as_str())
        .chain(result.prompts.iter().map(|p| p.struct_name.as_str()))
        .chain(result.resources.iter().map(|r| r.struct_name.as_str()))
        .collect();

    result
        .implementations
        .iter()
        .filter(|implementation| !known.contains(implementation.interface_name.as_str()))
        .map(|implementation| {
            Diagnostic::new(
                format!(
                    "implementation `{}` references unknown interface `{}`",
                    implementation.name, implementation.interface_name
                ),
                format!("#[derive(Tool)] struct {} {{ .. }}", implementation.interface_name),
                format!("#[tool(..)] struct {} {{ .. }}", implementation.interface_name),
            )
        })
        .collect()
}

/// Rule 3 — a declared server struct must be instantiated somewhere
/// (explicit `StructName::new(...)` or the Rust unit-struct
/// auto-instantiation relaxation), or registration never happens.
fn rule_instantiation_required(result: &ParseResult) -> Vec<Diagnostic> {
    let Some(server) = &result.server else { return Vec::new() };
    let Some(struct_name) = &server.struct_name else { return Vec::new() };

    let instantiated = result.instances.iter().any(|i| &i.struct_name == struct_name);
    if instantiated {
        return Vec::new();
    }

    vec![Diagnostic::new(
        format!("server `{struct_name}` is declared but never instantiated"),
        format!("let server = {struct_name}::new(..);"),
        format!("#[mcp_server(..)]\nstruct {struct_name}; // unit struct auto-instantiates"),
    )]
}

/// Rule 4 — tool names, prompt names, and resource URIs must each be
/// unique within their own namespace.
fn rule_unique_names(result: &ParseResult) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    diagnostics.extend(duplicates(result.tools.iter().map(|t| t.name.as_str()), "tool name"));
    diagnostics.extend(duplicates(result.prompts.iter().map(|p| p.name.as_str()), "prompt name"));
    diagnostics.extend(duplicates(result.resources.iter().map(|r| r.uri.as_str()), "resource uri"));
    diagnostics
}

fn duplicates<'a>(names: impl Iterator<Item = &'a str>, label: &str) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    let mut dupes = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            dupes.insert(name);
        }
    }
    dupes
        .into_iter()
        .map(|name| {
            Diagnostic::new(
                format!("duplicate {label} `{name}`"),
                format!("rename one of the conflicting `{name}` declarations"),
                format!("or mount one under a router alias: #[router(tools = [\"{name}\"])]"),
            )
        })
        .collect()
}

/// Rule 5 — a skill's bundled tool/resource/prompt names must each
/// resolve to an actual declaration.
fn rule_skill_references_resolve(result: &ParseResult) -> Vec<Diagnostic> {
    let tool_names: HashSet<&str> = result.tools.iter().map(|t| t.name.as_str()).collect();
    let resource_uris: HashSet<&str> = result.resources.iter().map(|r| r.uri.as_str()).collect();
    let prompt_names: HashSet<&str> = result.prompts.iter().map(|p| p.name.as_str()).collect();

    let mut diagnostics = Vec::new();
    for skill in &result.skills {
        for tool_name in &skill.tool_names {
            if !tool_names.contains(tool_name.as_str()) {
                diagnostics.push(Diagnostic::new(
                    format!("skill `{}` bundles unknown tool `{}`", skill.name, tool_name),
                    format!("declare a tool named `{tool_name}`"),
                    format!("or remove `{tool_name}` from #[skill(tools = [..])]"),
                ));
            }
        }
        for resource_uri in &skill.resource_uris {
            if !resource_uris.contains(resource_uri.as_str()) {
                diagnostics.push(Diagnostic::new(
                    format!("skill `{}` bundles unknown resource `{}`", skill.name, resource_uri),
                    format!("declare a resource with uri `{resource_uri}`"),
                    format!("or remove `{resource_uri}` from #[skill(resources = [..])]"),
                ));
            }
        }
        for prompt_name in &skill.prompt_names {
            if !prompt_names.contains(prompt_name.as_str()) {
                diagnostics.push(Diagnostic::new(
                    format!("skill `{}` bundles unknown prompt `{}`", skill.name, prompt_name),
                    format!("declare a prompt named `{prompt_name}`"),
                    format!("or remove `{prompt_name}` from #[skill(prompts = [..])]"),
                ));
            }
        }
    }
    diagnostics
}

/// Rule 6 — a `ui://` resource URI must declare a UI mime type (spec
/// §3.4's UI-resource constraint), mirrored here at the linking stage so
/// the author sees it before the server ever tries to serve the resource.
fn rule_ui_resource_constraint(result: &ParseResult) -> Vec<Diagnostic> {
    result
        .resources
        .iter()
        .filter(|r| r.uri.starts_with("ui://"))
        .filter(|r| !matches!(r.mime_type.as_deref(), Some(mime) if mcp_protocol::UI_MIME_TYPES.contains(&mime)))
        .map(|r| {
            Diagnostic::new(
                format!("ui:// resource `{}` is missing a ui-compatible mime type", r.uri),
                format!("#[resource(uri = \"{}\", mime_type = \"text/html\")]", r.uri),
                format!("#[resource(uri = \"{}\", mime_type = \"application/vnd.mcp-ui+html\")]", r.uri),
            )
        })
        .collect()
}

/// Links an already-parsed+discovered [`ParseResult`] in place, filling
/// `validation_errors` with every diagnostic's message — the form the
/// Registry adapter (spec §3.1) consumes to refuse a broken build.
pub fn link(result: &mut ParseResult, instances: Vec<StructInstance>, implementations: Vec<Implementation>) {
    result.instances = instances;
    result.implementations = implementations;
    let diagnostics = validate(result);
    result.validation_errors = diagnostics.into_iter().map(|d| d.message).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Declaration, ParseResult};
    use crate::parser::parse_source;

    fn compile(source: &str) -> ParseResult {
        let file = syn::parse_file(source).unwrap();
        let decls = parse_source(source).unwrap();
        let (implementations, instances) = crate::discoverer::discover(&file);
        let mut result = ParseResult::default();
        for decl in decls {
            match decl {
                Declaration::Tool(t) => result.tools.push(t),
                Declaration::Prompt(p) => result.prompts.push(p),
                Declaration::Resource(r) => result.resources.push(r),
                Declaration::Skill(s) => result.skills.push(s),
                Declaration::Router(r) => result.routers.push(r),
                Declaration::Server(s) => result.server = Some(s),
            }
        }
        link(&mut result, instances, implementations);
        result
    }

    #[test]
    fn tool_missing_implementation_is_flagged() {
        let result = compile(
            r#"
            #[derive(Tool)]
            #[tool(name = "add")]
            struct AddTool { a: f64, b: f64 }
        "#,
        );
        assert!(result.validation_errors.iter().any(|e| e.contains("no bound implementation")));
    }

    #[test]
    fn tool_with_bare_execute_passes() {
        let result = compile(
            r#"
            #[derive(Tool)]
            #[tool(name = "add")]
            struct AddTool { a: f64, b: f64 }

            impl AddTool {
                async fn execute(&self) -> f64 { self.a + self.b }
            }
        "#,
        );
        assert!(result.validation_errors.is_empty());
    }

    #[test]
    fn duplicate_tool_names_are_flagged() {
        let result = compile(
            r#"
            #[derive(Tool)]
            #[tool(name = "add")]
            struct AddTool { a: f64 }

            impl AddTool { async fn execute(&self) -> f64 { self.a } }

            #[derive(Tool)]
            #[tool(name = "add")]
            struct AddTool2 { a: f64 }

            impl AddTool2 { async fn execute(&self) -> f64 { self.a } }
        "#,
        );
        assert!(result.validation_errors.iter().any(|e| e.contains("duplicate tool name")));
    }

    #[test]
    fn skill_bundling_unknown_tool_is_flagged() {
        let result = compile(
            r#"
            #[derive(Skill)]
            #[skill(name = "bundle", tools = ["missing_tool"])]
            struct BundleSkill;
        "#,
        );
        assert!(result.validation_errors.iter().any(|e| e.contains("unknown tool")));
    }

    #[test]
    fn ui_resource_without_ui_mime_is_flagged() {
        let result = compile(
            r#"
            #[derive(Resource)]
            #[resource(uri = "ui://dashboard", data = "<html></html>", mime_type = "text/plain")]
            struct DashboardResource;
        "#,
        );
        assert!(result.validation_errors.iter().any(|e| e.contains("ui-compatible mime type")));
    }

    #[test]
    fn unknown_server_instance_never_flags_when_server_absent() {
        let result = compile(
            r#"
            #[derive(Tool)]
            #[tool(name = "add")]
            struct AddTool { a: f64 }

            impl AddTool { async fn execute(&self) -> f64 { self.a } }
        "#,
        );
        assert!(!result.validation_errors.iter().any(|e| e.contains("never instantiated")));
    }
}

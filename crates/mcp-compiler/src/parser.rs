//! Source Parser (spec §4.2): walks a parsed Rust source file and
//! recognizes annotated struct declarations as tool/prompt/resource/
//! skill/router/server declarations, extracting their literal values
//! and field-type structure.

use syn::{Item, ItemStruct};

use crate::attrs::{doc_comment, find_attr_args, has_attr, has_derive};
use crate::model::{
    AuthDecl, Declaration, PromptBody, PromptDecl, ResourceBody, ResourceDecl, RouterDecl, ServerDecl, SkillDecl, ToolDecl,
};
use crate::types::{build_struct_table, struct_fields_to_descriptors, StructTable};

/// Parse Rust source text into the raw declarations the Implementation
/// Discoverer and Validator & Linker then process. Does not fail on
/// unparseable input beyond returning the underlying `syn` error —
/// matching the spec's "caller supplies a path or source text" framing.
pub fn parse_source(source: &str) -> syn::Result<Vec<Declaration>> {
    let file = syn::parse_file(source)?;
    Ok(parse_file(&file))
}

pub fn parse_file(file: &syn::File) -> Vec<Declaration> {
    let table = build_struct_table(&file.items);
    let mut decls = Vec::new();
    for item in &file.items {
        if let Item::Struct(s) = item {
            if let Some(decl) = parse_struct(s, &table) {
                decls.push(decl);
            }
        }
    }
    decls
}

fn parse_struct(s: &ItemStruct, table: &StructTable) -> Option<Declaration> {
    let name = s.ident.to_string();

    if has_derive(&s.attrs, "Tool") || has_attr(&s.attrs, "tool") {
        return Some(Declaration::Tool(parse_tool(s, &name, table)));
    }
    if has_derive(&s.attrs, "Prompt") || has_attr(&s.attrs, "prompt") {
        return Some(Declaration::Prompt(parse_prompt(s, &name, table)));
    }
    if has_derive(&s.attrs, "Resource") || has_attr(&s.attrs, "resource") {
        return Some(Declaration::Resource(parse_resource(s, &name)));
    }
    if has_derive(&s.attrs, "Router") || has_attr(&s.attrs, "router") {
        return Some(Declaration::Router(parse_router(s, &name)));
    }
    if has_derive(&s.attrs, "Skill") || has_attr(&s.attrs, "skill") {
        return Some(Declaration::Skill(parse_skill(s, &name)));
    }
    if has_attr(&s.attrs, "mcp_server") {
        return Some(Declaration::Server(parse_server(s, &name)));
    }
    None
}

fn kebab_case(struct_name: &str) -> String {
    let mut out = String::new();
    for (i, ch) in struct_name.chars().enumerate() {
        if ch.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn parse_tool(s: &ItemStruct, struct_name: &str, table: &StructTable) -> ToolDecl {
    let attr = find_attr_args(&s.attrs, "tool").unwrap_or_default();
    let name = attr.string("name").map(String::from).unwrap_or_else(|| kebab_case(struct_name));
    let description = attr.string("description").map(String::from).or_else(|| doc_comment(&s.attrs));
    let params = struct_fields_to_descriptors(s, table);
    let result = attr
        .string("result")
        .and_then(|result_name| table.get(result_name))
        .map(|result_struct| struct_fields_to_descriptors(result_struct, table))
        .unwrap_or_default();
    let hidden = attr.bool_flag("hidden") || has_attr(&s.attrs, "hidden");

    ToolDecl { name, struct_name: struct_name.to_string(), description, params, result, hidden }
}

fn parse_prompt(s: &ItemStruct, struct_name: &str, table: &StructTable) -> PromptDecl {
    let attr = find_attr_args(&s.attrs, "prompt").unwrap_or_default();
    let name = attr.string("name").map(String::from).unwrap_or_else(|| kebab_case(struct_name));
    let description = attr.string("description").map(String::from).or_else(|| doc_comment(&s.attrs));
    let args = struct_fields_to_descriptors(s, table);
    let body = if attr.bool_flag("dynamic") {
        PromptBody::Dynamic
    } else if let Some(template) = attr.string("template") {
        PromptBody::Template(template.to_string())
    } else {
        PromptBody::Dynamic
    };
    let hidden = attr.bool_flag("hidden") || has_attr(&s.attrs, "hidden");

    PromptDecl { name, struct_name: struct_name.to_string(), description, args, body, hidden }
}

fn parse_resource(s: &ItemStruct, struct_name: &str) -> ResourceDecl {
    let attr = find_attr_args(&s.attrs, "resource").unwrap_or_default();
    let uri = attr.string("uri").map(String::from).unwrap_or_default();
    let name = attr.string("name").map(String::from).unwrap_or_else(|| kebab_case(struct_name));
    let description = attr.string("description").map(String::from).or_else(|| doc_comment(&s.attrs));
    let mime_type = attr.string("mime_type").map(String::from);
    let body = if attr.bool_flag("dynamic") {
        ResourceBody::Dynamic
    } else if let Some(data) = attr.string("data").or_else(|| attr.string("value")) {
        ResourceBody::Literal(data.to_string())
    } else {
        ResourceBody::Dynamic
    };
    let hidden = attr.bool_flag("hidden") || has_attr(&s.attrs, "hidden");

    ResourceDecl { uri, struct_name: struct_name.to_string(), name, description, mime_type, body, hidden }
}

fn parse_router(s: &ItemStruct, struct_name: &str) -> RouterDecl {
    let attr = find_attr_args(&s.attrs, "router").unwrap_or_default();
    let name = attr.string("name").map(String::from).unwrap_or_else(|| kebab_case(struct_name));
    let description = attr.string("description").map(String::from).or_else(|| doc_comment(&s.attrs));
    RouterDecl { name, description, tool_names: attr.list("tools") }
}

fn parse_skill(s: &ItemStruct, struct_name: &str) -> SkillDecl {
    let attr = find_attr_args(&s.attrs, "skill").unwrap_or_default();
    let name = attr.string("name").map(String::from).unwrap_or_else(|| kebab_case(struct_name));
    let description = attr.string("description").map(String::from).or_else(|| doc_comment(&s.attrs));
    SkillDecl {
        name,
        description,
        tool_names: attr.list("tools"),
        resource_uris: attr.list("resources"),
        prompt_names: attr.list("prompts"),
    }
}

fn parse_server(s: &ItemStruct, struct_name: &str) -> ServerDecl {
    let attr = find_attr_args(&s.attrs, "mcp_server").unwrap_or_default();
    let name = attr.string("name").map(String::from).unwrap_or_else(|| kebab_case(struct_name));
    let version = attr.string("version").map(String::from).unwrap_or_else(|| "1.0.0".to_string());
    let description = attr.string("description").map(String::from).or_else(|| doc_comment(&s.attrs));
    let auth = find_attr_args(&s.attrs, "auth").map(|auth_attr| AuthDecl {
        keys: auth_attr.list("keys"),
        clients: auth_attr.list("clients"),
        permissions: auth_attr.list("permissions"),
    });
    ServerDecl { name, version, description, auth, struct_name: Some(struct_name.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_struct_with_params_scenario_s1() {
        let source = r#"
            #[derive(Tool)]
            #[tool(name = "add", description = "Add two numbers")]
            struct AddTool {
                a: f64,
                b: f64,
            }
        "#;
        let decls = parse_source(source).unwrap();
        assert_eq!(decls.len(), 1);
        let Declaration::Tool(tool) = &decls[0] else { panic!("expected tool decl") };
        assert_eq!(tool.name, "add");
        assert_eq!(tool.params.len(), 2);
    }

    #[test]
    fn missing_name_defaults_to_kebab_case() {
        let source = r#"
            #[derive(Tool)]
            #[tool(description = "no explicit name")]
            struct WeatherForecastTool {
                location: String,
            }
        "#;
        let decls = parse_source(source).unwrap();
        let Declaration::Tool(tool) = &decls[0] else { panic!("expected tool decl") };
        assert_eq!(tool.name, "weather_forecast_tool");
    }

    #[test]
    fn parses_static_prompt_template_scenario_s4() {
        let source = r#"
            #[derive(Prompt)]
            #[prompt(name = "weather_report", template = "Generate a {style} weather report for {location}.")]
            struct WeatherReportPrompt {
                location: String,
                style: String,
            }
        "#;
        let decls = parse_source(source).unwrap();
        let Declaration::Prompt(prompt) = &decls[0] else { panic!("expected prompt decl") };
        assert!(matches!(&prompt.body, PromptBody::Template(t) if t.contains("{location}")));
    }

    #[test]
    fn parses_skill_bundle_scenario_s5() {
        let source = r#"
            #[derive(Skill)]
            #[skill(name = "weather_analysis", tools = ["get_weather", "get_forecast", "analyze_climate"], resources = ["weather://current", "weather://historical"])]
            struct WeatherAnalysisSkill;
        "#;
        let decls = parse_source(source).unwrap();
        let Declaration::Skill(skill) = &decls[0] else { panic!("expected skill decl") };
        assert_eq!(skill.tool_names.len(), 3);
        assert_eq!(skill.resource_uris.len(), 2);
    }

    #[test]
    fn nested_object_field_resolves_recursively() {
        let source = r#"
            struct Coordinates {
                lat: f64,
                lng: f64,
            }

            #[derive(Tool)]
            #[tool(name = "geocode")]
            struct GeocodeTool {
                location: Coordinates,
            }
        "#;
        let decls = parse_source(source).unwrap();
        let Declaration::Tool(tool) = &decls[0] else { panic!("expected tool decl") };
        assert_eq!(tool.params.len(), 1);
        assert!(matches!(tool.params[0].ty, mcp_schema::TypeDescriptor::Object(_)));
    }
}

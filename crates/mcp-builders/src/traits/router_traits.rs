//! Router metadata: a named group of tools surfaced as one parent tool,
//! with namespaced `router__tool` aliases available when
//! `flattenRouters=false` (spec §3.1, §9 Open Questions).

#[derive(Debug, Clone)]
pub struct RouterDefinition {
    pub name: String,
    pub description: Option<String>,
    pub tool_names: Vec<String>,
}

impl RouterDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: None, tool_names: Vec::new() }
    }

    pub fn namespaced_alias(&self, tool_name: &str) -> String {
        format!("{}__{}", self.name, tool_name)
    }
}

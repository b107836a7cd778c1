//! Registry (spec §3.1, §4.5): the runtime home for every declared
//! tool/prompt/resource/router/skill, in declaration order. Grounded on
//! the teacher's `McpServerBuilder`/`McpServer` field layout (`HashMap<
//! String, Arc<dyn McpTool>>`) but keeps insertion order, since
//! `tools/list` results should read the way the author declared them.

use std::collections::HashMap;
use std::sync::Arc;

use mcp_builders::prelude::*;
use mcp_protocol::{McpError, McpResult, Prompt, Resource, Tool};

/// Ordered, name-indexed collection. A plain `Vec` would make lookup
/// O(n); a plain `HashMap` loses declaration order — this keeps both.
struct OrderedMap<T> {
    order: Vec<String>,
    items: HashMap<String, Arc<T>>,
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self { order: Vec::new(), items: HashMap::new() }
    }
}

impl<T> OrderedMap<T> {
    fn insert(&mut self, key: String, value: Arc<T>) {
        if !self.items.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.items.insert(key, value);
    }

    fn get(&self, key: &str) -> Option<&Arc<T>> {
        self.items.get(key)
    }

    fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.order.iter().filter_map(move |key| self.items.get(key))
    }

    fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }
}

/// Runtime handle to every registered entity. Cheap to clone — intended
/// to be shared behind an `Arc` by every transport a server exposes.
#[derive(Default)]
pub struct Registry {
    tools: OrderedMap<BuiltTool>,
    prompts: OrderedMap<BuiltPrompt>,
    resources: OrderedMap<BuiltResource>,
    routers: Vec<RouterDefinition>,
    skills: Vec<SkillDefinition>,
    /// Names/uris forced hidden by skill membership (spec §3.2): hidden
    /// regardless of how the item itself was declared.
    forced_hidden_tools: std::collections::HashSet<String>,
    forced_hidden_resources: std::collections::HashSet<String>,
    forced_hidden_prompts: std::collections::HashSet<String>,
    /// Set once a transport attaches (spec §3.2/§3.3): every `add_*`
    /// call after this rejects with `McpError::Lifecycle` instead of
    /// silently mutating a registry a running transport may be reading.
    started: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freezes the registry against further mutation. Transports call
    /// this exactly once, right before attaching their request handlers
    /// (spec §3.3 "Registry entries are created pre-start, immutable
    /// after start").
    pub fn mark_started(&mut self) {
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn check_mutable(&self, kind: &str, name: &str) -> McpResult<()> {
        if self.started {
            return Err(McpError::Lifecycle(format!(
                "cannot register {kind} '{name}': server has already started"
            )));
        }
        Ok(())
    }

    pub fn add_tool(&mut self, tool: BuiltTool) -> McpResult<&mut Self> {
        self.check_mutable("tool", tool.name())?;
        if self.tools.contains(tool.name()) {
            return Err(McpError::Lifecycle(format!(
                "duplicate tool name '{}': rename one of the two declarations",
                tool.name()
            )));
        }
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
        Ok(self)
    }

    pub fn add_prompt(&mut self, prompt: BuiltPrompt) -> McpResult<&mut Self> {
        self.check_mutable("prompt", prompt.name())?;
        if self.prompts.contains(prompt.name()) {
            return Err(McpError::Lifecycle(format!(
                "duplicate prompt name '{}': rename one of the two declarations",
                prompt.name()
            )));
        }
        self.prompts.insert(prompt.name().to_string(), Arc::new(prompt));
        Ok(self)
    }

    pub fn add_resource(&mut self, resource: BuiltResource) -> McpResult<&mut Self> {
        self.check_mutable("resource", resource.uri())?;
        if self.resources.contains(resource.uri()) {
            return Err(McpError::Lifecycle(format!(
                "duplicate resource uri '{}': rename one of the two declarations",
                resource.uri()
            )));
        }
        self.resources.insert(resource.uri().to_string(), Arc::new(resource));
        Ok(self)
    }

    /// Registers a router and namespaces any tool name collisions
    /// (spec §9 Open Question, resolved in DESIGN.md decision #1: both
    /// the bare and namespaced alias are listed when `flattenRouters`
    /// is true).
    pub fn add_router(&mut self, router: RouterDefinition) -> McpResult<&mut Self> {
        self.check_mutable("router", &router.name)?;
        self.routers.push(router);
        Ok(self)
    }

    /// Registers a skill and hides its bundled members — hidden items
    /// stay fully executable; they are only excluded from `*/list`
    /// (spec §4.5, scenario S5).
    pub fn add_skill(&mut self, skill: SkillDefinition) -> McpResult<&mut Self> {
        self.check_mutable("skill", &skill.name)?;
        for tool_name in &skill.tool_names {
            self.forced_hidden_tools.insert(tool_name.clone());
        }
        for resource_uri in &skill.resource_uris {
            self.forced_hidden_resources.insert(resource_uri.clone());
        }
        for prompt_name in &skill.prompt_names {
            self.forced_hidden_prompts.insert(prompt_name.clone());
        }
        self.skills.push(skill);
        Ok(self)
    }

    pub fn get_tool(&self, name: &str) -> Option<Arc<BuiltTool>> {
        self.tools.get(name).cloned()
    }

    pub fn get_prompt(&self, name: &str) -> Option<Arc<BuiltPrompt>> {
        self.prompts.get(name).cloned()
    }

    pub fn get_resource(&self, uri: &str) -> Option<Arc<BuiltResource>> {
        self.resources.get(uri).cloned()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.order.clone()
    }

    pub fn prompt_names(&self) -> Vec<String> {
        self.prompts.order.clone()
    }

    pub fn resource_uris(&self) -> Vec<String> {
        self.resources.order.clone()
    }

    /// Resolves `skill://<name>` reads — not stored in the resource map
    /// itself since its body is generated from the skill's own state,
    /// not a literal or handler (spec §3.1).
    pub fn skill_markdown(&self, uri: &str) -> Option<String> {
        self.skills.iter().find(|s| s.resource_uri() == uri).map(|s| s.render_markdown())
    }

    pub fn skills(&self) -> &[SkillDefinition] {
        &self.skills
    }

    pub fn routers(&self) -> &[RouterDefinition] {
        &self.routers
    }

    /// `tools/list` (spec §4.6 "List filtering"): excludes anything
    /// explicitly hidden or hidden by skill membership. Router member
    /// tools are additionally exposed again under their namespaced
    /// alias so both names resolve (DESIGN.md decision #1).
    pub fn list_tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self
            .tools
            .iter()
            .filter(|t| !t.hidden() && !self.forced_hidden_tools.contains(t.name()))
            .map(|t| t.to_tool())
            .collect();

        for router in &self.routers {
            for tool_name in &router.tool_names {
                if let Some(tool) = self.tools.get(tool_name) {
                    if self.forced_hidden_tools.contains(tool_name) {
                        continue;
                    }
                    let mut aliased = tool.to_tool();
                    aliased.name = router.namespaced_alias(tool_name);
                    tools.push(aliased);
                }
            }
        }

        tools
    }

    pub fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .filter(|p| !p.hidden() && !self.forced_hidden_prompts.contains(p.name()))
            .map(|p| Prompt {
                name: p.name().to_string(),
                description: p.description().map(String::from),
                arguments: {
                    let args = p.arguments();
                    if args.is_empty() {
                        None
                    } else {
                        Some(args)
                    }
                },
            })
            .collect()
    }

    /// `resources/list`: static/dynamic resources plus each registered
    /// skill's own `skill://` bundle resource, which is never itself
    /// hidden even though everything it bundles is (scenario S5).
    pub fn list_resources(&self) -> Vec<Resource> {
        let mut resources: Vec<Resource> = self
            .resources
            .iter()
            .filter(|r| !r.hidden() && !self.forced_hidden_resources.contains(r.uri()))
            .map(|r| Resource {
                uri: r.uri().to_string(),
                name: r.name().to_string(),
                description: r.description().map(String::from),
                mime_type: r.mime_type().map(String::from),
            })
            .collect();

        for skill in &self.skills {
            resources.push(Resource {
                uri: skill.resource_uri(),
                name: skill.name.clone(),
                description: skill.description.clone(),
                mime_type: Some("text/markdown".to_string()),
            });
        }
        resources
    }

    pub fn tool_exists(&self, name: &str) -> bool {
        self.tools.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_builders::{PromptBuilder, ResourceBuilder, SkillBuilder, ToolBuilder};

    fn sample_tool(name: &str) -> BuiltTool {
        ToolBuilder::new(name)
            .execute(|_args| async move { Ok(mcp_protocol::CallToolResult::success(vec![])) })
            .build()
    }

    #[test]
    fn hidden_tool_is_excluded_from_list_but_still_gettable() {
        let mut registry = Registry::new();
        registry
            .add_tool(
                ToolBuilder::new("secret")
                    .hidden()
                    .execute(|_| async move { Ok(mcp_protocol::CallToolResult::success(vec![])) })
                    .build(),
            )
            .unwrap();
        assert!(registry.list_tools().is_empty());
        assert!(registry.get_tool("secret").is_some());
    }

    #[test]
    fn skill_bundle_hides_members_scenario_s5() {
        let mut registry = Registry::new();
        for name in ["get_weather", "get_forecast", "analyze_climate"] {
            registry.add_tool(sample_tool(name)).unwrap();
        }
        registry
            .add_resource(
                ResourceBuilder::new("weather://current", "Current").literal(serde_json::json!({"temp": 72})).build().unwrap(),
            )
            .unwrap();
        registry
            .add_resource(
                ResourceBuilder::new("weather://historical", "Historical")
                    .literal(serde_json::json!({"temp": 70}))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        registry
            .add_skill(
                SkillBuilder::new("weather_analysis")
                    .tool("get_weather")
                    .tool("get_forecast")
                    .tool("analyze_climate")
                    .resource("weather://current")
                    .resource("weather://historical")
                    .build(),
            )
            .unwrap();

        assert!(registry.list_tools().is_empty());
        let resources = registry.list_resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].uri, "skill://weather_analysis");
        assert!(registry.get_tool("get_weather").is_some());
    }

    #[test]
    fn prompt_without_arguments_lists_with_none() {
        let mut registry = Registry::new();
        registry.add_prompt(PromptBuilder::new("greet").template("Hello {name}!").build()).unwrap();
        let prompts = registry.list_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].arguments.is_none());
    }

    #[test]
    fn mutation_after_start_is_a_lifecycle_error() {
        let mut registry = Registry::new();
        registry.add_tool(sample_tool("before")).unwrap();
        registry.mark_started();
        let err = registry.add_tool(sample_tool("after")).unwrap_err();
        assert!(matches!(err, mcp_protocol::McpError::Lifecycle(_)));
        assert!(registry.get_tool("before").is_some());
        assert!(registry.get_tool("after").is_none());
    }

    #[test]
    fn duplicate_tool_name_is_rejected() {
        let mut registry = Registry::new();
        registry.add_tool(sample_tool("add")).unwrap();
        let err = registry.add_tool(sample_tool("add")).unwrap_err();
        assert!(matches!(err, mcp_protocol::McpError::Lifecycle(_)));
    }
}

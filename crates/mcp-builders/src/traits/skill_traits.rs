//! Skill metadata: a bundle of tools/resources/prompts surfaced as one
//! discoverable resource (`skill://<name>`) whose members are forcibly
//! hidden (spec §3.1, §3.2, scenario S5).

#[derive(Debug, Clone)]
pub struct SkillDefinition {
    pub name: String,
    pub description: Option<String>,
    pub tool_names: Vec<String>,
    pub resource_uris: Vec<String>,
    pub prompt_names: Vec<String>,
}

impl SkillDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tool_names: Vec::new(),
            resource_uris: Vec::new(),
            prompt_names: Vec::new(),
        }
    }

    pub fn resource_uri(&self) -> String {
        format!("skill://{}", self.name)
    }

    /// Generate the Markdown body documenting the bundled items, served
    /// as the skill's single resource (spec §3.1).
    pub fn render_markdown(&self) -> String {
        let mut out = format!("# {}\n", self.name);
        if let Some(description) = &self.description {
            out.push_str(description);
            out.push_str("\n\n");
        }
        if !self.tool_names.is_empty() {
            out.push_str("## Tools\n");
            for tool in &self.tool_names {
                out.push_str(&format!("- `{tool}`\n"));
            }
            out.push('\n');
        }
        if !self.resource_uris.is_empty() {
            out.push_str("## Resources\n");
            for uri in &self.resource_uris {
                out.push_str(&format!("- `{uri}`\n"));
            }
            out.push('\n');
        }
        if !self.prompt_names.is_empty() {
            out.push_str("## Prompts\n");
            for prompt in &self.prompt_names {
                out.push_str(&format!("- `{prompt}`\n"));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_names_all_bundled_items() {
        let mut skill = SkillDefinition::new("weather_analysis");
        skill.description = Some("Bundles weather tools and resources".into());
        skill.tool_names = vec!["get_weather".into(), "get_forecast".into(), "analyze_climate".into()];
        skill.resource_uris = vec!["weather://current".into(), "weather://historical".into()];

        let markdown = skill.render_markdown();
        for name in ["get_weather", "get_forecast", "analyze_climate", "weather://current", "weather://historical"] {
            assert!(markdown.contains(name), "markdown missing {name}:\n{markdown}");
        }
    }

    #[test]
    fn resource_uri_uses_skill_scheme() {
        let skill = SkillDefinition::new("weather_analysis");
        assert_eq!(skill.resource_uri(), "skill://weather_analysis");
    }
}

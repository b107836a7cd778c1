//! Skill builder — thin wrapper over [`SkillDefinition`].

use crate::traits::SkillDefinition;

pub struct SkillBuilder {
    inner: SkillDefinition,
}

impl SkillBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { inner: SkillDefinition::new(name) }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    pub fn tool(mut self, name: impl Into<String>) -> Self {
        self.inner.tool_names.push(name.into());
        self
    }

    pub fn resource(mut self, uri: impl Into<String>) -> Self {
        self.inner.resource_uris.push(uri.into());
        self
    }

    pub fn prompt(mut self, name: impl Into<String>) -> Self {
        self.inner.prompt_names.push(name.into());
        self
    }

    pub fn build(self) -> SkillDefinition {
        self.inner
    }
}

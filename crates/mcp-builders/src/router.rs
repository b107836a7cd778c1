//! Router builder — thin wrapper over [`RouterDefinition`] with the
//! fluent construction style the rest of the builder API uses.

use crate::traits::RouterDefinition;

pub struct RouterBuilder {
    inner: RouterDefinition,
}

impl RouterBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { inner: RouterDefinition::new(name) }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    pub fn tool(mut self, name: impl Into<String>) -> Self {
        self.inner.tool_names.push(name.into());
        self
    }

    pub fn build(self) -> RouterDefinition {
        self.inner
    }
}

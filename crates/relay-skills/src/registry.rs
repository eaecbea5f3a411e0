use crate::skill::{Skill, SkillDescriptor};
use relay_core::{RelayError, RelayResult, ToolCall, ToolResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Central registry for all available tools.
pub struct SkillRegistry {
    skills: HashMap<String, Arc<dyn Skill>>,
}

impl SkillRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            skills: HashMap::new(),
        }
    }

    /// Register a tool, replacing any previous tool with the same name.
    pub fn register(&mut self, skill: Arc<dyn Skill>) {
        let name = skill.descriptor().name.clone();
        info!(skill = %name, "Registered skill");
        self.skills.insert(name, skill);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Skill>> {
        self.skills.get(name)
    }

    /// Descriptors of every registered tool, sorted by name.
    pub fn list_descriptors(&self) -> Vec<&SkillDescriptor> {
        let mut descriptors: Vec<_> = self.skills.values().map(|s| s.descriptor()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Execute a tool call by name.
    pub async fn execute(&self, call: ToolCall) -> RelayResult<ToolResult> {
        let skill = self
            .skills
            .get(&call.name)
            .ok_or_else(|| RelayError::Skill(format!("Unknown skill: {}", call.name)))?;

        debug!(skill = %call.name, call_id = %call.id, "Executing skill");
        skill.execute(call).await
    }

    /// Number of registered tools.
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

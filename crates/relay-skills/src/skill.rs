use async_trait::async_trait;
use relay_core::{RelayResult, ToolCall, ToolResult};
use serde::{Deserialize, Serialize};

/// Metadata describing a tool's name and argument schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    /// Tool name as seen by the caller (`messaging_send`, ...).
    pub name: String,
    /// One-paragraph description shown to the agent.
    pub description: String,
    /// JSON Schema of the `arguments` object.
    pub parameters_schema: serde_json::Value,
}

/// Trait that all tools implement.
///
/// Operational failures are reported as a [`ToolResult`] with `is_error`
/// set; an `Err` is reserved for calls that never reached the tool.
#[async_trait]
pub trait Skill: Send + Sync {
    /// The tool's descriptor.
    fn descriptor(&self) -> &SkillDescriptor;

    /// Run one invocation.
    async fn execute(&self, call: ToolCall) -> RelayResult<ToolResult>;
}

use crate::context::{dispatch, string_arg, CredentialSource};
use async_trait::async_trait;
use relay_core::{MessageRequest, Operation, RelayResult, ToolCall, ToolResult};
use relay_skills::skill::{Skill, SkillDescriptor};

/// `messaging_validate`: check that a platform's credentials work.
pub struct ValidateSkill {
    descriptor: SkillDescriptor,
    source: CredentialSource,
}

impl ValidateSkill {
    /// Create the tool.
    pub fn new(source: CredentialSource) -> Self {
        Self {
            descriptor: SkillDescriptor {
                name: Operation::Validate.tool_name().to_string(),
                description: "Check the configured Slack token or Discord webhook and report \
                    the identity it resolves to."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "platform": {
                            "type": "string",
                            "enum": ["slack", "discord"],
                            "description": "Platform to validate"
                        }
                    },
                    "required": ["platform"]
                }),
            },
            source,
        }
    }
}

impl Default for ValidateSkill {
    fn default() -> Self {
        Self::new(CredentialSource::default())
    }
}

#[async_trait]
impl Skill for ValidateSkill {
    fn descriptor(&self) -> &SkillDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> RelayResult<ToolResult> {
        let platform = string_arg(&call.arguments, "platform");
        dispatch(&self.source, &call, &platform, MessageRequest::Validate).await
    }
}

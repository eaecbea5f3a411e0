use crate::context::{dispatch, platform_or_slack, string_arg, CredentialSource};
use async_trait::async_trait;
use relay_core::{MessageRequest, Operation, ReactArgs, RelayResult, ToolCall, ToolResult};
use relay_skills::skill::{Skill, SkillDescriptor};

/// `messaging_react`: add an emoji reaction to a Slack message.
pub struct ReactSkill {
    descriptor: SkillDescriptor,
    source: CredentialSource,
}

impl ReactSkill {
    /// Create the tool.
    pub fn new(source: CredentialSource) -> Self {
        Self {
            descriptor: SkillDescriptor {
                name: Operation::React.tool_name().to_string(),
                description: "Add an emoji reaction to a Slack message.".to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel": {
                            "type": "string",
                            "description": "Slack channel ID"
                        },
                        "message_id": {
                            "type": "string",
                            "description": "Message timestamp (ts)"
                        },
                        "emoji": {
                            "type": "string",
                            "description": "Emoji name, e.g. 'thumbsup' or ':eyes:'"
                        },
                        "platform": {
                            "type": "string",
                            "enum": ["slack", "discord"],
                            "description": "Platform (default: slack)"
                        }
                    },
                    "required": ["channel", "message_id", "emoji"]
                }),
            },
            source,
        }
    }
}

impl Default for ReactSkill {
    fn default() -> Self {
        Self::new(CredentialSource::default())
    }
}

#[async_trait]
impl Skill for ReactSkill {
    fn descriptor(&self) -> &SkillDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> RelayResult<ToolResult> {
        let args = &call.arguments;
        let platform = platform_or_slack(args);
        let request = MessageRequest::React(ReactArgs {
            channel: string_arg(args, "channel"),
            message_id: string_arg(args, "message_id"),
            emoji: string_arg(args, "emoji"),
        });

        dispatch(&self.source, &call, &platform, request).await
    }
}

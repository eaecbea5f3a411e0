use crate::context::{dispatch, int_arg, optional_arg, platform_or_slack, string_arg, CredentialSource};
use async_trait::async_trait;
use relay_core::message::DEFAULT_READ_LIMIT;
use relay_core::{MessageRequest, Operation, ReadArgs, RelayResult, ToolCall, ToolResult};
use relay_skills::skill::{Skill, SkillDescriptor};

/// `messaging_read`: fetch recent messages from a Slack channel.
pub struct ReadSkill {
    descriptor: SkillDescriptor,
    source: CredentialSource,
}

impl ReadSkill {
    /// Create the tool.
    pub fn new(source: CredentialSource) -> Self {
        Self {
            descriptor: SkillDescriptor {
                name: Operation::Read.tool_name().to_string(),
                description: "Read recent messages from a Slack channel, newest first. \
                    Discord webhooks cannot read."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "channel": {
                            "type": "string",
                            "description": "Slack channel ID"
                        },
                        "limit": {
                            "type": "integer",
                            "minimum": 1,
                            "maximum": 100,
                            "description": "Number of messages (default: 10, capped at 100)"
                        },
                        "before": {
                            "type": "string",
                            "description": "Only messages older than this timestamp"
                        },
                        "platform": {
                            "type": "string",
                            "enum": ["slack", "discord"],
                            "description": "Platform (default: slack)"
                        }
                    },
                    "required": ["channel"]
                }),
            },
            source,
        }
    }
}

impl Default for ReadSkill {
    fn default() -> Self {
        Self::new(CredentialSource::default())
    }
}

#[async_trait]
impl Skill for ReadSkill {
    fn descriptor(&self) -> &SkillDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> RelayResult<ToolResult> {
        let args = &call.arguments;
        let platform = platform_or_slack(args);
        let request = MessageRequest::Read(ReadArgs {
            channel: string_arg(args, "channel"),
            limit: int_arg(args, "limit", DEFAULT_READ_LIMIT),
            before: optional_arg(args, "before"),
        });

        dispatch(&self.source, &call, &platform, request).await
    }
}

use crate::context::{bool_arg, dispatch, optional_arg, string_arg, CredentialSource};
use async_trait::async_trait;
use relay_core::{MessageRequest, Operation, RelayResult, SendArgs, ToolCall, ToolResult};
use relay_skills::skill::{Skill, SkillDescriptor};

/// `messaging_send`: post a message to Slack or Discord.
pub struct SendSkill {
    descriptor: SkillDescriptor,
    source: CredentialSource,
}

impl SendSkill {
    /// Create the tool.
    pub fn new(source: CredentialSource) -> Self {
        Self {
            descriptor: SkillDescriptor {
                name: Operation::Send.tool_name().to_string(),
                description: "Send a message to a Slack channel or a Discord webhook. \
                    Slack requires a channel; Discord posts to the webhook's channel \
                    and may override the display name and avatar."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "platform": {
                            "type": "string",
                            "enum": ["slack", "discord"],
                            "description": "Target platform"
                        },
                        "message": {
                            "type": "string",
                            "description": "Message text (Slack mrkdwn or Discord markdown)"
                        },
                        "channel": {
                            "type": "string",
                            "description": "Slack channel ID or name (ignored by Discord)"
                        },
                        "thread_id": {
                            "type": "string",
                            "description": "Reply in this thread (Slack ts or Discord thread id)"
                        },
                        "username": {
                            "type": "string",
                            "description": "Display name override (Discord only)"
                        },
                        "avatar_url": {
                            "type": "string",
                            "description": "Avatar URL override (Discord only)"
                        },
                        "convert_markdown": {
                            "type": "boolean",
                            "description": "Rewrite standard markdown into the platform dialect (default: false)"
                        }
                    },
                    "required": ["platform", "message"]
                }),
            },
            source,
        }
    }
}

impl Default for SendSkill {
    fn default() -> Self {
        Self::new(CredentialSource::default())
    }
}

#[async_trait]
impl Skill for SendSkill {
    fn descriptor(&self) -> &SkillDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> RelayResult<ToolResult> {
        let args = &call.arguments;
        let platform = string_arg(args, "platform");
        let request = MessageRequest::Send(SendArgs {
            text: string_arg(args, "message"),
            channel: optional_arg(args, "channel"),
            thread_id: optional_arg(args, "thread_id"),
            username: optional_arg(args, "username"),
            avatar_url: optional_arg(args, "avatar_url"),
            convert_markdown: bool_arg(args, "convert_markdown", false),
        });

        dispatch(&self.source, &call, &platform, request).await
    }
}

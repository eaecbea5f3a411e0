use crate::context::{bool_arg, dispatch, int_arg, platform_or_slack, CredentialSource};
use async_trait::async_trait;
use relay_core::message::DEFAULT_LIST_LIMIT;
use relay_core::{
    ListChannelsArgs, MessageRequest, Operation, RelayResult, ToolCall, ToolResult,
};
use relay_skills::skill::{Skill, SkillDescriptor};

/// `messaging_list_channels`: list Slack channels visible to the bot.
pub struct ListChannelsSkill {
    descriptor: SkillDescriptor,
    source: CredentialSource,
}

impl ListChannelsSkill {
    /// Create the tool.
    pub fn new(source: CredentialSource) -> Self {
        Self {
            descriptor: SkillDescriptor {
                name: Operation::ListChannels.tool_name().to_string(),
                description: "List Slack channels the bot can see. Archived channels are excluded."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "include_private": {
                            "type": "boolean",
                            "description": "Include private channels (default: false)"
                        },
                        "limit": {
                            "type": "integer",
                            "minimum": 1,
                            "maximum": 1000,
                            "description": "Number of channels (default: 100, capped at 1000)"
                        },
                        "platform": {
                            "type": "string",
                            "enum": ["slack", "discord"],
                            "description": "Platform (default: slack)"
                        }
                    }
                }),
            },
            source,
        }
    }
}

impl Default for ListChannelsSkill {
    fn default() -> Self {
        Self::new(CredentialSource::default())
    }
}

#[async_trait]
impl Skill for ListChannelsSkill {
    fn descriptor(&self) -> &SkillDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> RelayResult<ToolResult> {
        let args = &call.arguments;
        let platform = platform_or_slack(args);
        let request = MessageRequest::ListChannels(ListChannelsArgs {
            include_private: bool_arg(args, "include_private", false),
            limit: int_arg(args, "limit", DEFAULT_LIST_LIMIT),
        });

        dispatch(&self.source, &call, &platform, request).await
    }
}

use crate::context::{dispatch, optional_arg, string_arg, CredentialSource};
use async_trait::async_trait;
use relay_core::{MessageRequest, Operation, RelayResult, ToolCall, ToolResult, UploadArgs};
use relay_skills::skill::{Skill, SkillDescriptor};

/// `messaging_upload`: share a text file.
pub struct UploadSkill {
    descriptor: SkillDescriptor,
    source: CredentialSource,
}

impl UploadSkill {
    /// Create the tool.
    pub fn new(source: CredentialSource) -> Self {
        Self {
            descriptor: SkillDescriptor {
                name: Operation::Upload.tool_name().to_string(),
                description: "Upload a text file to a Slack channel or a Discord webhook."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "platform": {
                            "type": "string",
                            "enum": ["slack", "discord"],
                            "description": "Target platform"
                        },
                        "filename": {
                            "type": "string",
                            "description": "File name, e.g. 'report.csv'"
                        },
                        "content": {
                            "type": "string",
                            "description": "File content (UTF-8 text)"
                        },
                        "channel": {
                            "type": "string",
                            "description": "Slack channel ID (ignored by Discord)"
                        },
                        "title": {
                            "type": "string",
                            "description": "File title (Slack only)"
                        },
                        "comment": {
                            "type": "string",
                            "description": "Message posted with the file"
                        }
                    },
                    "required": ["platform", "filename", "content"]
                }),
            },
            source,
        }
    }
}

impl Default for UploadSkill {
    fn default() -> Self {
        Self::new(CredentialSource::default())
    }
}

#[async_trait]
impl Skill for UploadSkill {
    fn descriptor(&self) -> &SkillDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> RelayResult<ToolResult> {
        let args = &call.arguments;
        let platform = string_arg(args, "platform");
        let request = MessageRequest::Upload(UploadArgs {
            filename: string_arg(args, "filename"),
            content: string_arg(args, "content"),
            channel: optional_arg(args, "channel"),
            title: optional_arg(args, "title"),
            comment: optional_arg(args, "comment"),
        });

        dispatch(&self.source, &call, &platform, request).await
    }
}

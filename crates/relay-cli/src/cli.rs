use anyhow::Context;
use clap::{Parser, Subcommand};
use relay_core::message::{DEFAULT_LIST_LIMIT, DEFAULT_READ_LIMIT};
use relay_core::Operation;
use serde_json::{json, Map, Value};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "relay", version, about = "Send, read and react to Slack and Discord messages")]
pub struct Cli {
    /// Path to config file (default: ./relay.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-call HTTP timeout in seconds (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Emit logs as JSON on stderr
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post a message
    Send {
        /// slack or discord
        #[arg(short, long)]
        platform: String,
        /// Message text
        #[arg(short, long)]
        message: String,
        /// Slack channel ID or name
        #[arg(long)]
        channel: Option<String>,
        /// Reply inside this thread
        #[arg(long)]
        thread_id: Option<String>,
        /// Display name override (Discord)
        #[arg(long)]
        username: Option<String>,
        /// Avatar URL override (Discord)
        #[arg(long)]
        avatar_url: Option<String>,
        /// Rewrite standard markdown into the platform dialect
        #[arg(long)]
        markdown: bool,
    },
    /// Read recent messages from a Slack channel
    Read {
        /// Channel ID
        #[arg(long)]
        channel: String,
        /// Number of messages (capped at 100)
        #[arg(short, long, default_value_t = DEFAULT_READ_LIMIT)]
        limit: i64,
        /// Only messages older than this timestamp
        #[arg(long)]
        before: Option<String>,
        /// Platform (default: slack)
        #[arg(short, long, default_value = "slack")]
        platform: String,
    },
    /// React to a Slack message
    React {
        /// Channel ID
        #[arg(long)]
        channel: String,
        /// Message timestamp (ts)
        #[arg(long)]
        message_id: String,
        /// Emoji name
        #[arg(long)]
        emoji: String,
        /// Platform (default: slack)
        #[arg(short, long, default_value = "slack")]
        platform: String,
    },
    /// Upload a text file
    Upload {
        /// slack or discord
        #[arg(short, long)]
        platform: String,
        /// File name shown by the platform (default: name of --file)
        #[arg(long)]
        filename: Option<String>,
        /// File content
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        content: Option<String>,
        /// Read the content from this file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Slack channel ID
        #[arg(long)]
        channel: Option<String>,
        /// File title (Slack)
        #[arg(long)]
        title: Option<String>,
        /// Message posted with the file
        #[arg(long)]
        comment: Option<String>,
    },
    /// List Slack channels
    Channels {
        /// Include private channels
        #[arg(long)]
        include_private: bool,
        /// Number of channels (capped at 1000)
        #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: i64,
        /// Platform (default: slack)
        #[arg(short, long, default_value = "slack")]
        platform: String,
    },
    /// Check credentials for a platform
    Validate {
        /// slack or discord
        #[arg(short, long)]
        platform: String,
    },
    /// Print the tool descriptors as JSON
    Tools,
}

impl Commands {
    /// Tool name and JSON arguments for this command; `None` for `tools`.
    pub async fn into_tool_call(self) -> anyhow::Result<Option<(&'static str, Value)>> {
        let call = match self {
            Self::Send {
                platform,
                message,
                channel,
                thread_id,
                username,
                avatar_url,
                markdown,
            } => {
                let mut args = json!({
                    "platform": platform,
                    "message": message,
                    "convert_markdown": markdown,
                });
                insert_opt(&mut args, "channel", channel);
                insert_opt(&mut args, "thread_id", thread_id);
                insert_opt(&mut args, "username", username);
                insert_opt(&mut args, "avatar_url", avatar_url);
                (Operation::Send, args)
            }
            Self::Read {
                channel,
                limit,
                before,
                platform,
            } => {
                let mut args = json!({"channel": channel, "limit": limit, "platform": platform});
                insert_opt(&mut args, "before", before);
                (Operation::Read, args)
            }
            Self::React {
                channel,
                message_id,
                emoji,
                platform,
            } => (
                Operation::React,
                json!({
                    "channel": channel,
                    "message_id": message_id,
                    "emoji": emoji,
                    "platform": platform,
                }),
            ),
            Self::Upload {
                platform,
                filename,
                content,
                file,
                channel,
                title,
                comment,
            } => {
                let (filename, content) = upload_body(filename, content, file).await?;
                let mut args = json!({
                    "platform": platform,
                    "filename": filename,
                    "content": content,
                });
                insert_opt(&mut args, "channel", channel);
                insert_opt(&mut args, "title", title);
                insert_opt(&mut args, "comment", comment);
                (Operation::Upload, args)
            }
            Self::Channels {
                include_private,
                limit,
                platform,
            } => (
                Operation::ListChannels,
                json!({
                    "include_private": include_private,
                    "limit": limit,
                    "platform": platform,
                }),
            ),
            Self::Validate { platform } => (Operation::Validate, json!({"platform": platform})),
            Self::Tools => return Ok(None),
        };

        let (operation, args) = call;
        Ok(Some((operation.tool_name(), args)))
    }
}

fn insert_opt(args: &mut Value, key: &str, value: Option<String>) {
    if let (Value::Object(map), Some(value)) = (args, value) {
        map.insert(key.to_string(), Value::String(value));
    }
}

async fn upload_body(
    filename: Option<String>,
    content: Option<String>,
    file: Option<PathBuf>,
) -> anyhow::Result<(String, String)> {
    let Some(path) = file else {
        return Ok((filename.unwrap_or_default(), content.unwrap_or_default()));
    };

    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let filename = filename.unwrap_or_else(|| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    Ok((filename, content))
}

/// Render descriptors for `relay tools`.
pub fn descriptors_json(registry: &relay_skills::SkillRegistry) -> Value {
    let tools = registry
        .list_descriptors()
        .into_iter()
        .map(|d| {
            let mut tool = Map::new();
            tool.insert("name".into(), Value::from(d.name.as_str()));
            tool.insert("description".into(), Value::from(d.description.as_str()));
            tool.insert("parameters".into(), d.parameters_schema.clone());
            Value::Object(tool)
        })
        .collect();
    Value::Array(tools)
}

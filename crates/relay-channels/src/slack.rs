use crate::format::{markdown_to_slack, normalize_emoji};
use crate::normalize::{slack_envelope, transport_error};
use crate::platform::{build_client, MessagingPlatform};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use relay_core::{
    ChannelDescriptor, ChannelList, Identity, ListChannelsArgs, MessageDescriptor, MessageList,
    MessagingConfig, Platform, ReactArgs, Reaction, ReadArgs, RelayError, RelayResult, SendArgs,
    SentMessage, UploadArgs, UploadedFile,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Slack platform adapter.
///
/// Talks to the Slack Web API with a Bot User OAuth token (`xoxb-...`).
/// The token needs `chat:write`, `channels:history`, `reactions:write`,
/// `files:write` and `channels:read`; `groups:history`/`groups:read` are
/// only needed for private channels.
pub struct SlackPlatform {
    bot_token: String,
    base_url: String,
    client: reqwest::Client,
}

// ── Slack API types ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocks: Option<&'a [Value]>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    message: Option<PostedMessage>,
}

#[derive(Debug, Deserialize)]
struct PostedMessage {
    #[serde(default)]
    thread_ts: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReactionRequest<'a> {
    channel: &'a str,
    timestamp: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    messages: Vec<HistoryMessage>,
}

#[derive(Debug, Deserialize)]
struct HistoryMessage {
    #[serde(default)]
    ts: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    bot_id: Option<String>,
    #[serde(default)]
    subtype: Option<String>,
    #[serde(default)]
    thread_ts: Option<String>,
    #[serde(default)]
    reply_count: u64,
}

#[derive(Debug, Deserialize)]
struct ConversationsListResponse {
    #[serde(default)]
    channels: Vec<ConversationInfo>,
}

#[derive(Debug, Deserialize)]
struct ConversationInfo {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    is_private: bool,
    #[serde(default)]
    num_members: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct FileUploadResponse {
    #[serde(default)]
    file: Option<FileInfo>,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    permalink: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthTestResponse {
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    team_id: Option<String>,
}

// ── Implementation ──────────────────────────────────────────────────────────

impl SlackPlatform {
    /// Create a new `SlackPlatform`.
    ///
    /// * `bot_token` – A Slack Bot User OAuth token (`xoxb-...`).
    /// * `base_url` – Web API base, normally `https://slack.com/api`.
    /// * `timeout` – Per-call HTTP timeout.
    pub fn new(
        bot_token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> RelayResult<Self> {
        Ok(Self {
            bot_token: bot_token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }

    /// Build an adapter from configuration; fails if `SLACK_BOT_TOKEN` is absent.
    pub fn from_config(config: &MessagingConfig) -> RelayResult<Self> {
        let token = config.credentials.slack_bot_token()?;
        Self::new(token, config.slack_api_base.as_str(), config.timeout)
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    /// Send one authenticated request and check the `ok` envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        request: reqwest::RequestBuilder,
    ) -> RelayResult<T> {
        debug!(method, "Slack API call");
        let response = request
            .bearer_auth(&self.bot_token)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| transport_error(&e))?;
        slack_envelope(status, &body)
    }

    /// Post a message rendered as Block Kit blocks; `args.text` is the
    /// notification fallback.
    pub async fn send_blocks(&self, args: &SendArgs, blocks: &[Value]) -> RelayResult<SentMessage> {
        self.post_message(args, Some(blocks)).await
    }

    async fn post_message(
        &self,
        args: &SendArgs,
        blocks: Option<&[Value]>,
    ) -> RelayResult<SentMessage> {
        let channel = required(
            args.channel.as_deref(),
            "Channel is required for Slack messages",
        )?;
        let text = if args.convert_markdown {
            markdown_to_slack(&args.text)
        } else {
            args.text.clone()
        };
        let payload = PostMessageRequest {
            channel,
            text: &text,
            thread_ts: args.thread_id.as_deref().filter(|t| !t.is_empty()),
            blocks,
        };

        let method = "chat.postMessage";
        let body: PostMessageResponse = self
            .call(method, self.client.post(self.endpoint(method)).json(&payload))
            .await?;

        Ok(SentMessage {
            message_id: body.ts,
            channel: body.channel,
            thread_id: body.message.and_then(|m| m.thread_ts),
        })
    }
}

fn required<'a>(value: Option<&'a str>, message: &str) -> RelayResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RelayError::Validation(message.to_string())),
    }
}

/// Render a Slack `ts` (`"1234567890.123456"`) as RFC 3339; unparseable
/// values are returned unchanged.
fn ts_to_rfc3339(ts: &str) -> String {
    let (secs, frac) = ts.split_once('.').unwrap_or((ts, "0"));
    let micros = format!("{frac:0<6}");
    let parsed = secs.parse::<i64>().ok().and_then(|secs| {
        let micros = micros.get(..6)?.parse::<u32>().ok()?;
        DateTime::<Utc>::from_timestamp(secs, micros * 1000)
    });
    parsed.map_or_else(
        || ts.to_string(),
        |dt| dt.to_rfc3339_opts(SecondsFormat::Micros, true),
    )
}

#[async_trait]
impl MessagingPlatform for SlackPlatform {
    fn platform(&self) -> Platform {
        Platform::Slack
    }

    async fn send_message(&self, args: &SendArgs) -> RelayResult<SentMessage> {
        self.post_message(args, None).await
    }

    async fn get_messages(&self, args: &ReadArgs) -> RelayResult<MessageList> {
        let channel = required(Some(args.channel.as_str()), "Channel ID is required")?;
        let mut query = vec![
            ("channel", channel.to_string()),
            ("limit", args.effective_limit().to_string()),
        ];
        if let Some(before) = args.before.as_deref().filter(|b| !b.is_empty()) {
            query.push(("latest", before.to_string()));
        }

        let method = "conversations.history";
        let body: HistoryResponse = self
            .call(method, self.client.get(self.endpoint(method)).query(&query))
            .await?;

        // Joins, leaves, topic changes and the like carry a subtype; bot posts
        // are the only subtype kept.
        let messages = body
            .messages
            .into_iter()
            .filter(|m| m.subtype.as_deref().map_or(true, |s| s == "bot_message"))
            .map(|m| MessageDescriptor {
                timestamp: ts_to_rfc3339(&m.ts),
                author: m.user.or(m.bot_id).unwrap_or_else(|| "unknown".to_string()),
                id: m.ts,
                content: m.text,
                thread_id: m.thread_ts,
                reply_count: m.reply_count,
            })
            .collect();

        Ok(MessageList {
            channel: channel.to_string(),
            messages,
        })
    }

    async fn add_reaction(&self, args: &ReactArgs) -> RelayResult<Reaction> {
        let channel = required(Some(args.channel.as_str()), "Channel ID is required")?;
        let message_id = required(Some(args.message_id.as_str()), "Message ID (timestamp) is required")?;
        let emoji = normalize_emoji(&args.emoji);
        let emoji = required(Some(emoji.as_str()), "Emoji name is required")?;

        let payload = ReactionRequest {
            channel,
            timestamp: message_id,
            name: emoji,
        };
        let method = "reactions.add";
        let outcome: RelayResult<Value> = self
            .call(method, self.client.post(self.endpoint(method)).json(&payload))
            .await;

        let note = match outcome {
            Ok(_) => None,
            Err(RelayError::Backend { code, .. }) if code == "already_reacted" => {
                Some("Already reacted".to_string())
            }
            Err(e) => return Err(e),
        };

        Ok(Reaction {
            channel: channel.to_string(),
            message_id: message_id.to_string(),
            emoji: emoji.to_string(),
            note,
        })
    }

    async fn upload_file(&self, args: &UploadArgs) -> RelayResult<UploadedFile> {
        let channel = required(
            args.channel.as_deref(),
            "Channel is required for Slack file uploads",
        )?;

        let file = Part::text(args.content.clone()).file_name(args.filename.clone());
        let mut form = Form::new()
            .text("channels", channel.to_string())
            .text("filename", args.filename.clone())
            .part("file", file);
        if let Some(title) = args.title.as_deref().filter(|t| !t.is_empty()) {
            form = form.text("title", title.to_string());
        }
        if let Some(comment) = args.comment.as_deref().filter(|c| !c.is_empty()) {
            form = form.text("initial_comment", comment.to_string());
        }

        let method = "files.upload";
        let body: FileUploadResponse = self
            .call(method, self.client.post(self.endpoint(method)).multipart(form))
            .await?;

        let file = body.file;
        Ok(UploadedFile {
            file_id: file.as_ref().and_then(|f| f.id.clone()),
            url: file.and_then(|f| f.permalink),
        })
    }

    async fn list_channels(&self, args: &ListChannelsArgs) -> RelayResult<ChannelList> {
        let types = if args.include_private {
            "public_channel,private_channel"
        } else {
            "public_channel"
        };
        let query = [
            ("types", types.to_string()),
            ("limit", args.effective_limit().to_string()),
            ("exclude_archived", "true".to_string()),
        ];

        let method = "conversations.list";
        let body: ConversationsListResponse = self
            .call(method, self.client.get(self.endpoint(method)).query(&query))
            .await?;

        let channels = body
            .channels
            .into_iter()
            .map(|c| ChannelDescriptor {
                id: c.id,
                name: c.name,
                is_private: c.is_private,
                member_count: c.num_members,
            })
            .collect();

        Ok(ChannelList { channels })
    }

    async fn validate_credentials(&self) -> RelayResult<Identity> {
        let method = "auth.test";
        let body: AuthTestResponse = self
            .call(method, self.client.get(self.endpoint(method)))
            .await?;

        Ok(Identity {
            user: body.user,
            user_id: body.user_id,
            team: body.team,
            team_id: body.team_id,
            ..Identity::default()
        })
    }
}

use crate::format::{markdown_to_discord, DiscordEmbed};
use crate::normalize::{discord_response, transport_error};
use crate::platform::{build_client, MessagingPlatform};
use async_trait::async_trait;
use relay_core::{
    Identity, MessagingConfig, Platform, RelayError, RelayResult, SendArgs, SentMessage,
    UploadArgs, UploadedFile,
};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Discord channel adapter backed by an incoming webhook.
///
/// A webhook is bound to exactly one channel, needs no bot token, and can
/// only post. Reading, reacting, and listing channels keep the
/// [`MessagingPlatform`] defaults and fail with a capability error.
pub struct DiscordPlatform {
    webhook_url: String,
    client: reqwest::Client,
}

// ── Discord API types ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ExecuteWebhookRequest<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
    #[serde(skip_serializing_if = "no_embeds")]
    embeds: &'a [DiscordEmbed],
}

fn no_embeds(embeds: &&[DiscordEmbed]) -> bool {
    embeds.is_empty()
}

#[derive(Debug, Default, Deserialize)]
struct WebhookMessage {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    channel_id: Option<String>,
    #[serde(default)]
    attachments: Vec<Attachment>,
}

#[derive(Debug, Deserialize)]
struct Attachment {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WebhookInfo {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    channel_id: Option<String>,
    #[serde(default)]
    guild_id: Option<String>,
}

// ── Implementation ──────────────────────────────────────────────────────────

impl DiscordPlatform {
    /// Create a new `DiscordPlatform`.
    ///
    /// * `webhook_url` – `https://discord.com/api/webhooks/<id>/<token>`.
    /// * `timeout` – Per-call HTTP timeout.
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> RelayResult<Self> {
        Ok(Self {
            webhook_url: webhook_url.into(),
            client: build_client(timeout)?,
        })
    }

    /// Build an adapter from configuration; fails if `DISCORD_WEBHOOK_URL` is absent.
    pub fn from_config(config: &MessagingConfig) -> RelayResult<Self> {
        let url = config.credentials.discord_webhook_url()?;
        Self::new(url, config.timeout)
    }

    /// Webhook URL with `wait=true` so Discord returns the created message.
    fn execute_url(&self, thread_id: Option<&str>) -> RelayResult<Url> {
        let mut url = self.parsed_url()?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(thread_id) = thread_id {
                query.append_pair("thread_id", thread_id);
            }
            query.append_pair("wait", "true");
        }
        Ok(url)
    }

    fn parsed_url(&self) -> RelayResult<Url> {
        Url::parse(&self.webhook_url)
            .map_err(|e| RelayError::Config(format!("Invalid Discord webhook URL: {e}")))
    }

    async fn finish(request: reqwest::RequestBuilder) -> RelayResult<Option<Value>> {
        let response = request.send().await.map_err(|e| transport_error(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| transport_error(&e))?;
        debug!(status, "Discord webhook response");
        discord_response(status, &body)
    }

    async fn execute(
        &self,
        payload: &ExecuteWebhookRequest<'_>,
        thread_id: Option<&str>,
    ) -> RelayResult<SentMessage> {
        let url = self.execute_url(thread_id)?;
        let body = Self::finish(self.client.post(url).json(payload)).await?;
        let message: WebhookMessage = match body {
            Some(value) => serde_json::from_value(value)?,
            None => WebhookMessage::default(),
        };
        Ok(SentMessage {
            message_id: message.id,
            channel: message.channel_id,
            thread_id: thread_id.map(str::to_string),
        })
    }

    /// Post a single rich embed with no plain-text content.
    pub async fn send_embed(&self, embed: DiscordEmbed) -> RelayResult<SentMessage> {
        let embeds = [embed];
        let payload = ExecuteWebhookRequest {
            content: "",
            username: None,
            avatar_url: None,
            embeds: &embeds,
        };
        self.execute(&payload, None).await
    }
}

#[async_trait]
impl MessagingPlatform for DiscordPlatform {
    fn platform(&self) -> Platform {
        Platform::Discord
    }

    async fn send_message(&self, args: &SendArgs) -> RelayResult<SentMessage> {
        let text = if args.convert_markdown {
            markdown_to_discord(&args.text)
        } else {
            args.text.clone()
        };
        let payload = ExecuteWebhookRequest {
            content: &text,
            username: args.username.as_deref().filter(|u| !u.is_empty()),
            avatar_url: args.avatar_url.as_deref().filter(|a| !a.is_empty()),
            embeds: &[],
        };
        let thread_id = args.thread_id.as_deref().filter(|t| !t.is_empty());
        self.execute(&payload, thread_id).await
    }

    async fn upload_file(&self, args: &UploadArgs) -> RelayResult<UploadedFile> {
        let file = Part::text(args.content.clone()).file_name(args.filename.clone());
        let mut form = Form::new().part("file", file);
        if let Some(comment) = args.comment.as_deref().filter(|c| !c.is_empty()) {
            form = form.text("content", comment.to_string());
        }

        let url = self.execute_url(None)?;
        let body = Self::finish(self.client.post(url).multipart(form)).await?;
        let message: WebhookMessage = match body {
            Some(value) => serde_json::from_value(value)?,
            None => WebhookMessage::default(),
        };

        Ok(match message.attachments.into_iter().next() {
            Some(attachment) => UploadedFile {
                file_id: attachment.id,
                url: attachment.url,
            },
            None => UploadedFile {
                file_id: message.id,
                url: None,
            },
        })
    }

    async fn validate_credentials(&self) -> RelayResult<Identity> {
        let url = self.parsed_url()?;
        let body = Self::finish(self.client.get(url)).await?;
        let info: WebhookInfo = match body {
            Some(value) => serde_json::from_value(value)?,
            None => {
                return Err(RelayError::backend(
                    "invalid_response",
                    "Discord returned an empty webhook description",
                    None,
                ))
            }
        };

        Ok(Identity {
            name: info.name,
            channel_id: info.channel_id,
            guild_id: info.guild_id,
            ..Identity::default()
        })
    }
}

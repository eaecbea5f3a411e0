use crate::error::{ErrorKind, RelayError, RelayResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest page accepted by `conversations.history`.
pub const READ_LIMIT_MAX: u32 = 100;
/// Largest page accepted by `conversations.list`.
pub const LIST_LIMIT_MAX: u32 = 1000;
/// Default number of messages returned by a read.
pub const DEFAULT_READ_LIMIT: i64 = 10;
/// Default number of channels returned by a listing.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

// --- Platforms and operations ---

/// A messaging backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Slack Web API, authenticated with a bot token.
    Slack,
    /// Discord incoming webhook.
    Discord,
}

const SLACK_CAPABILITIES: &[Operation] = &[
    Operation::Send,
    Operation::Read,
    Operation::React,
    Operation::Upload,
    Operation::ListChannels,
    Operation::Validate,
];

const DISCORD_CAPABILITIES: &[Operation] =
    &[Operation::Send, Operation::Upload, Operation::Validate];

impl Platform {
    /// Every known platform.
    pub const ALL: [Platform; 2] = [Platform::Slack, Platform::Discord];

    /// Lower-case identifier (`slack`, `discord`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::Discord => "discord",
        }
    }

    /// Capitalized name for messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Slack => "Slack",
            Self::Discord => "Discord",
        }
    }

    /// Operations the platform's adapter implements.
    pub fn capabilities(&self) -> &'static [Operation] {
        match self {
            Self::Slack => SLACK_CAPABILITIES,
            Self::Discord => DISCORD_CAPABILITIES,
        }
    }

    /// Whether the adapter implements `operation`.
    pub fn supports(&self, operation: Operation) -> bool {
        self.capabilities().contains(&operation)
    }

    /// Parses a user supplied identifier, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> RelayResult<Self> {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "slack" => Ok(Self::Slack),
            "discord" => Ok(Self::Discord),
            _ => Err(RelayError::Validation(format!(
                "Unknown platform: {normalized}. Use 'slack' or 'discord'."
            ))),
        }
    }
}

impl FromStr for Platform {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical messaging operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Post a message.
    Send,
    /// Fetch recent messages from a channel.
    Read,
    /// Add an emoji reaction to a message.
    React,
    /// Upload a text file.
    Upload,
    /// Enumerate channels.
    ListChannels,
    /// Check that the configured credentials work.
    Validate,
}

impl Operation {
    /// Every operation, in tool registration order.
    pub const ALL: [Operation; 6] = [
        Operation::Send,
        Operation::Read,
        Operation::React,
        Operation::Upload,
        Operation::ListChannels,
        Operation::Validate,
    ];

    /// Name of the agent tool exposing this operation.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Send => "messaging_send",
            Self::Read => "messaging_read",
            Self::React => "messaging_react",
            Self::Upload => "messaging_upload",
            Self::ListChannels => "messaging_list_channels",
            Self::Validate => "messaging_validate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

// --- Requests ---

/// Arguments for [`Operation::Send`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendArgs {
    /// Message text in the platform's markdown dialect.
    pub text: String,
    /// Target channel; required on Slack, ignored by Discord webhooks.
    pub channel: Option<String>,
    /// Thread to reply in (Slack `thread_ts`, Discord thread id).
    pub thread_id: Option<String>,
    /// Display-name override for this message (Discord only).
    pub username: Option<String>,
    /// Avatar override for this message (Discord only).
    pub avatar_url: Option<String>,
    /// Text is standard markdown and should be rewritten into the
    /// platform's dialect before sending.
    pub convert_markdown: bool,
}

impl SendArgs {
    /// Creates arguments for a plain message.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Treats the text as standard markdown.
    pub fn markdown(mut self) -> Self {
        self.convert_markdown = true;
        self
    }

    /// Sets the target channel.
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Replies inside an existing thread.
    pub fn thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }
}

/// Arguments for [`Operation::Read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadArgs {
    /// Channel to read from.
    pub channel: String,
    /// Requested page size, clamped by [`ReadArgs::effective_limit`].
    pub limit: i64,
    /// Only return messages older than this timestamp.
    pub before: Option<String>,
}

impl ReadArgs {
    /// Creates arguments with the default page size.
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            limit: DEFAULT_READ_LIMIT,
            before: None,
        }
    }

    /// The page size actually sent, clamped to `1..=100`.
    pub fn effective_limit(&self) -> u32 {
        clamp_limit(self.limit, READ_LIMIT_MAX)
    }
}

/// Arguments for [`Operation::React`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactArgs {
    /// Channel containing the message.
    pub channel: String,
    /// The message timestamp (`ts`).
    pub message_id: String,
    /// Emoji short name, with or without surrounding colons.
    pub emoji: String,
}

/// Arguments for [`Operation::Upload`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadArgs {
    /// File name shown by the platform.
    pub filename: String,
    /// File body, sent as UTF-8 text.
    pub content: String,
    /// Target channel; required on Slack, ignored by Discord webhooks.
    pub channel: Option<String>,
    /// File title (Slack only).
    pub title: Option<String>,
    /// Message posted alongside the file.
    pub comment: Option<String>,
}

/// Arguments for [`Operation::ListChannels`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChannelsArgs {
    /// Include private channels the bot belongs to.
    pub include_private: bool,
    /// Requested page size, clamped by [`ListChannelsArgs::effective_limit`].
    pub limit: i64,
}

impl Default for ListChannelsArgs {
    fn default() -> Self {
        Self {
            include_private: false,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ListChannelsArgs {
    /// The page size actually sent, clamped to `1..=1000`.
    pub fn effective_limit(&self) -> u32 {
        clamp_limit(self.limit, LIST_LIMIT_MAX)
    }
}

fn clamp_limit(limit: i64, max: u32) -> u32 {
    u32::try_from(limit.clamp(1, i64::from(max))).unwrap_or(max)
}

/// One messaging operation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageRequest {
    /// See [`Operation::Send`].
    Send(SendArgs),
    /// See [`Operation::Read`].
    Read(ReadArgs),
    /// See [`Operation::React`].
    React(ReactArgs),
    /// See [`Operation::Upload`].
    Upload(UploadArgs),
    /// See [`Operation::ListChannels`].
    ListChannels(ListChannelsArgs),
    /// See [`Operation::Validate`].
    Validate,
}

impl MessageRequest {
    /// The operation this request performs.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Send(_) => Operation::Send,
            Self::Read(_) => Operation::Read,
            Self::React(_) => Operation::React,
            Self::Upload(_) => Operation::Upload,
            Self::ListChannels(_) => Operation::ListChannels,
            Self::Validate => Operation::Validate,
        }
    }

    /// Checks the arguments that are required regardless of platform.
    pub fn validate(&self) -> RelayResult<()> {
        match self {
            Self::Send(args) if args.text.is_empty() => {
                Err(RelayError::Validation("Message cannot be empty".into()))
            }
            Self::Upload(args) if args.filename.is_empty() => {
                Err(RelayError::Validation("Filename is required".into()))
            }
            Self::Upload(args) if args.content.is_empty() => {
                Err(RelayError::Validation("Content is required".into()))
            }
            _ => Ok(()),
        }
    }
}

// --- Results ---

/// A message returned by a read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    /// Message identifier (Slack `ts`).
    pub id: String,
    /// User id, bot id, or `unknown`.
    pub author: String,
    /// Message text.
    pub content: String,
    /// RFC 3339 rendering of the timestamp, or the raw value.
    pub timestamp: String,
    /// Parent thread, if the message is part of one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Number of replies in the message's thread.
    pub reply_count: u64,
}

/// A channel returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    /// Channel identifier.
    pub id: String,
    /// Channel name without the leading `#`.
    pub name: String,
    /// Whether the channel is private.
    pub is_private: bool,
    /// Member count, when the platform reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
}

/// Outcome of a send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentMessage {
    /// Identifier of the posted message; absent when the platform returns no body.
    pub message_id: Option<String>,
    /// Channel the message landed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Thread the message was posted in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// Outcome of a read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageList {
    /// Channel that was read.
    pub channel: String,
    /// Messages in backend order (newest first).
    pub messages: Vec<MessageDescriptor>,
}

/// Outcome of a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reaction {
    /// Channel containing the message.
    pub channel: String,
    /// Message that was reacted to.
    pub message_id: String,
    /// Emoji name as sent to the platform.
    pub emoji: String,
    /// Informational note (e.g. the reaction already existed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Outcome of a file upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    /// Platform file or attachment identifier.
    pub file_id: Option<String>,
    /// Link to the uploaded file.
    pub url: Option<String>,
}

/// Outcome of a channel listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelList {
    /// Channels in backend order.
    pub channels: Vec<ChannelDescriptor>,
}

/// Identity behind validated credentials.
///
/// Slack fills the user/team fields from `auth.test`; Discord fills the
/// webhook fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Bot user name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Bot user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Workspace name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Workspace id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Webhook display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Channel the webhook posts to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Server the webhook belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
}

/// Operation-specific success payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Result of a send.
    Sent(SentMessage),
    /// Result of a read.
    Messages(MessageList),
    /// Result of a reaction.
    Reacted(Reaction),
    /// Result of an upload.
    Uploaded(UploadedFile),
    /// Result of a channel listing.
    Channels(ChannelList),
    /// Result of a credential check.
    Identity(Identity),
}

/// Structured failure returned as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Failure category.
    pub kind: ErrorKind,
    /// Machine readable code; backend codes are verbatim.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// HTTP status, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Where to obtain a missing credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl From<RelayError> for Failure {
    fn from(err: RelayError) -> Self {
        Self {
            kind: err.kind(),
            code: err.code().to_string(),
            status: err.status(),
            help: err.help().map(str::to_string),
            message: err.to_string(),
        }
    }
}

/// The single result shape every dispatch produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageResult {
    /// The operation succeeded on `platform`.
    Success {
        /// Platform that served the call.
        platform: Platform,
        /// Operation-specific payload.
        payload: Payload,
    },
    /// The operation failed; nothing was retried.
    Failure(Failure),
}

impl MessageResult {
    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failure(failure) => Some(failure),
            Self::Success { .. } => None,
        }
    }

    /// The success payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure(_) => None,
        }
    }
}

impl From<RelayError> for MessageResult {
    fn from(err: RelayError) -> Self {
        Self::Failure(err.into())
    }
}

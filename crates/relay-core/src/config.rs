use crate::error::{RelayError, RelayResult};
use crate::message::Platform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the Slack bot token.
pub const SLACK_BOT_TOKEN_VAR: &str = "SLACK_BOT_TOKEN";
/// Environment variable holding the Discord webhook URL.
pub const DISCORD_WEBHOOK_URL_VAR: &str = "DISCORD_WEBHOOK_URL";

/// Where to create a Slack bot token.
pub const SLACK_HELP: &str = "Get a bot token at https://api.slack.com/apps";
/// Where to create a Discord webhook.
pub const DISCORD_HELP: &str =
    "Create a webhook at https://support.discord.com/hc/en-us/articles/228383668";

/// Production Slack Web API base.
pub const DEFAULT_SLACK_API_BASE: &str = "https://slack.com/api";
/// Per-call HTTP timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Platform credentials, read-only once loaded.
///
/// Empty or whitespace-only values are treated as absent.
#[derive(Clone, Default)]
pub struct Credentials {
    slack_bot_token: Option<String>,
    discord_webhook_url: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("slack_bot_token", &redacted(self.slack_bot_token.as_ref()))
            .field("discord_webhook_url", &redacted(self.discord_webhook_url.as_ref()))
            .finish()
    }
}

fn redacted(value: Option<&String>) -> &'static str {
    if value.is_some() {
        "[REDACTED]"
    } else {
        "<unset>"
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Credentials {
    /// Reads `SLACK_BOT_TOKEN` and `DISCORD_WEBHOOK_URL` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds credentials from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            slack_bot_token: non_empty(lookup(SLACK_BOT_TOKEN_VAR)),
            discord_webhook_url: non_empty(lookup(DISCORD_WEBHOOK_URL_VAR)),
        }
    }

    /// Sets the Slack bot token.
    pub fn with_slack_bot_token(mut self, token: impl Into<String>) -> Self {
        self.slack_bot_token = non_empty(Some(token.into()));
        self
    }

    /// Sets the Discord webhook URL.
    pub fn with_discord_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.discord_webhook_url = non_empty(Some(url.into()));
        self
    }

    /// The Slack bot token, or a configuration error naming the variable.
    pub fn slack_bot_token(&self) -> RelayResult<&str> {
        self.slack_bot_token
            .as_deref()
            .ok_or_else(|| RelayError::missing_config(SLACK_BOT_TOKEN_VAR, SLACK_HELP))
    }

    /// The Discord webhook URL, or a configuration error naming the variable.
    pub fn discord_webhook_url(&self) -> RelayResult<&str> {
        self.discord_webhook_url
            .as_deref()
            .ok_or_else(|| RelayError::missing_config(DISCORD_WEBHOOK_URL_VAR, DISCORD_HELP))
    }

    /// Fails when the credential for `platform` is absent.
    pub fn require(&self, platform: Platform) -> RelayResult<()> {
        match platform {
            Platform::Slack => self.slack_bot_token().map(|_| ()),
            Platform::Discord => self.discord_webhook_url().map(|_| ()),
        }
    }
}

/// HTTP settings loadable from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Slack Web API base URL.
    #[serde(default = "default_slack_api_base")]
    pub slack_api_base: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_slack_api_base() -> String {
    DEFAULT_SLACK_API_BASE.to_string()
}

impl HttpSettings {
    /// Rejects settings no call could succeed with.
    pub fn validate(&self) -> RelayResult<()> {
        if self.timeout_secs == 0 {
            return Err(RelayError::Config("timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            slack_api_base: default_slack_api_base(),
        }
    }
}

/// Everything an adapter needs to make one call.
#[derive(Debug, Clone)]
pub struct MessagingConfig {
    /// Platform credentials.
    pub credentials: Credentials,
    /// Per-call HTTP timeout.
    pub timeout: Duration,
    /// Slack Web API base URL, without a trailing slash.
    pub slack_api_base: String,
}

impl MessagingConfig {
    /// Creates a configuration with default HTTP settings.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            slack_api_base: DEFAULT_SLACK_API_BASE.to_string(),
        }
    }

    /// Reads credentials from the environment with default HTTP settings.
    pub fn from_env() -> Self {
        Self::new(Credentials::from_env())
    }

    /// Applies settings loaded from a config file.
    pub fn with_settings(self, settings: &HttpSettings) -> Self {
        self.with_timeout(Duration::from_secs(settings.timeout_secs))
            .with_slack_api_base(&settings.slack_api_base)
    }

    /// Overrides the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the Slack API base URL.
    pub fn with_slack_api_base(mut self, base: impl Into<String>) -> Self {
        self.slack_api_base = base.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}

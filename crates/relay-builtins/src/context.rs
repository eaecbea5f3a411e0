use relay_channels::{render, CapabilityRouter};
use relay_core::{
    HttpSettings, MessageRequest, MessagingConfig, RelayResult, ToolCall, ToolResult,
};
use serde_json::Value;
use tracing::debug;

/// Where the messaging tools take their credentials from.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Read `SLACK_BOT_TOKEN` / `DISCORD_WEBHOOK_URL` on every call.
    Env(HttpSettings),
    /// A fixed configuration, typically built in tests or by an embedding host.
    Fixed(MessagingConfig),
}

impl CredentialSource {
    /// Environment credentials with default HTTP settings.
    pub fn env() -> Self {
        Self::Env(HttpSettings::default())
    }

    /// The configuration for one call.
    pub fn config(&self) -> MessagingConfig {
        match self {
            Self::Env(settings) => MessagingConfig::from_env().with_settings(settings),
            Self::Fixed(config) => config.clone(),
        }
    }
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::env()
    }
}

/// Dispatch `request` and wrap the rendered result for `call`.
pub(crate) async fn dispatch(
    source: &CredentialSource,
    call: &ToolCall,
    platform: &str,
    request: MessageRequest,
) -> RelayResult<ToolResult> {
    let operation = request.operation();
    debug!(tool = %call.name, call_id = %call.id, platform, "Running messaging tool");

    let result = CapabilityRouter::new(source.config())
        .dispatch(platform, request)
        .await;
    let body = serde_json::to_string(&render(operation, &result))?;

    Ok(if result.is_success() {
        ToolResult::success(&call.id, body)
    } else {
        ToolResult::error(&call.id, body)
    })
}

// Argument readers. Values of the wrong JSON type count as absent.

pub(crate) fn string_arg(args: &Value, key: &str) -> String {
    args[key].as_str().unwrap_or_default().to_string()
}

pub(crate) fn optional_arg(args: &Value, key: &str) -> Option<String> {
    args[key]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Integers may also arrive as `150.0` or `"150"`; fractions are truncated.
pub(crate) fn int_arg(args: &Value, key: &str, default: i64) -> i64 {
    match &args[key] {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_to_int)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
        }
        _ => None,
    }
    .unwrap_or(default)
}

fn float_to_int(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}

pub(crate) fn bool_arg(args: &Value, key: &str, default: bool) -> bool {
    args[key].as_bool().unwrap_or(default)
}

/// Platform for the tools that only Slack implements fully.
pub(crate) fn platform_or_slack(args: &Value) -> String {
    optional_arg(args, "platform").unwrap_or_else(|| "slack".to_string())
}

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A convenience `Result` alias using [`RelayError`].
pub type RelayResult<T> = Result<T, RelayError>;

/// Externally visible failure category.
///
/// Every [`RelayError`] maps onto exactly one kind, which is what callers
/// branch on after the result has been normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A token or webhook URL required by the platform is absent.
    ConfigurationMissing,
    /// A required argument is missing or the platform is unknown.
    Validation,
    /// The operation is not available on the selected platform.
    CapabilityUnsupported,
    /// The platform API answered with a failure code.
    Backend,
    /// The request never produced a usable response (network, timeout).
    Transport,
    /// The platform asked us to slow down (HTTP 429 or `ratelimited`).
    RateLimited,
}

impl ErrorKind {
    /// Snake-case name used in rendered results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "configuration_missing",
            Self::Validation => "validation",
            Self::CapabilityUnsupported => "capability_unsupported",
            Self::Backend => "backend",
            Self::Transport => "transport",
            Self::RateLimited => "rate_limited",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error type for the Relay workspace.
///
/// Adapters return these through `?`; the result normalizer turns them into
/// data before anything reaches a caller.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A credential needed for the platform is not configured.
    #[error("{message}")]
    ConfigurationMissing {
        /// Human readable message naming the missing variable.
        message: String,
        /// Where to obtain the credential.
        help: Option<String>,
    },

    /// An argument failed validation before any network call.
    #[error("{0}")]
    Validation(String),

    /// The selected platform does not implement the operation.
    #[error("{0}")]
    CapabilityUnsupported(String),

    /// The platform API reported a failure; `code` is passed through verbatim.
    #[error("{message}")]
    Backend {
        /// Backend error code (`channel_not_found`, `http_404`, ...).
        code: String,
        /// Human readable detail.
        message: String,
        /// HTTP status, when one was received.
        status: Option<u16>,
    },

    /// The platform rejected the call because of rate limiting.
    #[error("{message}")]
    RateLimited {
        /// `ratelimited` for Slack envelopes, `http_429` for raw statuses.
        code: String,
        /// Human readable detail.
        message: String,
        /// HTTP status, when one was received.
        status: Option<u16>,
    },

    /// Network failure or timeout.
    #[error("{message}")]
    Transport {
        /// `timeout` or `network_error`.
        code: String,
        /// Human readable detail.
        message: String,
    },

    /// Unknown tool or malformed tool invocation.
    #[error("Skill error: {0}")]
    Skill(String),

    /// Invalid configuration file or client settings.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    /// Error for an absent credential variable.
    pub fn missing_config(var: &str, help: impl Into<String>) -> Self {
        Self::ConfigurationMissing {
            message: format!("{var} environment variable not set"),
            help: Some(help.into()),
        }
    }

    /// Error for a failure reported by a platform API.
    ///
    /// Slack's `ratelimited` code and HTTP 429 are classified as
    /// [`RelayError::RateLimited`]; everything else stays a backend error.
    pub fn backend(code: impl Into<String>, message: impl Into<String>, status: Option<u16>) -> Self {
        let code = code.into();
        let message = message.into();
        if code == "ratelimited" || status == Some(429) {
            Self::RateLimited {
                code,
                message,
                status,
            }
        } else {
            Self::Backend {
                code,
                message,
                status,
            }
        }
    }

    /// Error for a request that timed out.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Transport {
            code: "timeout".to_string(),
            message: message.into(),
        }
    }

    /// Error for any other network failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            code: "network_error".to_string(),
            message: message.into(),
        }
    }

    /// The externally visible category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigurationMissing { .. } | Self::Config(_) => ErrorKind::ConfigurationMissing,
            Self::Validation(_) | Self::Skill(_) => ErrorKind::Validation,
            Self::CapabilityUnsupported(_) => ErrorKind::CapabilityUnsupported,
            Self::Backend { .. } | Self::Json(_) => ErrorKind::Backend,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Transport { .. } | Self::Io(_) => ErrorKind::Transport,
        }
    }

    /// Machine readable code; backend codes are returned unchanged.
    pub fn code(&self) -> &str {
        match self {
            Self::ConfigurationMissing { .. } => "configuration_missing",
            Self::Validation(_) => "validation_error",
            Self::CapabilityUnsupported(_) => "capability_unsupported",
            Self::Backend { code, .. }
            | Self::RateLimited { code, .. }
            | Self::Transport { code, .. } => code,
            Self::Skill(_) => "unknown_tool",
            Self::Config(_) => "invalid_config",
            Self::Json(_) => "invalid_response",
            Self::Io(_) => "io_error",
        }
    }

    /// HTTP status attached to backend and rate-limit errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } | Self::RateLimited { status, .. } => *status,
            _ => None,
        }
    }

    /// Help text attached to configuration errors.
    pub fn help(&self) -> Option<&str> {
        match self {
            Self::ConfigurationMissing { help, .. } => help.as_deref(),
            _ => None,
        }
    }
}

//! Slack and Discord adapters behind one capability-based interface.
//!
//! Provides the [`MessagingPlatform`] trait, its two implementations, the
//! [`CapabilityRouter`] that picks an adapter per request, and the result
//! normalizer that turns every outcome into a [`relay_core::MessageResult`].
//!
//! # Main types
//!
//! - [`MessagingPlatform`] — Trait implemented by each backend adapter.
//! - [`CapabilityRouter`] — Validates a request and forwards it to an adapter.
//! - [`SlackPlatform`] — Slack Web API adapter (bot token).
//! - [`DiscordPlatform`] — Discord incoming-webhook adapter.

/// Discord webhook adapter.
pub mod discord;
/// Markdown, Block Kit, and embed helpers.
pub mod format;
/// Envelope checks and result rendering.
pub mod normalize;
/// The adapter trait.
pub mod platform;
/// Platform selection and pre-flight checks.
pub mod router;
/// Slack Web API adapter.
pub mod slack;

pub use discord::DiscordPlatform;
pub use format::DiscordEmbed;
pub use normalize::{normalize, render};
pub use platform::MessagingPlatform;
pub use router::CapabilityRouter;
pub use slack::SlackPlatform;

//! The messaging tools exposed to agents.
//!
//! Each tool parses its JSON arguments, hands a [`relay_core::MessageRequest`]
//! to the [`relay_channels::CapabilityRouter`], and returns the rendered
//! result as JSON text. Failures come back as data with
//! [`relay_core::ToolResult::is_error`] set; no tool returns `Err` for an
//! operational failure.
//!
//! # Main entry points
//!
//! - [`register_messaging_tools()`] — Register all six tools.
//! - [`CredentialSource`] — Where the tools read credentials from.

/// Credential lookup and the shared dispatch path.
pub mod context;
/// `messaging_list_channels`.
pub mod list_channels;
/// `messaging_react`.
pub mod react;
/// `messaging_read`.
pub mod read;
/// `messaging_send`.
pub mod send;
/// `messaging_upload`.
pub mod upload;
/// `messaging_validate`.
pub mod validate;

pub use context::CredentialSource;
pub use list_channels::ListChannelsSkill;
pub use react::ReactSkill;
pub use read::ReadSkill;
pub use send::SendSkill;
pub use upload::UploadSkill;
pub use validate::ValidateSkill;

use relay_skills::SkillRegistry;
use std::sync::Arc;

/// Register the six messaging tools into the given registry.
pub fn register_messaging_tools(registry: &mut SkillRegistry, source: CredentialSource) {
    registry.register(Arc::new(SendSkill::new(source.clone())));
    registry.register(Arc::new(ReadSkill::new(source.clone())));
    registry.register(Arc::new(ReactSkill::new(source.clone())));
    registry.register(Arc::new(UploadSkill::new(source.clone())));
    registry.register(Arc::new(ListChannelsSkill::new(source.clone())));
    registry.register(Arc::new(ValidateSkill::new(source)));
}

//! Tool abstraction shared by every Relay tool.
//!
//! A [`Skill`] is one callable tool with a JSON-schema descriptor; the
//! [`SkillRegistry`] looks tools up by name and runs [`relay_core::ToolCall`]s
//! against them.

/// Tool registry.
pub mod registry;
/// The skill trait and descriptor.
pub mod skill;

pub use registry::SkillRegistry;
pub use skill::{Skill, SkillDescriptor};

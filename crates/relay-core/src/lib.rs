//! Core types and error definitions for the Relay messaging tools.
//!
//! This crate holds everything shared between the platform adapters, the
//! tool layer, and the command-line wrapper: the error taxonomy, the closed
//! set of platforms and operations, request and result shapes, credentials,
//! and tool-call types.
//!
//! # Main types
//!
//! - [`RelayError`] — Unified error enum; [`RelayResult`] is the alias.
//! - [`ErrorKind`] — The externally visible failure category.
//! - [`Platform`] / [`Operation`] — Backends and the capabilities they declare.
//! - [`MessageRequest`] — One operation with its arguments.
//! - [`MessageResult`] — `Success(payload)` or a structured [`Failure`].
//! - [`MessagingConfig`] — Credentials plus HTTP settings for one call.
//! - [`ToolCall`] / [`ToolResult`] — Agent tool invocation types.

/// Credentials and HTTP settings.
pub mod config;
/// Error taxonomy.
pub mod error;
/// Platforms, operations, requests, and results.
pub mod message;
/// Tool invocation types.
pub mod tool;

pub use config::{Credentials, HttpSettings, MessagingConfig};
pub use error::{ErrorKind, RelayError, RelayResult};
pub use message::{
    ChannelDescriptor, ChannelList, Failure, Identity, ListChannelsArgs, MessageDescriptor,
    MessageList, MessageRequest, MessageResult, Operation, Payload, Platform, ReactArgs,
    Reaction, ReadArgs, SendArgs, SentMessage, UploadArgs, UploadedFile,
};
pub use tool::{ToolCall, ToolResult};

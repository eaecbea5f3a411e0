use async_trait::async_trait;
use relay_core::{
    ChannelList, Identity, ListChannelsArgs, MessageList, MessageRequest, Operation, Payload,
    Platform, ReactArgs, Reaction, ReadArgs, RelayError, RelayResult, SendArgs, SentMessage,
    UploadArgs, UploadedFile,
};
use std::time::Duration;

/// A messaging backend adapter.
///
/// Each adapter implements the operations its [`Platform`] declares in
/// [`Platform::capabilities`]. The remaining methods keep their default
/// bodies, which fail with [`RelayError::CapabilityUnsupported`] without
/// touching the network.
#[async_trait]
pub trait MessagingPlatform: Send + Sync {
    /// The platform this adapter talks to.
    fn platform(&self) -> Platform;

    /// Post a message.
    async fn send_message(&self, args: &SendArgs) -> RelayResult<SentMessage>;

    /// Upload a text file.
    async fn upload_file(&self, args: &UploadArgs) -> RelayResult<UploadedFile>;

    /// Check that the configured credentials work.
    async fn validate_credentials(&self) -> RelayResult<Identity>;

    /// Fetch recent messages, newest first.
    async fn get_messages(&self, _args: &ReadArgs) -> RelayResult<MessageList> {
        Err(unsupported(self.platform(), Operation::Read))
    }

    /// React to a message with an emoji.
    async fn add_reaction(&self, _args: &ReactArgs) -> RelayResult<Reaction> {
        Err(unsupported(self.platform(), Operation::React))
    }

    /// List channels visible to the credentials.
    async fn list_channels(&self, _args: &ListChannelsArgs) -> RelayResult<ChannelList> {
        Err(unsupported(self.platform(), Operation::ListChannels))
    }

    /// Run any request, wrapping the typed outcome in a [`Payload`].
    async fn execute(&self, request: &MessageRequest) -> RelayResult<Payload> {
        let payload = match request {
            MessageRequest::Send(args) => Payload::Sent(self.send_message(args).await?),
            MessageRequest::Read(args) => Payload::Messages(self.get_messages(args).await?),
            MessageRequest::React(args) => Payload::Reacted(self.add_reaction(args).await?),
            MessageRequest::Upload(args) => Payload::Uploaded(self.upload_file(args).await?),
            MessageRequest::ListChannels(args) => {
                Payload::Channels(self.list_channels(args).await?)
            }
            MessageRequest::Validate => Payload::Identity(self.validate_credentials().await?),
        };
        Ok(payload)
    }
}

/// The error returned for an operation outside a platform's capabilities.
pub fn unsupported(platform: Platform, operation: Operation) -> RelayError {
    let reason = match platform {
        Platform::Discord => " (webhooks can only send messages and upload files)",
        Platform::Slack => "",
    };
    RelayError::CapabilityUnsupported(format!(
        "{operation} is not supported on {}{reason}",
        platform.display_name()
    ))
}

/// Build the HTTP client shared by one adapter instance.
pub(crate) fn build_client(timeout: Duration) -> RelayResult<reqwest::Client> {
    if timeout.is_zero() {
        return Err(RelayError::Config("HTTP timeout must be greater than zero".into()));
    }
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| RelayError::Config(format!("Failed to create HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_names_tool_and_platform() {
        let err = unsupported(Platform::Discord, Operation::Read);
        assert_eq!(
            err.to_string(),
            "messaging_read is not supported on Discord (webhooks can only send messages and upload files)"
        );
        assert_eq!(err.kind(), relay_core::ErrorKind::CapabilityUnsupported);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = build_client(Duration::ZERO).err();
        assert!(matches!(err, Some(RelayError::Config(_))));
        assert!(build_client(Duration::from_secs(1)).is_ok());
    }
}

use crate::discord::DiscordPlatform;
use crate::normalize::normalize;
use crate::platform::{unsupported, MessagingPlatform};
use crate::slack::SlackPlatform;
use relay_core::{MessageRequest, MessageResult, MessagingConfig, Platform, RelayResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes a request to the adapter for the named platform.
///
/// Every rejection (unknown platform, bad arguments, unsupported operation,
/// missing credentials) happens before an adapter is built, so none of them
/// reaches the network. Adapters are built from the configuration on each
/// dispatch unless one was registered with [`CapabilityRouter::with_adapter`].
pub struct CapabilityRouter {
    config: MessagingConfig,
    adapters: HashMap<Platform, Arc<dyn MessagingPlatform>>,
}

impl CapabilityRouter {
    /// Create a router that builds adapters from `config`.
    pub fn new(config: MessagingConfig) -> Self {
        Self {
            config,
            adapters: HashMap::new(),
        }
    }

    /// Use `adapter` for its platform instead of building one per dispatch.
    pub fn with_adapter(mut self, adapter: Arc<dyn MessagingPlatform>) -> Self {
        self.adapters.insert(adapter.platform(), adapter);
        self
    }

    /// The configuration this router reads credentials from.
    pub fn config(&self) -> &MessagingConfig {
        &self.config
    }

    /// Return the adapter for `platform`, building it if none was registered.
    pub fn adapter(&self, platform: Platform) -> RelayResult<Arc<dyn MessagingPlatform>> {
        if let Some(adapter) = self.adapters.get(&platform) {
            return Ok(Arc::clone(adapter));
        }
        let adapter: Arc<dyn MessagingPlatform> = match platform {
            Platform::Slack => Arc::new(SlackPlatform::from_config(&self.config)?),
            Platform::Discord => Arc::new(DiscordPlatform::from_config(&self.config)?),
        };
        Ok(adapter)
    }

    /// Run `request` against the platform named by `platform`.
    pub async fn dispatch(&self, platform: &str, request: MessageRequest) -> MessageResult {
        let operation = request.operation();
        let result = match self.route(platform, &request) {
            Ok((platform, adapter)) => {
                debug!(platform = %platform, operation = %operation, "Dispatching messaging request");
                normalize(platform, adapter.execute(&request).await)
            }
            Err(err) => err.into(),
        };

        if let Some(failure) = result.failure() {
            warn!(
                platform,
                operation = %operation,
                kind = %failure.kind,
                code = %failure.code,
                "Messaging request failed"
            );
        }
        result
    }

    fn route(
        &self,
        platform: &str,
        request: &MessageRequest,
    ) -> RelayResult<(Platform, Arc<dyn MessagingPlatform>)> {
        let platform = Platform::parse(platform)?;
        request.validate()?;

        let operation = request.operation();
        if !platform.supports(operation) {
            return Err(unsupported(platform, operation));
        }

        self.config.credentials.require(platform)?;
        Ok((platform, self.adapter(platform)?))
    }
}

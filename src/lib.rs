pub mod errors;
pub mod framework;
pub mod guards;
pub mod ingress;
pub mod message;
pub mod notify;
pub mod policy;
pub mod stores;
pub mod transport;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;
use framework::{CommandFailure, InvocationContext};
use message::InboundMessage;

/// Extension point the gateway delivers every inbound message to.
/// Registered once at startup; [`ingress::MessageClassifier`] is the
/// implementation this crate provides.
#[async_trait]
pub trait MessageHook: Send + Sync {
    /// The returned error is a failure from the command framework; the
    /// gateway dispatcher is expected to hand it to a [`CommandFailureHook`]
    /// and continue, never to crash.
    async fn on_message(&self, message: &InboundMessage) -> Result<(), CommandFailure>;
}

/// Extension point the command framework delivers failures to.
/// [`errors::ErrorDispatcher`] is the implementation this crate provides.
#[async_trait]
pub trait CommandFailureHook: Send + Sync {
    async fn on_command_failure(&self, ctx: &InvocationContext, failure: &CommandFailure);
}

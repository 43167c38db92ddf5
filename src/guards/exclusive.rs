use crate::message::InboundMessage;
use crate::policy::ExclusiveAccess;
use crate::transport::{SendTarget, Transport};
use tracing::{info, warn};

pub const PRIVATE_BOT_NOTICE: &str =
    "Sorry, this is a private bot. You are not on its access list.";

/// Returns true when the author may use the bot. On denial a fixed notice is
/// posted to the channel before returning false.
pub async fn check_access(
    transport: &dyn Transport,
    access: &ExclusiveAccess,
    message: &InboundMessage,
) -> bool {
    if access.allows(message.author.id) {
        return true;
    }

    info!(
        "denied {} ({}): not on the exclusive access list",
        message.author.name, message.author.id
    );
    if let Err(err) = transport
        .send_text(SendTarget::Channel(message.channel_id), PRIVATE_BOT_NOTICE)
        .await
    {
        warn!(
            "could not send access-denied notice to channel {}: {}",
            message.channel_id, err
        );
    }
    false
}

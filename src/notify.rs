//! Degrading delivery for policy notices: direct message first, then a
//! structured message in the originating channel, then plain text with an
//! explicit mention. Permission failures move to the next step; anything
//! else is logged and dropped so a notice can never crash a pipeline run.

use crate::message::{ChannelId, UserId};
use crate::transport::{Notice, SendTarget, Transport};
use tracing::{debug, warn};

pub async fn notify(
    transport: &dyn Transport,
    author: UserId,
    channel: ChannelId,
    notice: &Notice,
    plain_fallback: &str,
) {
    match transport.send_structured(SendTarget::User(author), notice).await {
        Ok(()) => return,
        Err(err) if err.is_forbidden() => {
            debug!(
                "direct message to {} blocked, falling back to channel {}",
                author, channel
            );
        }
        Err(err) => {
            warn!("failed to notify user {} directly: {}", author, err);
            return;
        }
    }

    match transport
        .send_structured(SendTarget::Channel(channel), notice)
        .await
    {
        Ok(()) => return,
        Err(err) if err.is_forbidden() => {
            debug!("structured send to channel {} blocked, falling back to plain text", channel);
        }
        Err(err) => {
            warn!("failed to notify channel {}: {}", channel, err);
            return;
        }
    }

    let text = format!("<@{}> {}", author, plain_fallback);
    if let Err(err) = transport.send_text(SendTarget::Channel(channel), &text).await {
        warn!(
            "all delivery attempts for user {} in channel {} failed: {}",
            author, channel, err
        );
    }
}

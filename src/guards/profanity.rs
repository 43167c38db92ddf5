use crate::message::InboundMessage;
use crate::notify;
use crate::stores::ProfanityWordList;
use crate::transport::{Notice, SendTarget, Transport};
use tracing::{info, warn};

/// Checks a non-command guild message against the profanity word list.
/// Returns true as soon as profanity was detected, even when one of the
/// side-effect steps failed; the caller must stop processing the message
/// either way.
pub async fn check_and_censor(
    transport: &dyn Transport,
    words: &dyn ProfanityWordList,
    mask: char,
    message: &InboundMessage,
) -> bool {
    if !words.contains(&message.content) {
        return false;
    }

    if let Err(err) = transport.delete_message(message).await {
        warn!(
            "could not delete message {} in channel {}: {}",
            message.id, message.channel_id, err
        );
    }

    let censored = words.censor(&message.content, mask);
    if let Err(err) = transport
        .send_text(
            SendTarget::Channel(message.channel_id),
            &format!("{} said: {}", message.author.name, censored),
        )
        .await
    {
        warn!(
            "could not repost censored message in channel {}: {}",
            message.channel_id, err
        );
    }

    let notice = Notice::new(
        "Message censored",
        format!(
            "{}, your message contained a word this server does not allow, so it was removed.",
            message.author.name
        ),
    );
    notify::notify(
        transport,
        message.author.id,
        message.channel_id,
        &notice,
        "your message was removed because it contained a word this server does not allow.",
    )
    .await;

    info!(
        "censored message {} from {} ({}) in channel {}: {}",
        message.id, message.author.name, message.author.id, message.channel_id, message.content
    );
    true
}

use crate::message::InboundMessage;
use crate::policy::BotConfig;
use crate::transport::{Notice, SendTarget, Transport};
use crate::validate;
use tracing::{debug, warn};

/// Always part of the trigger set, alongside the configured words.
pub const GESTURE_WORD: &str = "o7";

const GOOD_REPLY: &str = "Thank you! I do my best.";
const BAD_REPLY: &str = "Bad human. See if I help you again.";
const GENERIC_REPLY: &str = "o7 to you too.";

/// Posts a canned reply when the message contains a trigger word and is
/// addressed at the bot (literal "bot", an explicit mention, or any direct
/// message). Returns true when a reply was posted.
pub async fn check_and_react(
    transport: &dyn Transport,
    config: &BotConfig,
    message: &InboundMessage,
) -> bool {
    let lowered = message.content.to_lowercase();
    let matched = config
        .reaction_words
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(GESTURE_WORD))
        .find(|word| contains_word(&lowered, word));
    let Some(word) = matched else {
        return false;
    };

    let addressed = validate::is_direct_message(message)
        || contains_word(&lowered, "bot")
        || message.mentions_user(config.bot_id);
    if !addressed {
        return false;
    }

    let reply = match word {
        "good" => GOOD_REPLY,
        "bad" => BAD_REPLY,
        _ => GENERIC_REPLY,
    };
    debug!(
        "reacting to trigger word {:?} from {} in channel {}",
        word, message.author.name, message.channel_id
    );
    let notice = Notice::new(format!("Hey, {}", message.author.name), reply);
    if let Err(err) = transport
        .send_structured(SendTarget::Channel(message.channel_id), &notice)
        .await
    {
        warn!(
            "could not post reaction reply in channel {}: {}",
            message.channel_id, err
        );
    }
    true
}

fn contains_word(lowered: &str, word: &str) -> bool {
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

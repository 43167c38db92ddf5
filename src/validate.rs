//! Stateless predicates over a raw inbound message. No side effects here;
//! routing decisions live in `ingress`.

use crate::framework::InvocationContext;
use crate::message::{Author, InboundMessage, Presence};

pub fn has_content(message: &InboundMessage) -> bool {
    !message.content.is_empty()
}

pub fn is_from_bot(author: &Author) -> bool {
    author.bot
}

pub fn is_direct_message(message: &InboundMessage) -> bool {
    message.guild_id.is_none()
}

pub fn is_command_attempt(ctx: &InvocationContext) -> bool {
    ctx.prefix.as_deref().is_some_and(|p| !p.is_empty())
}

pub fn is_member_invisible(author: &Author) -> bool {
    author.presence == Presence::Offline
}

/// Anything non-alphabetic right after the prefix (`!!`, `!?`, `!1`) is not a
/// real command attempt and gets ignored silently.
pub fn has_doubled_prefix(text: &str) -> bool {
    let mut chars = text.chars();
    if chars.next().is_none() {
        return false;
    }
    match chars.next() {
        Some(second) => !second.is_alphabetic(),
        None => false,
    }
}

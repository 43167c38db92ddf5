use crate::message::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-guild configuration snapshot, fetched fresh from the config store on
/// every message. A guild with no stored policy is a handled state, not an
/// error (the store returns `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildPolicy {
    pub block_invisible_members: bool,
    pub profanity_filter_enabled: bool,
    pub bot_word_reactions_enabled: bool,
    // Notification toggles read by the join/leave announcer, not by the
    // ingress pipeline.
    #[serde(default)]
    pub notify_joins: bool,
    #[serde(default)]
    pub notify_leaves: bool,
}

/// Optional allow-list restricting command use to specific users.
/// An empty set and `Open` both mean "allow everyone".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusiveAccess {
    #[default]
    Open,
    Single(UserId),
    Set(HashSet<UserId>),
}

impl ExclusiveAccess {
    pub fn allows(&self, user: UserId) -> bool {
        match self {
            ExclusiveAccess::Open => true,
            ExclusiveAccess::Single(id) => *id == user,
            ExclusiveAccess::Set(ids) => ids.is_empty() || ids.contains(&user),
        }
    }
}

/// Process-wide bot settings, loaded once at startup by the surrounding
/// application and passed into each guard call. The pipeline never mutates
/// this.
#[derive(Clone, Deserialize)]
pub struct BotConfig {
    pub bot_id: UserId,
    pub owner_id: UserId,
    /// Words that can trigger a canned reaction when the bot is addressed.
    pub reaction_words: Vec<String>,
    /// Commands allowed in direct messages. `None` disables DM commands
    /// entirely.
    pub dm_allowed_commands: Option<Vec<String>>,
    pub exclusive_access: ExclusiveAccess,
    #[serde(default = "default_profanity_mask")]
    pub profanity_mask: char,
}

fn default_profanity_mask() -> char {
    '*'
}

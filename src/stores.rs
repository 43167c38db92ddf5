//! Read-only collaborator stores the pipeline consults on every message.

use crate::message::{ChannelId, GuildId};
use crate::policy::GuildPolicy;
use async_trait::async_trait;

/// Admin-defined per-guild canned response. Custom commands shadow built-in
/// commands with the same name.
#[derive(Debug, Clone)]
pub struct CustomCommand {
    pub name: String,
    pub response: String,
}

#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Returns the stored policy for a guild/channel pair, or `None` when the
    /// guild has never been configured.
    async fn guild_policy(&self, guild: GuildId, channel: ChannelId) -> Option<GuildPolicy>;
}

#[async_trait]
pub trait CustomCommandStore: Send + Sync {
    async fn lookup(&self, guild: GuildId, name: &str) -> Option<CustomCommand>;
}

/// Profanity word list, loaded once at startup and read-only afterwards.
pub trait ProfanityWordList: Send + Sync {
    fn contains(&self, text: &str) -> bool;
    fn censor(&self, text: &str, mask: char) -> String;
}

/// In-memory word list with case-insensitive whole-word matching.
pub struct StaticWordList {
    words: Vec<String>,
}

impl StaticWordList {
    pub fn new(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }
}

impl StaticWordList {
    fn is_listed(&self, token: &str) -> bool {
        let lowered = token.to_lowercase();
        self.words.iter().any(|w| *w == lowered)
    }

    fn flush_token(&self, out: &mut String, token: &mut String, mask: char) {
        if token.is_empty() {
            return;
        }
        if self.is_listed(token) {
            out.extend(std::iter::repeat(mask).take(token.chars().count()));
        } else {
            out.push_str(token);
        }
        token.clear();
    }
}

impl ProfanityWordList for StaticWordList {
    fn contains(&self, text: &str) -> bool {
        text.split(|c: char| !c.is_alphanumeric())
            .any(|token| !token.is_empty() && self.is_listed(token))
    }

    // Same tokenization as `contains`: alphanumeric runs are words, anything
    // else is a separator. The output is rebuilt token by token so only whole
    // listed words get masked.
    fn censor(&self, text: &str, mask: char) -> String {
        let mut out = String::with_capacity(text.len());
        let mut token = String::new();
        for c in text.chars() {
            if c.is_alphanumeric() {
                token.push(c);
            } else {
                self.flush_token(&mut out, &mut token, mask);
                out.push(c);
            }
        }
        self.flush_token(&mut out, &mut token, mask);
        out
    }
}

//! Shared recording mocks for pipeline tests. The transport records every
//! successful effect in call order so tests can assert exact send/delete
//! sequences.

use crate::framework::{CommandFailure, CommandFramework, InvocationContext};
use crate::ingress::MessageClassifier;
use crate::message::{
    Author, ChannelId, GuildId, InboundMessage, MessageId, Presence, UserId,
};
use crate::policy::{BotConfig, ExclusiveAccess, GuildPolicy};
use crate::stores::{ConfigStore, CustomCommand, CustomCommandStore, StaticWordList};
use crate::transport::{Notice, SendTarget, Transport, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        target: SendTarget,
        text: String,
    },
    Structured {
        target: SendTarget,
        title: String,
        body: String,
    },
    Deleted {
        message_id: MessageId,
    },
}

#[derive(Default)]
pub struct RecordingTransport {
    log: Mutex<Vec<Sent>>,
    attempts: AtomicUsize,
    forbid_user: bool,
    forbid_channel_structured: bool,
    fail_all: bool,
}

impl RecordingTransport {
    pub fn forbid_user_sends(mut self) -> Self {
        self.forbid_user = true;
        self
    }

    pub fn forbid_channel_structured(mut self) -> Self {
        self.forbid_channel_structured = true;
        self
    }

    pub fn fail_all_sends(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Every effect that succeeded, in call order.
    pub fn sent(&self) -> Vec<Sent> {
        self.log.lock().unwrap().clone()
    }

    /// Every transport call, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn record(&self, entry: Sent) {
        self.log.lock().unwrap().push(entry);
    }

    fn gate(&self, target: SendTarget, structured: bool) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(anyhow::anyhow!("transport unavailable").into());
        }
        if self.forbid_user && matches!(target, SendTarget::User(_)) {
            return Err(TransportError::Forbidden("DMs closed".to_string()));
        }
        if structured && self.forbid_channel_structured && matches!(target, SendTarget::Channel(_))
        {
            return Err(TransportError::Forbidden("no embed permission".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn delete_message(&self, message: &InboundMessage) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(anyhow::anyhow!("transport unavailable").into());
        }
        self.record(Sent::Deleted {
            message_id: message.id,
        });
        Ok(())
    }

    async fn send_text(&self, target: SendTarget, text: &str) -> Result<(), TransportError> {
        self.gate(target, false)?;
        self.record(Sent::Text {
            target,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_structured(
        &self,
        target: SendTarget,
        notice: &Notice,
    ) -> Result<(), TransportError> {
        self.gate(target, true)?;
        self.record(Sent::Structured {
            target,
            title: notice.title.clone(),
            body: notice.body.clone(),
        });
        Ok(())
    }
}

pub struct StubFramework {
    known: Vec<&'static str>,
    invoked: Mutex<Vec<MessageId>>,
    failure: Option<CommandFailure>,
}

impl Default for StubFramework {
    fn default() -> Self {
        Self {
            known: vec!["roll", "help", "gw2", "ping"],
            invoked: Mutex::new(Vec::new()),
            failure: None,
        }
    }
}

impl StubFramework {
    pub fn invoked(&self) -> Vec<MessageId> {
        self.invoked.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandFramework for StubFramework {
    async fn resolve(&self, message: &InboundMessage) -> InvocationContext {
        let prefix = message.content.starts_with('!').then(|| "!".to_string());
        let mut command = None;
        let mut subcommand = None;
        if prefix.is_some() {
            let mut tokens = message.content[1..].split_whitespace();
            if let Some(first) = tokens.next() {
                if self.known.iter().any(|k| k.eq_ignore_ascii_case(first)) {
                    command = Some(first.to_lowercase());
                    subcommand = tokens.next().map(str::to_lowercase);
                }
            }
        }
        InvocationContext {
            message: message.clone(),
            prefix,
            command,
            subcommand,
        }
    }

    async fn invoke(&self, message: &InboundMessage) -> Result<(), CommandFailure> {
        self.invoked.lock().unwrap().push(message.id);
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    async fn help_text(&self, command: &str) -> Option<String> {
        (command == "owner").then(|| "!owner announce <text> | !owner shutdown".to_string())
    }
}

#[derive(Default)]
pub struct StubConfigStore {
    policy: Mutex<Option<GuildPolicy>>,
}

#[async_trait]
impl ConfigStore for StubConfigStore {
    async fn guild_policy(&self, _guild: GuildId, _channel: ChannelId) -> Option<GuildPolicy> {
        self.policy.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct StubCustomCommands {
    commands: Mutex<HashMap<(GuildId, String), String>>,
}

#[async_trait]
impl CustomCommandStore for StubCustomCommands {
    async fn lookup(&self, guild: GuildId, name: &str) -> Option<CustomCommand> {
        self.commands
            .lock()
            .unwrap()
            .get(&(guild, name.to_string()))
            .map(|response| CustomCommand {
                name: name.to_string(),
                response: response.clone(),
            })
    }
}

pub fn guild_message(content: &str) -> InboundMessage {
    InboundMessage {
        id: MessageId(1),
        content: content.to_string(),
        author: Author {
            id: UserId(100),
            name: "tester".to_string(),
            bot: false,
            presence: Presence::Online,
        },
        channel_id: ChannelId(200),
        guild_id: Some(GuildId(500)),
        mentions: Vec::new(),
    }
}

pub fn dm_message(content: &str) -> InboundMessage {
    let mut message = guild_message(content);
    message.guild_id = None;
    message
}

pub fn bot_config() -> BotConfig {
    BotConfig {
        bot_id: UserId(1),
        owner_id: UserId(777),
        reaction_words: vec!["good".to_string(), "bad".to_string()],
        dm_allowed_commands: None,
        exclusive_access: ExclusiveAccess::Open,
        profanity_mask: '*',
    }
}

pub fn guild_policy() -> GuildPolicy {
    GuildPolicy {
        block_invisible_members: false,
        profanity_filter_enabled: false,
        bot_word_reactions_enabled: false,
        notify_joins: false,
        notify_leaves: false,
    }
}

/// A fully wired classifier over recording mocks.
pub struct Pipeline {
    pub transport: Arc<RecordingTransport>,
    pub framework: Arc<StubFramework>,
    pub config_store: Arc<StubConfigStore>,
    pub custom_commands: Arc<StubCustomCommands>,
    pub words: Arc<StaticWordList>,
    pub config: BotConfig,
}

impl Pipeline {
    pub fn new(config: BotConfig) -> Self {
        init_tracing();
        Self {
            transport: Arc::new(RecordingTransport::default()),
            framework: Arc::new(StubFramework::default()),
            config_store: Arc::new(StubConfigStore::default()),
            custom_commands: Arc::new(StubCustomCommands::default()),
            words: Arc::new(StaticWordList::new(["darn"])),
            config,
        }
    }

    pub fn with_policy(self, policy: GuildPolicy) -> Self {
        *self.config_store.policy.lock().unwrap() = Some(policy);
        self
    }

    pub fn with_custom_command(self, guild: GuildId, name: &str, response: &str) -> Self {
        self.custom_commands
            .commands
            .lock()
            .unwrap()
            .insert((guild, name.to_string()), response.to_string());
        self
    }

    pub fn classifier(&self) -> MessageClassifier {
        MessageClassifier::new(
            self.transport.clone(),
            self.framework.clone(),
            self.config_store.clone(),
            self.custom_commands.clone(),
            self.words.clone(),
            self.config.clone(),
        )
    }
}

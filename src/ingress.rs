//! Entry point for the "message received" extension point: validates the raw
//! message, resolves an invocation context, and routes it through the DM or
//! guild guard chain before (maybe) forwarding to the command framework.
//!
//! Guard outcomes are intentional short-circuits, never errors. The only
//! error that leaves this module is a `CommandFailure` from the framework
//! itself, which the gateway dispatcher hands to the error dispatcher.

use crate::framework::{CommandFailure, CommandFramework, InvocationContext};
use crate::guards::{exclusive, profanity, reaction};
use crate::message::{ChannelId, InboundMessage};
use crate::notify;
use crate::policy::BotConfig;
use crate::stores::{ConfigStore, CustomCommandStore, ProfanityWordList};
use crate::transport::{Notice, SendTarget, Transport};
use crate::validate;
use crate::MessageHook;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const DM_REJECTION: &str = "I do not accept direct messages. Talk to me on a server instead.";
const NO_DM_COMMANDS: &str = "No commands are allowed in direct messages.";
const OWNER_DM_NOTICE: &str =
    "Hello, owner. These are the commands you can run from a direct message:";

pub struct MessageClassifier {
    transport: Arc<dyn Transport>,
    framework: Arc<dyn CommandFramework>,
    config_store: Arc<dyn ConfigStore>,
    custom_commands: Arc<dyn CustomCommandStore>,
    profanity: Arc<dyn ProfanityWordList>,
    config: BotConfig,
}

impl MessageClassifier {
    pub fn new(
        transport: Arc<dyn Transport>,
        framework: Arc<dyn CommandFramework>,
        config_store: Arc<dyn ConfigStore>,
        custom_commands: Arc<dyn CustomCommandStore>,
        profanity: Arc<dyn ProfanityWordList>,
        config: BotConfig,
    ) -> Self {
        Self {
            transport,
            framework,
            config_store,
            custom_commands,
            profanity,
            config,
        }
    }

    pub async fn handle(&self, message: &InboundMessage) -> Result<(), CommandFailure> {
        if !validate::has_content(message) {
            return Ok(());
        }
        if validate::is_from_bot(&message.author) {
            // Bot-authored messages never go through the guard chain.
            debug!("forwarding bot-authored message {} unguarded", message.id);
            return self.framework.invoke(message).await;
        }

        let ctx = self.framework.resolve(message).await;
        let command_attempt = validate::is_command_attempt(&ctx);
        if validate::is_direct_message(message) {
            self.route_direct(&ctx, command_attempt).await
        } else {
            self.route_guild(&ctx, command_attempt).await
        }
    }

    async fn route_direct(
        &self,
        ctx: &InvocationContext,
        command_attempt: bool,
    ) -> Result<(), CommandFailure> {
        let message = &ctx.message;

        if !command_attempt {
            // Every DM satisfies the "mentions the bot" condition, so any
            // trigger word fires here.
            if reaction::check_and_react(self.transport.as_ref(), &self.config, message).await {
                return Ok(());
            }
            if message.author.id == self.config.owner_id {
                self.post_notice(
                    message.channel_id,
                    &Notice::new("Owner help", OWNER_DM_NOTICE),
                )
                .await;
                if let Some(help) = self.framework.help_text("owner").await {
                    self.say(message.channel_id, &help).await;
                }
            } else {
                self.say(message.channel_id, DM_REJECTION).await;
            }
            return Ok(());
        }

        if !exclusive::check_access(
            self.transport.as_ref(),
            &self.config.exclusive_access,
            message,
        )
        .await
        {
            return Ok(());
        }

        let Some(allowed) = &self.config.dm_allowed_commands else {
            self.say(message.channel_id, NO_DM_COMMANDS).await;
            return Ok(());
        };
        let name = ctx.invoked_name().unwrap_or_default();
        if allowed.iter().any(|c| c.eq_ignore_ascii_case(&name)) {
            return self.framework.invoke(message).await;
        }

        let listing = allowed
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", ");
        self.say(
            message.channel_id,
            &format!("`{name}` is not allowed in direct messages. Allowed commands: {listing}"),
        )
        .await;
        Ok(())
    }

    async fn route_guild(
        &self,
        ctx: &InvocationContext,
        command_attempt: bool,
    ) -> Result<(), CommandFailure> {
        let message = &ctx.message;
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };

        let Some(policy) = self
            .config_store
            .guild_policy(guild_id, message.channel_id)
            .await
        else {
            warn!(
                "no stored policy for guild {} channel {}",
                guild_id, message.channel_id
            );
            // Fail open for commands so an unconfigured guild still works.
            if command_attempt {
                return self.framework.invoke(message).await;
            }
            return Ok(());
        };

        // Takes precedence over every other guard, commands included.
        if policy.block_invisible_members && validate::is_member_invisible(&message.author) {
            if let Err(err) = self.transport.delete_message(message).await {
                warn!(
                    "could not delete message {} from invisible member: {}",
                    message.id, err
                );
            }
            let notice = Notice::new(
                "Invisible members",
                format!(
                    "{}, this server does not accept messages from invisible members. \
                     Change your status and try again.",
                    message.author.name
                ),
            );
            notify::notify(
                self.transport.as_ref(),
                message.author.id,
                message.channel_id,
                &notice,
                "this server does not accept messages from invisible members.",
            )
            .await;
            return Ok(());
        }

        if !command_attempt {
            if policy.profanity_filter_enabled
                && profanity::check_and_censor(
                    self.transport.as_ref(),
                    self.profanity.as_ref(),
                    self.config.profanity_mask,
                    message,
                )
                .await
            {
                return Ok(());
            }
            if policy.bot_word_reactions_enabled {
                reaction::check_and_react(self.transport.as_ref(), &self.config, message).await;
            }
            return Ok(());
        }

        if validate::has_doubled_prefix(&message.content) {
            debug!("ignoring doubled prefix in message {}", message.id);
            return Ok(());
        }
        if !exclusive::check_access(
            self.transport.as_ref(),
            &self.config.exclusive_access,
            message,
        )
        .await
        {
            return Ok(());
        }

        // Custom commands shadow built-in commands of the same name.
        if let Some(name) = ctx.invoked_name() {
            if let Some(custom) = self.custom_commands.lookup(guild_id, &name).await {
                self.say(message.channel_id, &custom.response).await;
                return Ok(());
            }
        }

        self.framework.invoke(message).await
    }

    async fn say(&self, channel: ChannelId, text: &str) {
        if let Err(err) = self
            .transport
            .send_text(SendTarget::Channel(channel), text)
            .await
        {
            warn!("could not send to channel {}: {}", channel, err);
        }
    }

    async fn post_notice(&self, channel: ChannelId, notice: &Notice) {
        if let Err(err) = self
            .transport
            .send_structured(SendTarget::Channel(channel), notice)
            .await
        {
            warn!("could not post notice to channel {}: {}", channel, err);
        }
    }
}

#[async_trait]
impl MessageHook for MessageClassifier {
    async fn on_message(&self, message: &InboundMessage) -> Result<(), CommandFailure> {
        self.handle(message).await
    }
}

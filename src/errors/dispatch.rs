//! Entry point for the "command failed" extension point: builds the error
//! context, picks the reply builder for the failure's kind, sends the reply,
//! and logs server-side faults with full message context.

use crate::errors::{reply, ErrorContext};
use crate::framework::{CommandFailure, FailureKind, InvocationContext};
use crate::transport::{SendTarget, Transport};
use crate::CommandFailureHook;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, warn};

type ReplyBuilder = fn(&ErrorContext, &CommandFailure) -> String;

/// Fixed kind -> (builder, should-log) table. User-input failures and guard
/// outcomes are never logged as server errors; invocation and permission
/// faults always are. The `Unknown` arm doubles as the default.
fn lookup(kind: FailureKind) -> (ReplyBuilder, bool) {
    match kind {
        FailureKind::NoPrivateMessage => (reply::no_private_message, false),
        FailureKind::CommandNotFound => (reply::command_not_found, false),
        FailureKind::MissingRequiredArgument => (reply::missing_required_argument, false),
        FailureKind::CheckFailed => (reply::check_failed, false),
        FailureKind::BadArgument(_) => (reply::bad_argument, false),
        FailureKind::CommandError => (reply::command_error, true),
        FailureKind::CommandInvokeError => (reply::command_invoke_error, true),
        FailureKind::CommandOnCooldown => (reply::command_on_cooldown, false),
        FailureKind::TooManyArguments => (reply::too_many_arguments, false),
        FailureKind::Forbidden => (reply::forbidden, true),
        FailureKind::Unknown => (reply::unknown, true),
    }
}

pub struct ErrorDispatcher {
    transport: Arc<dyn Transport>,
}

impl ErrorDispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn handle(&self, ctx: &InvocationContext, failure: &CommandFailure) {
        let message = &ctx.message;
        let error_ctx = ErrorContext::build(ctx, failure);
        let (builder, should_log) = lookup(failure.kind);

        // Cooldown replies echo nothing sensitive, but the triggering message
        // itself may contain a credential. Remove it before replying.
        if failure.kind == FailureKind::CommandOnCooldown
            && reply::is_sensitive_invocation(&message.content)
        {
            if let Err(err) = self.transport.delete_message(message).await {
                warn!(
                    "could not delete sensitive message {} in channel {}: {}",
                    message.id, message.channel_id, err
                );
            }
        }

        let text = builder(&error_ctx, failure);
        if let Err(err) = self
            .transport
            .send_text(SendTarget::Channel(message.channel_id), &text)
            .await
        {
            warn!(
                "could not send error reply to channel {}: {}",
                message.channel_id, err
            );
        }

        if should_log {
            match message.guild_id {
                Some(guild) => error!(
                    "command failure: {} | raw: {} | author: {} ({}) | guild: {} channel: {}",
                    text, message.content, message.author.name, message.author.id, guild,
                    message.channel_id
                ),
                None => error!(
                    "command failure: {} | raw: {} | author: {} ({}) | channel: {}",
                    text, message.content, message.author.name, message.author.id,
                    message.channel_id
                ),
            }
        }
    }
}

#[async_trait]
impl CommandFailureHook for ErrorDispatcher {
    async fn on_command_failure(&self, ctx: &InvocationContext, failure: &CommandFailure) {
        self.handle(ctx, failure).await;
    }
}

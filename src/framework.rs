//! Boundary to the command-invocation framework. The framework parses
//! arguments and runs command bodies; the pipeline only resolves a context,
//! forwards messages, and classifies the failures the framework raises.

use crate::message::InboundMessage;
use async_trait::async_trait;
use thiserror::Error;

/// What the framework resolved from one inbound message. Owned for the
/// duration of a single pipeline run.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub message: InboundMessage,
    /// Resolved command prefix, `None` when the message is plain chatter.
    pub prefix: Option<String>,
    /// Resolved command name, `None` when no built-in command matched.
    pub command: Option<String>,
    pub subcommand: Option<String>,
}

impl InvocationContext {
    /// Name the user tried to invoke: the resolved command when the
    /// framework recognized one, otherwise the first token after the prefix
    /// (custom commands are unknown to the framework, so resolution fails
    /// for them by design of the stores).
    pub fn invoked_name(&self) -> Option<String> {
        if let Some(command) = &self.command {
            return Some(command.to_lowercase());
        }
        let prefix = self.prefix.as_deref()?;
        let rest = self
            .message
            .content
            .strip_prefix(prefix)
            .unwrap_or(&self.message.content);
        rest.split_whitespace().next().map(|t| t.to_lowercase())
    }
}

/// Why a bad-argument failure was raised, annotated by the layer that
/// rejected the argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadArgumentReason {
    InvalidPrefix,
    UnknownServer,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoPrivateMessage,
    CommandNotFound,
    MissingRequiredArgument,
    CheckFailed,
    BadArgument(BadArgumentReason),
    CommandError,
    CommandInvokeError,
    CommandOnCooldown,
    TooManyArguments,
    Forbidden,
    Unknown,
}

/// Typed failure raised by the command framework. `cause` carries one level
/// of "caused by" wrapping when the failure originated inside a command body.
#[derive(Debug, Clone, Error)]
#[error("{summary}")]
pub struct CommandFailure {
    pub kind: FailureKind,
    pub summary: String,
    pub cause: Option<String>,
}

impl CommandFailure {
    pub fn new(kind: FailureKind, summary: impl Into<String>) -> Self {
        Self {
            kind,
            summary: summary.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Human-readable message: the wrapped cause when present, otherwise the
    /// failure's own summary.
    pub fn extracted_message(&self) -> &str {
        self.cause.as_deref().unwrap_or(&self.summary)
    }
}

#[async_trait]
pub trait CommandFramework: Send + Sync {
    /// Resolve prefix/command/subcommand for a raw message without running
    /// anything.
    async fn resolve(&self, message: &InboundMessage) -> InvocationContext;

    /// Parse and execute a recognized command. Any error is surfaced as a
    /// typed `CommandFailure` for the error dispatcher.
    async fn invoke(&self, message: &InboundMessage) -> Result<(), CommandFailure>;

    /// Help text for a named command, if it exists.
    async fn help_text(&self, command: &str) -> Option<String>;
}

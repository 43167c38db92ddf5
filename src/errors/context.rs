use crate::framework::{CommandFailure, FailureKind, InvocationContext};

/// Normalized view of one failed invocation, built once per failure and
/// discarded after the reply goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// `<prefix><command>[ <subcommand>]`, or the first raw token when the
    /// command never resolved.
    pub command_string: String,
    /// `<prefix>help <command_string without prefix>`.
    pub help_command_string: String,
    /// Extracted human-readable message from the failure.
    pub raw_error_message: String,
    /// Offending argument value, populated for bad-argument failures only.
    pub bad_argument_token: Option<String>,
}

impl ErrorContext {
    pub fn build(ctx: &InvocationContext, failure: &CommandFailure) -> Self {
        let prefix = ctx.prefix.clone().unwrap_or_else(|| "!".to_string());

        let command_string = match &ctx.command {
            Some(command) => match &ctx.subcommand {
                Some(sub) => format!("{prefix}{command} {sub}"),
                None => format!("{prefix}{command}"),
            },
            // The command never resolved (unknown name, custom command):
            // the first raw token already carries its prefix.
            None => ctx
                .message
                .content
                .split_whitespace()
                .next()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{prefix}unknown")),
        };

        let without_prefix = command_string
            .strip_prefix(&prefix)
            .unwrap_or(&command_string);
        let help_command_string = format!("{prefix}help {without_prefix}");

        let bad_argument_token = match failure.kind {
            FailureKind::BadArgument(_) => {
                offending_token(&ctx.message.content, &command_string)
            }
            _ => None,
        };

        Self {
            command_string,
            help_command_string,
            raw_error_message: failure.extracted_message().to_string(),
            bad_argument_token,
        }
    }
}

/// First raw token after the words that make up the command string.
fn offending_token(content: &str, command_string: &str) -> Option<String> {
    let skip = command_string.split_whitespace().count();
    content.split_whitespace().nth(skip).map(str::to_string)
}

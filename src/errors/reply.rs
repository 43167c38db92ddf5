//! Pure mapping from an [`ErrorContext`] + failure kind to the user-facing
//! reply text. The invoke-error classification is fuzzy substring matching
//! against third-party error strings; the rules live in one ordered table so
//! a new upstream cause is one line, and the tests below pin the literal
//! strings we match on.

use crate::errors::ErrorContext;
use crate::framework::{BadArgumentReason, CommandFailure, FailureKind};

pub const ALLOWED_PREFIXES: &[&str] = &["!", "?", "."];

/// Commands whose invocation text may contain a credential. On a cooldown
/// failure the triggering message is deleted even though the failure itself
/// is unrelated.
const SENSITIVE_COMMANDS: &[&str] = &[
    "gw2 key add",
    "gw2 key remove",
    "gw2 key info",
    "gw2 key activate",
    "customcommand add",
    "customcommand edit",
];

pub fn is_sensitive_invocation(content: &str) -> bool {
    let body = content
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    SENSITIVE_COMMANDS.iter().any(|c| body.starts_with(c))
}

fn help_suffix(ctx: &ErrorContext) -> String {
    format!(" For more info: `{}`", ctx.help_command_string)
}

pub fn no_private_message(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    ctx.raw_error_message.clone()
}

pub fn command_not_found(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    format!("Command not found:\n`{}`", ctx.command_string)
}

pub fn missing_required_argument(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    format!(
        "Missing required argument!!! For more info: `{}`",
        ctx.help_command_string
    )
}

pub fn check_failed(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    let message = &ctx.raw_error_message;
    if message.contains("not admin") {
        "Only server administrators may use this command.".to_string()
    } else if message.contains("not owner") {
        "Only the bot owner may use this command.".to_string()
    } else {
        message.clone()
    }
}

pub fn bad_argument(ctx: &ErrorContext, failure: &CommandFailure) -> String {
    let reason = match failure.kind {
        FailureKind::BadArgument(reason) => reason,
        _ => BadArgumentReason::Other,
    };
    let token = ctx.bad_argument_token.as_deref().unwrap_or("?");
    let body = match reason {
        BadArgumentReason::InvalidPrefix => {
            let allowed = ALLOWED_PREFIXES
                .iter()
                .map(|p| format!("`{p}`"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("`{token}` is not a valid prefix. Allowed prefixes: {allowed}.")
        }
        BadArgumentReason::UnknownServer => {
            format!("No server named `{token}` was found.")
        }
        BadArgumentReason::Other => format!("Unknown option: `{token}`."),
    };
    body + &help_suffix(ctx)
}

pub fn command_error(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    format!("CommandError: {}", ctx.raw_error_message)
}

/// Ordered (predicate, builder) rules for classifying command-invoke errors
/// by substrings of upstream error text. First match wins.
const INVOKE_ERROR_RULES: &[(fn(&str) -> bool, fn(&ErrorContext) -> String)] = &[
    (dm_disabled, dm_disabled_reply),
    (attribute_fault, attribute_fault_reply),
    (missing_permissions, missing_permissions_reply),
    (option_not_found, option_not_found_reply),
    (upstream_api_error, upstream_api_error_reply),
    (invalid_tts, invalid_tts_reply),
];

fn dm_disabled(message: &str) -> bool {
    message.contains("Cannot send messages to this user")
}

fn dm_disabled_reply(_ctx: &ErrorContext) -> String {
    "I can't send you direct messages. Allow direct messages from server members and try again."
        .to_string()
}

fn attribute_fault(message: &str) -> bool {
    message.contains("has no attribute")
}

fn attribute_fault_reply(_ctx: &ErrorContext) -> String {
    "Something went wrong on my end while running that command.".to_string()
}

fn missing_permissions(message: &str) -> bool {
    message.contains("Missing Permissions")
}

fn missing_permissions_reply(_ctx: &ErrorContext) -> String {
    "I don't have the permissions I need to do that here.".to_string()
}

fn option_not_found(message: &str) -> bool {
    message.contains("option not found")
}

fn option_not_found_reply(ctx: &ErrorContext) -> String {
    // Upstream phrases this as "... option not found: <value>".
    let token = ctx
        .raw_error_message
        .split_whitespace()
        .last()
        .unwrap_or("?");
    format!("Option `{token}` not found. Check your spelling.")
}

fn upstream_api_error(message: &str) -> bool {
    message.contains("api.guildwars2.com")
}

fn upstream_api_error_reply(ctx: &ErrorContext) -> String {
    let url = ctx
        .raw_error_message
        .split_whitespace()
        .find(|t| t.starts_with("http"))
        .map(|t| t.split('?').next().unwrap_or(t))
        .unwrap_or("the API");
    format!("The Guild Wars 2 API returned an error for `{url}`. Try again later.")
}

fn invalid_tts(message: &str) -> bool {
    message.contains("Invalid text-to-speech")
}

fn invalid_tts_reply(_ctx: &ErrorContext) -> String {
    "That text can't be sent as text-to-speech.".to_string()
}

pub fn command_invoke_error(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    let body = INVOKE_ERROR_RULES
        .iter()
        .find(|(predicate, _)| predicate(&ctx.raw_error_message))
        .map(|(_, builder)| builder(ctx))
        .unwrap_or_else(|| {
            "Something unexpected went wrong while running that command.".to_string()
        });
    body + &help_suffix(ctx)
}

pub fn command_on_cooldown(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    format!(
        "{} Command: `{}`",
        ctx.raw_error_message, ctx.command_string
    )
}

pub fn too_many_arguments(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    format!("Command ERROR! For more info: `{}`", ctx.help_command_string)
}

pub fn forbidden(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    if ctx.raw_error_message.contains("DM channel") {
        "I can't do that inside a direct message channel.".to_string()
    } else {
        "I don't have permission to do that.".to_string()
    }
}

pub fn unknown(ctx: &ErrorContext, _failure: &CommandFailure) -> String {
    ctx.raw_error_message.clone()
}

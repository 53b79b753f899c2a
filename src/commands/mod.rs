//! Slash commands answered locally, without a model call.

mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::fallback::LONG_DATE_FORMAT;
use chrono::{DateTime, Local};
use tracing::debug;

pub const UNKNOWN_COMMAND_REPLY: &str = "Unknown command. Try /help.";
pub const CLEARED_REPLY: &str = "Conversation cleared (session).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Synthetic bot reply to append to the conversation.
    Reply(String),
    /// Empty the conversation, then show the confirmation.
    ClearConversation(String),
    /// Slash input that names no command.
    Unknown(String),
    /// Plain chat input for the model.
    ProcessAsMessage(String),
}

/// Route `input` to a command. Only an exact (case-insensitive) match of the
/// whole trimmed input counts, so "/help me" is an unknown command.
pub fn process_input(input: &str, now: DateTime<Local>) -> CommandResult {
    let trimmed = input.trim();

    let Some(name) = trimmed.strip_prefix('/') else {
        return CommandResult::ProcessAsMessage(input.to_string());
    };

    match registry::find_command(name) {
        Some(command) => {
            debug!(command = command.name, "Dispatching slash command");
            (command.handler)(CommandInvocation { now })
        }
        None => CommandResult::Unknown(UNKNOWN_COMMAND_REPLY.to_string()),
    }
}

pub fn help_text() -> String {
    let mut help = String::from("Commands:");
    for command in all_commands() {
        help.push_str(&format!("\n  /{:<6} {}", command.name, command.help));
    }
    help
}

pub(super) fn handle_help(_invocation: CommandInvocation) -> CommandResult {
    CommandResult::Reply(help_text())
}

pub(super) fn handle_clear(_invocation: CommandInvocation) -> CommandResult {
    CommandResult::ClearConversation(CLEARED_REPLY.to_string())
}

pub(super) fn handle_time(invocation: CommandInvocation) -> CommandResult {
    CommandResult::Reply(format!(
        "🕒 Current time: {}",
        invocation.now.format("%H:%M:%S")
    ))
}

pub(super) fn handle_date(invocation: CommandInvocation) -> CommandResult {
    CommandResult::Reply(format!("📅 {}", invocation.now.format(LONG_DATE_FORMAT)))
}

pub(super) fn handle_about(_invocation: CommandInvocation) -> CommandResult {
    CommandResult::Reply(format!(
        "✨ Parley {}: a text and voice chat assistant backed by Gemini. \
         Features: personalities, smart read, persistent memory.",
        env!("CARGO_PKG_VERSION")
    ))
}

#[cfg(test)]
mod tests;

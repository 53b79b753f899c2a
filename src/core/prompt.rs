//! Builds the model-facing prompt for a chat turn.

use crate::core::config::Persona;
use crate::core::message::Message;

/// Instruction for `persona`, addressing the user by name when one is set.
pub fn system_instruction(persona: &Persona, display_name: Option<&str>) -> String {
    let mut instruction = persona.system_instruction();
    if let Some(name) = display_name.map(str::trim).filter(|name| !name.is_empty()) {
        instruction.push_str(&format!(" Address the user as {name} when appropriate."));
    }
    instruction
}

/// Render the trailing `window_size + 1` log entries, oldest first.
pub fn render_window(log: &[Message], window_size: usize) -> String {
    let start = log.len().saturating_sub(window_size + 1);
    log[start..]
        .iter()
        .map(|message| format!("{}: {}", message.role.prompt_label(), message.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compose the full prompt for `user_message`.
///
/// The window is taken from the end of `log`, so when the current user
/// message has already been appended it shows up both in the window and
/// on the final `User:` line.
pub fn compose(
    user_message: &str,
    window_size: usize,
    persona: &Persona,
    display_name: Option<&str>,
    log: &[Message],
) -> String {
    format!(
        "{}\nConversation:\n{}\nUser: {}\nAssistant:",
        system_instruction(persona, display_name),
        render_window(log, window_size),
        user_message
    )
}

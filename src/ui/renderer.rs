//! Plain-text formatting for the line-mode view.

use crate::core::message::{Message, Role};
use crate::core::persona::PersonaManager;
use crate::core::session::NoticeKind;
use crate::core::settings::SessionSettings;

const DEFAULT_USER_LABEL: &str = "You";

pub fn format_message(message: &Message, display_name: Option<&str>) -> String {
    let speaker = match message.role {
        Role::User => format!("🧑 {}", display_name.unwrap_or(DEFAULT_USER_LABEL)),
        Role::Assistant | Role::Command => "🤖 Bot".to_string(),
    };

    let mut rendered = format!("{speaker}: {}", message.text);
    if let Some(diagnostic) = message.diagnostic() {
        rendered.push('\n');
        rendered.push_str(diagnostic);
    }
    rendered.push_str(&format!("\n   {}", message.timestamp));
    rendered
}

pub fn format_notice(kind: NoticeKind, text: &str) -> String {
    let icon = match kind {
        NoticeKind::Info => "ℹ️",
        NoticeKind::Warning => "⚠️",
        NoticeKind::Error => "❌",
    };
    format!("{icon} {text}")
}

/// Hints shown after a turn, or `None` when there is nothing to offer.
pub fn format_turn_footer(suggestions: &[String], can_continue: bool) -> Option<String> {
    let mut lines = Vec::new();
    if can_continue {
        lines.push("   (:more to continue reading)".to_string());
    }
    if !suggestions.is_empty() {
        let options = suggestions
            .iter()
            .enumerate()
            .map(|(i, suggestion)| format!(":{} {}", i + 1, suggestion))
            .collect::<Vec<_>>()
            .join("  ·  ");
        lines.push(format!("💡 {options}"));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

pub fn format_settings(settings: &SessionSettings, personas: &PersonaManager) -> String {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    let active = personas.get_active_persona();
    [
        format!("Name: {}", settings.display_name.as_deref().unwrap_or("(not set)")),
        format!("Personality: {} ({})", active.display_name, active.id),
        format!("Voice output: {}", on_off(settings.voice_enabled)),
        format!("Speaking rate: {}", settings.speech_rate),
        format!("Volume: {:.1}", settings.speech_volume),
        format!("Voice: {}", settings.voice.as_deref().unwrap_or("default")),
        format!("Smart read: {}", on_off(settings.smart_read)),
    ]
    .join("\n")
}

pub fn format_personas(personas: &PersonaManager) -> String {
    let active = &personas.get_active_persona().id;
    personas
        .list_personas()
        .iter()
        .map(|persona| {
            let marker = if &persona.id == active { "*" } else { " " };
            format!("{marker} {:<10} {}", persona.id, persona.display_name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

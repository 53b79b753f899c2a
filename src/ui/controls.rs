//! `:`-prefixed view controls for the line-mode chat.
//!
//! Slash input is chat text handled by [`crate::commands`]; controls change
//! how the session behaves and never reach the conversation log.

use crate::core::session::SessionAction;
use crate::core::settings::SettingChange;
use crate::core::suggestions::QuickAction;

pub const CONTROL_PREFIX: char = ':';

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Session(SessionAction),
    ListPersonas,
    ShowSettings,
    ShowHelp,
    Quit,
}

pub struct ControlSpec {
    pub usage: &'static str,
    pub help: &'static str,
}

pub const CONTROLS: &[ControlSpec] = &[
    ControlSpec {
        usage: ":more",
        help: "Continue reading the last answer",
    },
    ControlSpec {
        usage: ":1 :2 :3",
        help: "Ask a suggested follow-up",
    },
    ControlSpec {
        usage: ":weather :joke :quote :news",
        help: "Quick prompts",
    },
    ControlSpec {
        usage: ":persona <id>",
        help: "Switch personality",
    },
    ControlSpec {
        usage: ":personas",
        help: "List personalities",
    },
    ControlSpec {
        usage: ":name [name]",
        help: "Set or clear the name I call you",
    },
    ControlSpec {
        usage: ":voice on|off",
        help: "Read answers aloud",
    },
    ControlSpec {
        usage: ":rate <80-260>",
        help: "Speaking rate in words per minute",
    },
    ControlSpec {
        usage: ":volume <0.1-1.0>",
        help: "Speaking volume",
    },
    ControlSpec {
        usage: ":voice-id [id]",
        help: "Engine voice, blank for the default",
    },
    ControlSpec {
        usage: ":smart on|off",
        help: "Show long answers a few sentences at a time",
    },
    ControlSpec {
        usage: ":forget",
        help: "Erase saved memory (this transcript stays)",
    },
    ControlSpec {
        usage: ":settings",
        help: "Show current settings",
    },
    ControlSpec {
        usage: ":help",
        help: "Show this list",
    },
    ControlSpec {
        usage: ":quit",
        help: "Leave the chat",
    },
];

pub fn controls_help() -> String {
    let width = CONTROLS
        .iter()
        .map(|spec| spec.usage.len())
        .max()
        .unwrap_or(0);
    let mut help = String::from("Controls:\n");
    for spec in CONTROLS {
        help.push_str(&format!("  {:width$}  {}\n", spec.usage, spec.help));
    }
    help.push_str("Slash commands such as /help, and unknown :names, are sent as chat input.");
    help
}

/// Parse a control line. Returns `None` for ordinary chat input, including
/// text that starts with `:` but names no control, such as `:) thanks`.
pub fn parse_control(line: &str) -> Option<Result<Control, String>> {
    let body = line.trim().strip_prefix(CONTROL_PREFIX)?;
    let (name, arg) = match body.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (body, ""),
    };
    parse_named(&name.to_ascii_lowercase(), arg)
}

fn parse_named(name: &str, arg: &str) -> Option<Result<Control, String>> {
    let session = |action| -> Result<Control, String> { Ok(Control::Session(action)) };
    let setting = |change| -> Result<Control, String> {
        Ok(Control::Session(SessionAction::ChangeSetting(change)))
    };

    let parsed = match name {
        "more" | "continue" => session(SessionAction::ContinueReading),
        "1" => session(SessionAction::SelectSuggestion(0)),
        "2" => session(SessionAction::SelectSuggestion(1)),
        "3" => session(SessionAction::SelectSuggestion(2)),
        "weather" => session(SessionAction::Quick(QuickAction::Weather)),
        "joke" => session(SessionAction::Quick(QuickAction::Joke)),
        "quote" => session(SessionAction::Quick(QuickAction::Quote)),
        "news" => session(SessionAction::Quick(QuickAction::News)),
        "persona" => {
            if arg.is_empty() {
                Err("Usage: :persona <id>".to_string())
            } else {
                setting(SettingChange::Persona(arg.to_string()))
            }
        }
        "personas" => Ok(Control::ListPersonas),
        "name" => setting(SettingChange::DisplayName(non_empty(arg))),
        "voice" => {
            parse_switch(arg, ":voice on|off").and_then(|on| setting(SettingChange::Voice(on)))
        }
        "smart" => {
            parse_switch(arg, ":smart on|off").and_then(|on| setting(SettingChange::SmartRead(on)))
        }
        "rate" => arg
            .parse::<u32>()
            .map_err(|_| "Usage: :rate <80-260>".to_string())
            .and_then(|rate| setting(SettingChange::SpeechRate(rate))),
        "volume" => arg
            .parse::<f32>()
            .map_err(|_| "Usage: :volume <0.1-1.0>".to_string())
            .and_then(|volume| setting(SettingChange::SpeechVolume(volume))),
        "voice-id" => setting(SettingChange::VoiceId(non_empty(arg))),
        "forget" => session(SessionAction::ForgetHistory),
        "settings" => Ok(Control::ShowSettings),
        "help" | "?" => Ok(Control::ShowHelp),
        "quit" | "q" | "exit" => Ok(Control::Quit),
        _ => return None,
    };
    Some(parsed)
}

fn non_empty(arg: &str) -> Option<String> {
    (!arg.is_empty()).then(|| arg.to_string())
}

fn parse_switch(arg: &str, usage: &str) -> Result<bool, String> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("Usage: {usage}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> Result<Control, String> {
        parse_control(line).expect("control line")
    }

    #[test]
    fn chat_input_is_not_a_control() {
        assert_eq!(parse_control("hello"), None);
        assert_eq!(parse_control("/help"), None);
    }

    #[test]
    fn suggestions_are_zero_indexed() {
        assert_eq!(
            parsed(":2"),
            Ok(Control::Session(SessionAction::SelectSuggestion(1)))
        );
    }

    #[test]
    fn settings_controls_carry_their_arguments() {
        assert_eq!(
            parsed(":persona Teacher"),
            Ok(Control::Session(SessionAction::ChangeSetting(
                SettingChange::Persona("Teacher".to_string())
            )))
        );
        assert_eq!(
            parsed(":VOICE on"),
            Ok(Control::Session(SessionAction::ChangeSetting(
                SettingChange::Voice(true)
            )))
        );
        assert_eq!(
            parsed(":rate 500"),
            Ok(Control::Session(SessionAction::ChangeSetting(
                SettingChange::SpeechRate(500)
            )))
        );
        assert_eq!(
            parsed(":name"),
            Ok(Control::Session(SessionAction::ChangeSetting(
                SettingChange::DisplayName(None)
            )))
        );
    }

    #[test]
    fn bad_arguments_report_usage() {
        assert_eq!(parsed(":voice maybe"), Err("Usage: :voice on|off".to_string()));
        assert!(parsed(":volume loud").is_err());
        assert!(parsed(":persona").is_err());
    }

    #[test]
    fn unknown_names_fall_through_to_chat() {
        assert_eq!(parse_control(":) thanks, that helped"), None);
        assert_eq!(parse_control(":teleport home"), None);
        assert_eq!(parse_control(":"), None);
    }

    #[test]
    fn quick_actions_and_quit() {
        assert_eq!(
            parsed(":news"),
            Ok(Control::Session(SessionAction::Quick(QuickAction::News)))
        );
        assert_eq!(parsed(" :quit "), Ok(Control::Quit));
    }

    #[test]
    fn help_lists_every_control() {
        let help = controls_help();
        for spec in CONTROLS {
            assert!(help.contains(spec.usage));
        }
    }
}

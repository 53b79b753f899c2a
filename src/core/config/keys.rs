//! Named keys accepted by `parley set` and `parley unset`.

use crate::core::config::data::{Config, SpeechBackendKind};
use std::path::PathBuf;

pub const SETTABLE_KEYS: &[&str] = &[
    "model",
    "base-url",
    "display-name",
    "default-persona",
    "smart-read",
    "voice",
    "speech-backend",
    "context-window",
    "max-sentences",
    "history-file",
];

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(format!("Expected on or off, got '{other}'")),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(format!("{key} must be a positive number")),
    }
}

impl Config {
    /// Apply `key = value`, returning a confirmation line.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<String, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {key}"));
        }
        match key {
            "model" => self.model = Some(value.to_string()),
            "base-url" => self.base_url = Some(value.to_string()),
            "display-name" => self.display_name = Some(value.to_string()),
            "default-persona" => self.default_persona = Some(value.to_ascii_lowercase()),
            "smart-read" => self.smart_read = Some(parse_switch(value)?),
            "voice" => self.speech.voice_on = Some(parse_switch(value)?),
            "speech-backend" => {
                self.speech.backend = Some(match value.to_ascii_lowercase().as_str() {
                    "local" => SpeechBackendKind::Local,
                    "cloud" => SpeechBackendKind::Cloud,
                    other => return Err(format!("Unknown speech backend '{other}'")),
                })
            }
            "context-window" => self.context_window = Some(parse_count(key, value)?),
            "max-sentences" => self.max_sentences = Some(parse_count(key, value)?),
            "history-file" => self.history_file = Some(PathBuf::from(value)),
            _ => return Err(unknown_key(key)),
        }
        Ok(format!("Set {key} to: {value}"))
    }

    pub fn unset_value(&mut self, key: &str) -> Result<String, String> {
        match key {
            "model" => self.model = None,
            "base-url" => self.base_url = None,
            "display-name" => self.display_name = None,
            "default-persona" => self.default_persona = None,
            "smart-read" => self.smart_read = None,
            "voice" => self.speech.voice_on = None,
            "speech-backend" => self.speech.backend = None,
            "context-window" => self.context_window = None,
            "max-sentences" => self.max_sentences = None,
            "history-file" => self.history_file = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(format!("Unset {key}"))
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: {key}. Known keys: {}",
        SETTABLE_KEYS.join(", ")
    )
}

use crate::core::config::Config;
use crate::core::config::defaults::{DEFAULT_SPEECH_RATE, DEFAULT_SPEECH_VOLUME};
use crate::core::speech::{MAX_SPEECH_RATE, MAX_SPEECH_VOLUME, MIN_SPEECH_RATE, MIN_SPEECH_VOLUME};

/// Per-session preferences. Only the conversation log outlives a session;
/// these start from config defaults every run.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub display_name: Option<String>,
    pub voice_enabled: bool,
    pub speech_rate: u32,
    pub speech_volume: f32,
    pub voice: Option<String>,
    pub smart_read: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            display_name: None,
            voice_enabled: false,
            speech_rate: DEFAULT_SPEECH_RATE,
            speech_volume: DEFAULT_SPEECH_VOLUME,
            voice: None,
            smart_read: true,
        }
    }
}

/// A single user-initiated settings change.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    DisplayName(Option<String>),
    Persona(String),
    Voice(bool),
    SpeechRate(u32),
    SpeechVolume(f32),
    VoiceId(Option<String>),
    SmartRead(bool),
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        let mut settings = Self {
            display_name: None,
            voice_enabled: config.speech.voice_on.unwrap_or(defaults.voice_enabled),
            speech_rate: defaults.speech_rate,
            speech_volume: defaults.speech_volume,
            voice: config.speech.voice.clone(),
            smart_read: config.smart_read(),
        };
        settings.set_display_name(config.display_name.clone());
        if let Some(rate) = config.speech.rate {
            settings.set_speech_rate(rate);
        }
        if let Some(volume) = config.speech.volume {
            settings.set_speech_volume(volume);
        }
        settings
    }

    /// Blank names clear the setting.
    pub fn set_display_name(&mut self, name: Option<String>) {
        self.display_name = name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
    }

    pub fn set_speech_rate(&mut self, rate: u32) -> u32 {
        self.speech_rate = rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE);
        self.speech_rate
    }

    pub fn set_speech_volume(&mut self, volume: f32) -> f32 {
        self.speech_volume = if volume.is_nan() {
            MAX_SPEECH_VOLUME
        } else {
            volume.clamp(MIN_SPEECH_VOLUME, MAX_SPEECH_VOLUME)
        };
        self.speech_volume
    }

    pub fn set_voice(&mut self, voice: Option<String>) {
        self.voice = voice
            .map(|voice| voice.trim().to_string())
            .filter(|voice| !voice.is_empty());
    }
}

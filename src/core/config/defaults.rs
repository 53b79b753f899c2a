use crate::core::config::data::{Config, SpeechBackendKind};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONTEXT_WINDOW: usize = 6;
pub const DEFAULT_MAX_SENTENCES: usize = 3;
pub const HISTORY_FILE_NAME: &str = "memory.json";

pub const DEFAULT_SPEECH_RATE: u32 = 150;
pub const DEFAULT_SPEECH_VOLUME: f32 = 1.0;
pub const DEFAULT_CLOUD_SPEECH_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CLOUD_SPEECH_MODEL: &str = "tts-1";
pub const DEFAULT_CLOUD_SPEECH_KEY_ENV: &str = "OPENAI_API_KEY";

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "parley", "parley")
}

/// Directory for memory and generated audio, falling back to the working
/// directory when the platform has no data directory.
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn api_base_url(&self) -> String {
        std::env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn context_window(&self) -> usize {
        self.context_window.unwrap_or(DEFAULT_CONTEXT_WINDOW)
    }

    pub fn max_sentences(&self) -> usize {
        self.max_sentences.unwrap_or(DEFAULT_MAX_SENTENCES).max(1)
    }

    pub fn smart_read(&self) -> bool {
        self.smart_read.unwrap_or(true)
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| data_dir().join(HISTORY_FILE_NAME))
    }

    pub fn speech_backend(&self) -> SpeechBackendKind {
        self.speech.backend.unwrap_or_default()
    }

    pub fn cloud_speech_url(&self) -> &str {
        self.speech
            .cloud_url
            .as_deref()
            .unwrap_or(DEFAULT_CLOUD_SPEECH_URL)
    }

    pub fn cloud_speech_model(&self) -> &str {
        self.speech
            .cloud_model
            .as_deref()
            .unwrap_or(DEFAULT_CLOUD_SPEECH_MODEL)
    }

    pub fn cloud_speech_key_env(&self) -> &str {
        self.speech
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_CLOUD_SPEECH_KEY_ENV)
    }
}

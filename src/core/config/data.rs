use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A tone preset applied to every model prompt.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Persona {
    pub id: String,
    pub display_name: String,
    /// Appended to the base assistant instruction
    pub instruction: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackendKind {
    /// A speech engine installed on this machine (`say`, `espeak`)
    #[default]
    Local,
    /// An OpenAI-compatible `/audio/speech` endpoint
    Cloud,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SpeechConfig {
    pub backend: Option<SpeechBackendKind>,
    /// Local engine program, e.g. "say" or "espeak"
    pub engine: Option<String>,
    pub voice: Option<String>,
    /// Words per minute
    pub rate: Option<u32>,
    /// 0.1 to 1.0
    pub volume: Option<f32>,
    /// Narrate answers when the session starts
    pub voice_on: Option<bool>,
    pub cloud_url: Option<String>,
    pub cloud_model: Option<String>,
    /// Environment variable holding the cloud speech API key
    pub api_key_env: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Gemini model name (e.g., "gemini-2.5-flash")
    pub model: Option<String>,
    /// Gemini API base URL
    pub base_url: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    /// Prior turns included in each prompt
    pub context_window: Option<usize>,
    /// Sentences shown before "continue reading"
    pub max_sentences: Option<usize>,
    /// Where conversation memory is kept
    pub history_file: Option<PathBuf>,
    /// How the assistant addresses the user
    pub display_name: Option<String>,
    pub default_persona: Option<String>,
    /// Show long answers a few sentences at a time
    pub smart_read: Option<bool>,
    #[serde(default)]
    pub speech: SpeechConfig,
    /// User-defined personas
    #[serde(default)]
    pub personas: Vec<Persona>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

//! Narration of answers through a local speech engine or a cloud
//! synthesis endpoint.

use crate::api::{endpoint_url, SpeechRequestBody};
use crate::core::config::data::path_display;
use crate::core::model::summarize_error_body;
use async_trait::async_trait;
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

pub const MIN_SPEECH_RATE: u32 = 80;
pub const MAX_SPEECH_RATE: u32 = 260;
pub const MIN_SPEECH_VOLUME: f32 = 0.1;
pub const MAX_SPEECH_VOLUME: f32 = 1.0;

/// Rate the cloud endpoint treats as speed 1.0.
const CLOUD_BASE_RATE: f32 = 150.0;
const DEFAULT_CLOUD_VOICE: &str = "alloy";

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    /// Words per minute
    pub rate: Option<u32>,
    pub volume: Option<f32>,
    pub voice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutput {
    /// The engine played the audio directly.
    Played,
    /// Audio was written to a file for the user to play.
    Saved(PathBuf),
}

#[derive(Debug)]
pub enum SpeechError {
    EmptyText,
    Spawn {
        program: String,
        source: std::io::Error,
    },
    EngineFailed {
        program: String,
        detail: String,
    },
    MissingApiKey(String),
    Http(reqwest::Error),
    Status {
        status: u16,
        summary: String,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::EmptyText => write!(f, "Cannot speak empty text"),
            SpeechError::Spawn { program, source } => {
                write!(f, "Could not start speech engine '{program}': {source}")
            }
            SpeechError::EngineFailed { program, detail } => {
                write!(f, "Speech engine '{program}' failed: {detail}")
            }
            SpeechError::MissingApiKey(var) => {
                write!(f, "Cloud speech needs an API key in {var}")
            }
            SpeechError::Http(source) => write!(f, "Speech request failed: {source}"),
            SpeechError::Status { status, summary } => {
                write!(f, "Speech API returned HTTP {status}: {summary}")
            }
            SpeechError::Write { path, source } => {
                write!(f, "Could not write audio to {}: {}", path_display(path), source)
            }
        }
    }
}

impl StdError for SpeechError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SpeechError::Spawn { source, .. } => Some(source),
            SpeechError::Http(source) => Some(source),
            SpeechError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechOutput, SpeechError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalEngine {
    /// macOS `say`
    Say,
    /// `espeak` / `espeak-ng`
    Espeak,
}

impl LocalEngine {
    pub fn for_program(program: &str) -> Self {
        let name = Path::new(program)
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if name.contains("espeak") {
            LocalEngine::Espeak
        } else {
            LocalEngine::Say
        }
    }

    pub fn platform_default() -> (&'static str, Self) {
        if cfg!(target_os = "macos") {
            ("say", LocalEngine::Say)
        } else {
            ("espeak", LocalEngine::Espeak)
        }
    }
}

/// Speaks through a program installed on this machine.
pub struct LocalSpeech {
    program: String,
    engine: LocalEngine,
}

impl LocalSpeech {
    pub fn new(program: Option<&str>) -> Self {
        match program {
            Some(program) => Self {
                program: program.to_string(),
                engine: LocalEngine::for_program(program),
            },
            None => {
                let (program, engine) = LocalEngine::platform_default();
                Self {
                    program: program.to_string(),
                    engine,
                }
            }
        }
    }

    pub fn command_args(&self, request: &SpeechRequest) -> Vec<String> {
        let mut args = Vec::new();
        match self.engine {
            LocalEngine::Say => {
                if let Some(rate) = request.rate {
                    args.extend(["-r".to_string(), rate.to_string()]);
                }
                if let Some(voice) = &request.voice {
                    args.extend(["-v".to_string(), voice.clone()]);
                }
                // `say` has no volume flag; it honours an embedded command.
                match request.volume {
                    Some(volume) => args.push(format!("[[volm {volume:.2}]] {}", request.text)),
                    None => args.push(request.text.clone()),
                }
            }
            LocalEngine::Espeak => {
                if let Some(rate) = request.rate {
                    args.extend(["-s".to_string(), rate.to_string()]);
                }
                if let Some(volume) = request.volume {
                    let amplitude = (volume * 100.0).round() as u32;
                    args.extend(["-a".to_string(), amplitude.to_string()]);
                }
                if let Some(voice) = &request.voice {
                    args.extend(["-v".to_string(), voice.clone()]);
                }
                args.push(request.text.clone());
            }
        }
        args
    }
}

#[async_trait]
impl SpeechBackend for LocalSpeech {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechOutput, SpeechError> {
        if request.text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        debug!(program = %self.program, chars = request.text.len(), "Speaking locally");
        let output = Command::new(&self.program)
            .args(self.command_args(&request))
            .output()
            .await
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(SpeechOutput::Played)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(SpeechError::EngineFailed {
                program: self.program.clone(),
                detail: if stderr.is_empty() {
                    output.status.to_string()
                } else {
                    stderr
                },
            })
        }
    }
}

/// Synthesizes through an OpenAI-compatible `/audio/speech` endpoint and
/// saves the audio.
pub struct CloudSpeech {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    output_dir: PathBuf,
}

impl CloudSpeech {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SpeechError::Http)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            output_dir: output_dir.into(),
        })
    }

    /// Build a client with the API key read from `key_env`.
    pub fn from_env(
        key_env: &str,
        base_url: impl Into<String>,
        model: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<Self, SpeechError> {
        let api_key = std::env::var(key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SpeechError::MissingApiKey(key_env.to_string()))?;
        Self::new(base_url, model, api_key, output_dir, timeout)
    }

    /// The endpoint has no volume control, so `request.volume` is ignored.
    pub fn request_body(&self, request: &SpeechRequest) -> SpeechRequestBody {
        let speed = request
            .rate
            .map(|rate| (rate as f32 / CLOUD_BASE_RATE).clamp(0.25, 4.0))
            .unwrap_or(1.0);
        SpeechRequestBody {
            model: self.model.clone(),
            input: request.text.clone(),
            voice: request
                .voice
                .clone()
                .unwrap_or_else(|| DEFAULT_CLOUD_VOICE.to_string()),
            speed,
            response_format: "mp3".to_string(),
        }
    }

    fn next_audio_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%3f");
        self.output_dir.join(format!("reply-{stamp}.mp3"))
    }
}

#[async_trait]
impl SpeechBackend for CloudSpeech {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechOutput, SpeechError> {
        if request.text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        if let Some(volume) = request.volume {
            debug!(volume, "Cloud speech has no volume control, ignoring volume");
        }
        let body = self.request_body(&request);
        debug!(model = %self.model, voice = %body.voice, "Requesting cloud speech");
        let response = self
            .client
            .post(endpoint_url(&self.base_url, "audio/speech"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(SpeechError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::Status {
                status: status.as_u16(),
                summary: summarize_error_body(&error_text),
            });
        }

        let audio = response.bytes().await.map_err(SpeechError::Http)?;
        let path = self.next_audio_path();
        std::fs::create_dir_all(&self.output_dir)
            .and_then(|_| std::fs::write(&path, &audio))
            .map_err(|source| SpeechError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(SpeechOutput::Saved(path))
    }
}

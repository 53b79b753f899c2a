//! Chooses the model and speech backends for a session from config and
//! the environment.

use crate::core::config::defaults::data_dir;
use crate::core::config::{Config, SpeechBackendKind};
use crate::core::model::{GeminiClient, ModelBackend, API_KEY_ENV};
use crate::core::session::NoticeKind;
use crate::core::speech::{CloudSpeech, LocalSpeech, SpeechBackend};
use std::time::Duration;

pub struct Backends {
    pub model: Option<Box<dyn ModelBackend>>,
    pub speech: Option<Box<dyn SpeechBackend>>,
    /// Problems worth telling the user about at startup.
    pub notices: Vec<(NoticeKind, String)>,
}

impl Backends {
    pub fn from_config(config: &Config, offline: bool) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_secs());
        let mut notices = Vec::new();

        let model: Option<Box<dyn ModelBackend>> = if offline {
            notices.push((
                NoticeKind::Info,
                "Offline mode: answers come from the built-in fallback.".to_string(),
            ));
            None
        } else {
            match GeminiClient::from_env(config.api_base_url(), config.model_name(), timeout) {
                Some(Ok(client)) => Some(Box::new(client)),
                Some(Err(err)) => {
                    notices.push((
                        NoticeKind::Error,
                        format!("Could not set up Gemini: {err}"),
                    ));
                    None
                }
                None => {
                    notices.push((
                        NoticeKind::Warning,
                        format!("Gemini is not configured. Set {API_KEY_ENV} to enable model answers."),
                    ));
                    None
                }
            }
        };

        let speech: Option<Box<dyn SpeechBackend>> = match config.speech_backend() {
            SpeechBackendKind::Local => {
                Some(Box::new(LocalSpeech::new(config.speech.engine.as_deref())))
            }
            SpeechBackendKind::Cloud => match CloudSpeech::from_env(
                config.cloud_speech_key_env(),
                config.cloud_speech_url(),
                config.cloud_speech_model(),
                data_dir().join("audio"),
                timeout,
            ) {
                Ok(cloud) => Some(Box::new(cloud)),
                Err(err) => {
                    notices.push((
                        NoticeKind::Warning,
                        format!("{err}; voice output is unavailable."),
                    ));
                    None
                }
            },
        };

        Self {
            model,
            speech,
            notices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_mode_skips_the_model() {
        let backends = Backends::from_config(&Config::default(), true);
        assert!(backends.model.is_none());
        assert!(backends.speech.is_some());
        assert_eq!(backends.notices[0].0, NoticeKind::Info);
    }
}

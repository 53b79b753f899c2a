use crate::core::config::Config;
use crate::core::history::HistoryStore;
use crate::core::message::{Message, Role};
use crate::core::model::{GenerateRequest, ModelBackend, ModelError};
use crate::core::session::ChatSession;
use crate::core::speech::{SpeechBackend, SpeechError, SpeechOutput, SpeechRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Model that answers from a script and records every request.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    pub requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl ScriptedModel {
    pub fn replying(replies: &[&str]) -> Self {
        let model = Self::default();
        {
            let mut queue = model.replies.lock().unwrap();
            queue.extend(replies.iter().map(|reply| Ok(reply.to_string())));
        }
        model
    }

    /// Every call fails with an HTTP 503 carrying `summary`.
    pub fn failing(summary: &str) -> Self {
        let model = Self::default();
        model
            .replies
            .lock()
            .unwrap()
            .extend((0..16).map(|_| Err(summary.to_string())));
        model
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.prompt.clone())
            .collect()
    }
}

#[async_trait]
impl ModelBackend for ScriptedModel {
    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(summary)) => Err(ModelError::Status {
                status: 503,
                summary,
            }),
            None => Ok("Okay.".to_string()),
        }
    }
}

/// Speech backend that records what it was asked to say.
#[derive(Clone, Default)]
pub struct RecordingSpeech {
    pub spoken: Arc<Mutex<Vec<SpeechRequest>>>,
    pub fail: bool,
}

impl RecordingSpeech {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.text.clone())
            .collect()
    }
}

#[async_trait]
impl SpeechBackend for RecordingSpeech {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechOutput, SpeechError> {
        self.spoken.lock().unwrap().push(request);
        if self.fail {
            Err(SpeechError::EngineFailed {
                program: "fake".to_string(),
                detail: "no audio device".to_string(),
            })
        } else {
            Ok(SpeechOutput::Played)
        }
    }
}

pub fn test_store(dir: &TempDir) -> HistoryStore {
    HistoryStore::new(dir.path().join("memory.json"))
}

pub fn create_test_session(
    dir: &TempDir,
    config: &Config,
    model: Option<ScriptedModel>,
    speech: Option<RecordingSpeech>,
) -> ChatSession {
    ChatSession::new(
        config,
        test_store(dir),
        model.map(|m| Box::new(m) as Box<dyn ModelBackend>),
        speech.map(|s| Box::new(s) as Box<dyn SpeechBackend>),
    )
}

pub fn create_test_message(role: Role, text: &str) -> Message {
    Message::new(role, text)
}

pub fn create_test_messages() -> Vec<Message> {
    vec![
        create_test_message(Role::User, "Hello"),
        create_test_message(Role::Assistant, "Hi there!"),
        create_test_message(Role::User, "How are you?"),
        create_test_message(Role::Assistant, "I'm doing well, thank you for asking!"),
    ]
}

pub const LONG_ANSWER: &str = "Recursion is when a function calls itself. Each call works on a smaller piece of the problem. A base case stops the calls. Without one, the stack overflows. Factorial is the classic example.";

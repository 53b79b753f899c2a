//! The turn orchestrator.
//!
//! A [`ChatSession`] owns the conversation log, the session settings, the
//! persona catalog and the injected model/speech backends. Each user action
//! runs to completion before the next one is accepted, and every visible
//! change is reported to a [`SessionObserver`].

use crate::commands::{self, CommandResult};
use crate::core::config::Config;
use crate::core::fallback::{failure_marker, offline_answer};
use crate::core::history::HistoryStore;
use crate::core::message::{AnswerMeta, Message};
use crate::core::model::{GenerateRequest, ModelBackend};
use crate::core::persona::PersonaManager;
use crate::core::prompt;
use crate::core::reader;
use crate::core::settings::{SessionSettings, SettingChange};
use crate::core::speech::{SpeechBackend, SpeechOutput, SpeechRequest};
use crate::core::suggestions::{follow_ups, QuickAction};
use chrono::Local;
use tracing::{debug, warn};

pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your assistant. Ask me anything, or try /help to see commands.";
pub const EMPTY_INPUT_WARNING: &str = "Type a message first.";

/// Severity of a notice shown next to the transcript but never stored in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    MessageAppended(Message),
    Notice { kind: NoticeKind, text: String },
    ConversationCleared,
    TurnCompleted {
        suggestions: Vec<String>,
        can_continue: bool,
    },
}

/// Receives session events; the view refreshes from these instead of
/// re-reading state after every action.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

impl SessionObserver for Vec<SessionEvent> {
    fn on_event(&mut self, event: &SessionEvent) {
        self.push(event.clone());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Send(String),
    SelectSuggestion(usize),
    Quick(QuickAction),
    ContinueReading,
    ChangeSetting(SettingChange),
    /// Wipe the persisted history, leaving the running transcript alone.
    ForgetHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Rejected,
    CommandHandled,
    Answered,
    Continued,
    NothingToContinue,
    SettingsChanged,
    HistoryForgotten,
}

/// Tunables read once from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnLimits {
    pub context_window: usize,
    pub max_sentences: usize,
    pub max_output_tokens: u32,
}

impl TurnLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            context_window: config.context_window(),
            max_sentences: config.max_sentences(),
            max_output_tokens: config.max_output_tokens(),
        }
    }
}

pub struct ChatSession {
    settings: SessionSettings,
    personas: PersonaManager,
    log: Vec<Message>,
    store: HistoryStore,
    model: Option<Box<dyn ModelBackend>>,
    speech: Option<Box<dyn SpeechBackend>>,
    limits: TurnLimits,
    suggestions: Vec<String>,
    startup_notices: Vec<(NoticeKind, String)>,
}

impl ChatSession {
    /// Start a session from persisted history, seeding a welcome message
    /// when there is none.
    pub fn new(
        config: &Config,
        store: HistoryStore,
        model: Option<Box<dyn ModelBackend>>,
        speech: Option<Box<dyn SpeechBackend>>,
    ) -> Self {
        let mut log = store.load();
        debug!(count = log.len(), path = %store.path().display(), "Loaded history");
        if log.is_empty() {
            log.push(Message::assistant(WELCOME_MESSAGE));
        }

        let mut personas = PersonaManager::load_personas(config);
        let startup_notices = personas
            .take_default_error()
            .map(|err| (NoticeKind::Warning, err))
            .into_iter()
            .collect();

        Self {
            settings: SessionSettings::from_config(config),
            personas,
            log,
            store,
            model,
            speech,
            limits: TurnLimits::from_config(config),
            suggestions: Vec::new(),
            startup_notices,
        }
    }

    /// Queue a notice for [`ChatSession::start`].
    pub fn add_startup_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.startup_notices.push((kind, text.into()));
    }

    /// Emit queued startup notices.
    pub fn start(&mut self, observer: &mut dyn SessionObserver) {
        for (kind, text) in self.startup_notices.drain(..) {
            observer.on_event(&SessionEvent::Notice { kind, text });
        }
    }

    pub fn log(&self) -> &[Message] {
        &self.log
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn personas(&self) -> &PersonaManager {
        &self.personas
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Whether "continue reading" applies to the latest message.
    pub fn can_continue(&self) -> bool {
        self.log
            .last()
            .is_some_and(|message| message.remainder().is_some())
    }

    pub async fn handle(
        &mut self,
        action: SessionAction,
        observer: &mut dyn SessionObserver,
    ) -> TurnOutcome {
        match action {
            SessionAction::Send(text) => self.send(&text, observer).await,
            SessionAction::SelectSuggestion(index) => match self.suggestions.get(index).cloned() {
                Some(suggestion) => self.send(&suggestion, observer).await,
                None => {
                    notice(
                        observer,
                        NoticeKind::Warning,
                        format!("No suggestion number {}.", index + 1),
                    );
                    TurnOutcome::Rejected
                }
            },
            SessionAction::Quick(quick) => self.send(quick.prompt(), observer).await,
            SessionAction::ContinueReading => self.continue_reading(observer).await,
            SessionAction::ChangeSetting(change) => {
                self.change_setting(change, observer);
                TurnOutcome::SettingsChanged
            }
            SessionAction::ForgetHistory => {
                self.forget_history(observer);
                TurnOutcome::HistoryForgotten
            }
        }
    }

    pub async fn send(&mut self, input: &str, observer: &mut dyn SessionObserver) -> TurnOutcome {
        let text = input.trim();
        if text.is_empty() {
            notice(observer, NoticeKind::Warning, EMPTY_INPUT_WARNING);
            return TurnOutcome::Rejected;
        }

        self.append(Message::user(text), observer);

        if text.starts_with('/') {
            self.run_command(text, observer).await
        } else {
            self.run_model_turn(text, observer).await
        }
    }

    async fn run_command(&mut self, text: &str, observer: &mut dyn SessionObserver) -> TurnOutcome {
        self.suggestions.clear();
        match commands::process_input(text, Local::now()) {
            CommandResult::Reply(reply) | CommandResult::Unknown(reply) => {
                self.append(Message::command(reply.clone()), observer);
                self.persist(observer);
                self.narrate(&reply, observer).await;
            }
            CommandResult::ClearConversation(confirmation) => {
                self.log.clear();
                observer.on_event(&SessionEvent::ConversationCleared);
                self.persist(observer);
                notice(observer, NoticeKind::Info, confirmation.clone());
                self.narrate(&confirmation, observer).await;
            }
            CommandResult::ProcessAsMessage(message) => {
                return self.run_model_turn(&message, observer).await;
            }
        }
        self.complete_turn(observer);
        TurnOutcome::CommandHandled
    }

    async fn run_model_turn(&mut self, text: &str, observer: &mut dyn SessionObserver) -> TurnOutcome {
        let persona = self.personas.get_active_persona();
        let prompt = prompt::compose(
            text,
            self.limits.context_window,
            persona,
            self.settings.display_name.as_deref(),
            &self.log,
        );

        let (full_text, diagnostic) = match &self.model {
            Some(model) => {
                let request = GenerateRequest {
                    prompt,
                    system_instruction: None,
                    max_tokens: Some(self.limits.max_output_tokens),
                };
                match model.generate(request).await {
                    Ok(answer) => (answer, None),
                    Err(err) => {
                        warn!(error = %err, "Model call failed, answering offline");
                        (
                            offline_answer(text, Local::now()),
                            Some(failure_marker(&err.to_string())),
                        )
                    }
                }
            }
            None => (offline_answer(text, Local::now()), None),
        };

        let trimmed = reader::present(
            &full_text,
            self.settings.smart_read,
            self.limits.max_sentences,
        );
        let answer = Message::assistant(trimmed.displayed.clone()).with_answer(AnswerMeta {
            full_text,
            remainder: trimmed.remainder,
            diagnostic,
        });
        self.append(answer, observer);
        self.persist(observer);
        self.narrate(&trimmed.displayed, observer).await;

        self.suggestions = follow_ups(text).iter().map(|s| s.to_string()).collect();
        self.complete_turn(observer);
        TurnOutcome::Answered
    }

    pub async fn continue_reading(&mut self, observer: &mut dyn SessionObserver) -> TurnOutcome {
        let Some(next) = self.log.last().and_then(reader::continuation) else {
            return TurnOutcome::NothingToContinue;
        };
        let text = next.text.clone();
        self.append(next, observer);
        self.persist(observer);
        self.narrate(&text, observer).await;
        self.complete_turn(observer);
        TurnOutcome::Continued
    }

    fn change_setting(&mut self, change: SettingChange, observer: &mut dyn SessionObserver) {
        let message = match change {
            SettingChange::DisplayName(name) => {
                self.settings.set_display_name(name);
                match &self.settings.display_name {
                    Some(name) => format!("I'll call you {name}."),
                    None => "Display name cleared.".to_string(),
                }
            }
            SettingChange::Persona(id) => match self.personas.set_active_persona(&id) {
                Ok(persona) => format!("Personality: {}", persona.display_name),
                Err(err) => {
                    notice(observer, NoticeKind::Warning, err);
                    return;
                }
            },
            SettingChange::Voice(enabled) => {
                self.settings.voice_enabled = enabled;
                if enabled && self.speech.is_none() {
                    notice(
                        observer,
                        NoticeKind::Warning,
                        "Voice output is on, but no speech engine is available.",
                    );
                }
                format!("Voice output {}", if enabled { "on" } else { "off" })
            }
            SettingChange::SpeechRate(rate) => {
                format!("Speaking rate: {}", self.settings.set_speech_rate(rate))
            }
            SettingChange::SpeechVolume(volume) => {
                format!("Volume: {:.1}", self.settings.set_speech_volume(volume))
            }
            SettingChange::VoiceId(voice) => {
                self.settings.set_voice(voice);
                match &self.settings.voice {
                    Some(voice) => format!("Voice: {voice}"),
                    None => "Voice: default".to_string(),
                }
            }
            SettingChange::SmartRead(enabled) => {
                self.settings.smart_read = enabled;
                format!("Smart read {}", if enabled { "on" } else { "off" })
            }
        };
        notice(observer, NoticeKind::Info, message);
    }

    fn forget_history(&mut self, observer: &mut dyn SessionObserver) {
        match self.store.clear() {
            Ok(()) => notice(observer, NoticeKind::Info, "Memory cleared."),
            Err(err) => {
                warn!(error = %err, "Could not clear history");
                notice(observer, NoticeKind::Error, err.to_string());
            }
        }
    }

    fn append(&mut self, message: Message, observer: &mut dyn SessionObserver) {
        observer.on_event(&SessionEvent::MessageAppended(message.clone()));
        self.log.push(message);
    }

    fn persist(&self, observer: &mut dyn SessionObserver) {
        if let Err(err) = self.store.save(&self.log) {
            warn!(error = %err, "Could not save history");
            notice(observer, NoticeKind::Warning, err.to_string());
        }
    }

    async fn narrate(&self, text: &str, observer: &mut dyn SessionObserver) {
        if !self.settings.voice_enabled {
            return;
        }
        let Some(speech) = &self.speech else {
            return;
        };

        let request = SpeechRequest {
            text: text.to_string(),
            rate: Some(self.settings.speech_rate),
            volume: Some(self.settings.speech_volume),
            voice: self.settings.voice.clone(),
        };
        match speech.synthesize(request).await {
            Ok(SpeechOutput::Played) => {}
            Ok(SpeechOutput::Saved(path)) => notice(
                observer,
                NoticeKind::Info,
                format!("Audio saved to {}", path.display()),
            ),
            Err(err) => {
                warn!(error = %err, "Speech synthesis failed");
                notice(observer, NoticeKind::Warning, format!("TTS failed: {err}"));
            }
        }
    }

    fn complete_turn(&self, observer: &mut dyn SessionObserver) {
        observer.on_event(&SessionEvent::TurnCompleted {
            suggestions: self.suggestions.clone(),
            can_continue: self.can_continue(),
        });
    }
}

fn notice(observer: &mut dyn SessionObserver, kind: NoticeKind, text: impl Into<String>) {
    observer.on_event(&SessionEvent::Notice {
        kind,
        text: text.into(),
    });
}

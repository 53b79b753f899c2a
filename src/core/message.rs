use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout stored with every message.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    /// Synthetic bot turn produced by a slash command.
    Command,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "bot",
            Role::Command => "command",
        }
    }

    /// Speaker label used when the role is rendered into a prompt.
    pub fn prompt_label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant | Role::Command => "Assistant",
        }
    }

    pub fn is_user(self) -> bool {
        self == Role::User
    }

    pub fn is_assistant(self) -> bool {
        self == Role::Assistant
    }
}

impl TryFrom<&str> for Role {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            "bot" | "assistant" => Ok(Role::Assistant),
            "command" => Ok(Role::Command),
            _ => Err(format!("invalid message role: {value}")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// The untrimmed answer behind an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerMeta {
    pub full_text: String,
    /// Withheld tail of `full_text`, `None` once everything is shown.
    pub remainder: Option<String>,
    /// Inline marker shown when the answer came from the offline fallback
    /// after a model failure.
    pub diagnostic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub timestamp: String,
    pub answer: Option<AnswerMeta>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self::at(role, text, Local::now())
    }

    pub fn at(role: Role, text: impl Into<String>, when: DateTime<Local>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: when.format(TIMESTAMP_FORMAT).to_string(),
            answer: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn command(text: impl Into<String>) -> Self {
        Self::new(Role::Command, text)
    }

    pub fn with_answer(mut self, answer: AnswerMeta) -> Self {
        self.answer = Some(answer);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    pub fn is_assistant(&self) -> bool {
        self.role.is_assistant()
    }

    /// The withheld tail of this answer, if it can still be continued.
    pub fn remainder(&self) -> Option<&str> {
        if !self.is_assistant() {
            return None;
        }
        self.answer.as_ref()?.remainder.as_deref()
    }

    pub fn full_text(&self) -> Option<&str> {
        self.answer.as_ref().map(|answer| answer.full_text.as_str())
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.answer.as_ref()?.diagnostic.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_through_strings() {
        for role in [Role::User, Role::Assistant, Role::Command] {
            assert_eq!(Role::try_from(role.as_str()), Ok(role));
        }
    }

    #[test]
    fn assistant_alias_is_accepted() {
        assert_eq!(Role::try_from("assistant"), Ok(Role::Assistant));
    }

    #[test]
    fn invalid_role_strings_are_rejected() {
        assert!(Role::try_from("system").is_err());
    }

    #[test]
    fn command_replies_render_as_assistant_in_prompts() {
        assert_eq!(Role::Command.prompt_label(), "Assistant");
        assert_eq!(Role::User.prompt_label(), "User");
    }

    #[test]
    fn remainder_only_reported_for_assistant_answers() {
        let answer = AnswerMeta {
            full_text: "One. Two.".to_string(),
            remainder: Some("Two.".to_string()),
            diagnostic: None,
        };
        let bot = Message::assistant("One. ...").with_answer(answer.clone());
        assert_eq!(bot.remainder(), Some("Two."));

        let echoed = Message::command("One. ...").with_answer(answer);
        assert_eq!(echoed.remainder(), None);

        assert_eq!(Message::assistant("plain").remainder(), None);
    }

    #[test]
    fn timestamps_use_the_stored_layout() {
        let when = Local::now();
        let message = Message::at(Role::User, "hi", when);
        assert_eq!(message.timestamp, when.format(TIMESTAMP_FORMAT).to_string());
        assert_eq!(message.timestamp.len(), 19);
    }
}

//! Rule-based answers used when the model cannot be reached.

use chrono::{DateTime, Local};

pub const OFFLINE_GREETING: &str = "Hi, I'm offline right now, but I can still answer a few simple questions. Try asking 'time' or 'date'.";
pub const OFFLINE_TIME_NOTE: &str =
    "I can't fetch external data offline, but your system time is available locally.";
pub const OFFLINE_JOKE: &str =
    "Why did the programmer quit his job? Because he didn't get arrays (a raise).";
pub const OFFLINE_APOLOGY: &str =
    "Sorry, I can't reach Gemini now. Try again later or enable offline-friendly prompts.";

/// Full weekday, month name, day and year.
pub const LONG_DATE_FORMAT: &str = "%A, %B %d, %Y";

/// Answer `message` without a model. Rules are checked in order and the
/// first match wins; "time" and "date" are plain substring checks.
pub fn offline_answer(message: &str, now: DateTime<Local>) -> String {
    let text = message.trim().to_lowercase();
    if matches!(text.as_str(), "hi" | "hello" | "hey") {
        return OFFLINE_GREETING.to_string();
    }
    if text.contains("time") {
        return OFFLINE_TIME_NOTE.to_string();
    }
    if text.contains("date") {
        return now.format(LONG_DATE_FORMAT).to_string();
    }
    if text.contains("joke") {
        return OFFLINE_JOKE.to_string();
    }
    OFFLINE_APOLOGY.to_string()
}

/// Inline marker shown with a fallback answer after a model failure.
pub fn failure_marker(detail: &str) -> String {
    format!("⚠️ Gemini error: {detail}. (Falling back offline.)")
}

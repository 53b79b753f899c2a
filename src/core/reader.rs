//! Smart read: show the first few sentences of a long answer and keep the
//! rest for an explicit "continue reading" action.

use crate::core::message::{AnswerMeta, Message, Role};

/// Appended to a trimmed head.
pub const ELLIPSIS: &str = " ...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trimmed {
    pub displayed: String,
    pub remainder: Option<String>,
}

/// Split after every `.`, `!` or `?` that is followed by whitespace.
///
/// Abbreviations and decimals are not special-cased: "e.g. this" splits
/// after "e.g." and "3.5" does not split at all.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let Some(&(next_index, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }
        sentences.push(&text[start..index + ch.len_utf8()]);
        start = next_index;
        while let Some(&(ws_index, ws)) = chars.peek() {
            if !ws.is_whitespace() {
                break;
            }
            chars.next();
            start = ws_index + ws.len_utf8();
        }
    }

    sentences.push(&text[start..]);
    sentences
}

/// Keep the first `max_sentences` sentences of `full_text`.
pub fn trim(full_text: &str, max_sentences: usize) -> Trimmed {
    let sentences = split_sentences(full_text);
    if sentences.len() <= max_sentences {
        return Trimmed {
            displayed: full_text.to_string(),
            remainder: None,
        };
    }

    let (head, tail) = sentences.split_at(max_sentences);
    Trimmed {
        displayed: format!("{}{}", head.join(" "), ELLIPSIS),
        remainder: Some(tail.join(" ")),
    }
}

/// Apply the smart-read setting to a model answer.
pub fn present(full_text: &str, smart_read: bool, max_sentences: usize) -> Trimmed {
    if smart_read {
        trim(full_text, max_sentences)
    } else {
        Trimmed {
            displayed: full_text.to_string(),
            remainder: None,
        }
    }
}

/// The message revealing the rest of `last`, when it has a remainder.
pub fn continuation(last: &Message) -> Option<Message> {
    let remainder = last.remainder()?;
    let full_text = last.full_text()?;
    Some(
        Message::new(Role::Assistant, remainder).with_answer(AnswerMeta {
            full_text: full_text.to_string(),
            remainder: None,
            diagnostic: None,
        }),
    )
}

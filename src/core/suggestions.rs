/// Follow-up prompts offered after a model-backed turn.
pub fn follow_ups(user_message: &str) -> [&'static str; 3] {
    let text = user_message.to_lowercase();
    if text.contains("weather") {
        ["Tomorrow's forecast", "Weekly summary", "Humidity details"]
    } else if text.contains("joke") || text.contains("fun") {
        ["Another joke", "Short pun", "Clean joke"]
    } else {
        ["Explain simply", "Give an example", "Summarize in 2 lines"]
    }
}

/// Canned prompts that start a turn with one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Weather,
    Joke,
    Quote,
    News,
}

impl QuickAction {
    pub fn prompt(self) -> &'static str {
        match self {
            QuickAction::Weather => "weather Delhi",
            QuickAction::Joke => "tell me a joke",
            QuickAction::Quote => "inspirational quote",
            QuickAction::News => "latest news headlines",
        }
    }
}

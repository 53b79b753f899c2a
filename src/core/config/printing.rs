use crate::core::config::data::{path_display, Config, SpeechBackendKind};

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        println!("  model: {}", self.model_name());
        println!("  base-url: {}", self.api_base_url());
        println!("  max-output-tokens: {}", self.max_output_tokens());
        println!("  context-window: {}", self.context_window());
        println!("  max-sentences: {}", self.max_sentences());
        println!("  smart-read: {}", on_off(self.smart_read()));
        println!("  history-file: {}", path_display(self.history_path()));
        match &self.display_name {
            Some(name) => println!("  display-name: {name}"),
            None => println!("  display-name: (unset)"),
        }
        match &self.default_persona {
            Some(persona) => println!("  default-persona: {persona}"),
            None => println!("  default-persona: (unset)"),
        }
        let backend = match self.speech_backend() {
            SpeechBackendKind::Local => "local",
            SpeechBackendKind::Cloud => "cloud",
        };
        println!("  speech-backend: {backend}");
        println!("  voice: {}", on_off(self.speech.voice_on.unwrap_or(false)));
        if self.personas.is_empty() {
            println!("  personas: (none defined)");
        } else {
            println!("  personas:");
            for persona in &self.personas {
                println!("    {}: {}", persona.id, persona.display_name);
            }
        }
    }
}

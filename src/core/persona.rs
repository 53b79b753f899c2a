use crate::core::config::{Config, Persona};

/// Instruction every persona builds on.
pub const BASE_INSTRUCTION: &str = "You are a helpful assistant.";

/// Identifier of the persona that is always available.
pub const DEFAULT_PERSONA_ID: &str = "friendly";

/// The tone presets shipped with the binary.
pub fn builtin_personas() -> Vec<Persona> {
    [
        (
            "friendly",
            "Friendly",
            "Be friendly, clear, and encouraging.",
        ),
        (
            "formal",
            "Formal",
            "Answer politely, concisely, and formally.",
        ),
        (
            "playful",
            "Playful",
            "Be playful, use light humor and friendly tone.",
        ),
        (
            "sarcastic",
            "Sarcastic",
            "Use mild sarcasm and witty lines while staying helpful.",
        ),
        (
            "teacher",
            "Teacher",
            "Explain clearly with examples and simple language.",
        ),
    ]
    .into_iter()
    .map(|(id, display_name, instruction)| Persona {
        id: id.to_string(),
        display_name: display_name.to_string(),
        instruction: instruction.to_string(),
    })
    .collect()
}

/// Manages the persona catalog and the active selection.
pub struct PersonaManager {
    /// Built-ins merged with config-defined personas
    personas: Vec<Persona>,
    /// Index into `personas`
    active: usize,
    /// Why the configured default could not be selected.
    default_error: Option<String>,
}

impl PersonaManager {
    /// Build the catalog from the built-ins and the personas in `config`.
    ///
    /// A config persona whose id matches a built-in replaces it. The
    /// configured default persona becomes active when it exists; otherwise
    /// the friendly persona is active and the rejection is kept for
    /// [`PersonaManager::take_default_error`].
    pub fn load_personas(config: &Config) -> Self {
        let mut personas = builtin_personas();
        for custom in &config.personas {
            match personas
                .iter_mut()
                .find(|p| p.id.eq_ignore_ascii_case(&custom.id))
            {
                Some(existing) => *existing = custom.clone(),
                None => personas.push(custom.clone()),
            }
        }

        let mut manager = PersonaManager {
            personas,
            active: 0,
            default_error: None,
        };
        manager.active = manager.index_of(DEFAULT_PERSONA_ID).unwrap_or(0);
        if let Some(id) = config.default_persona.as_deref() {
            if let Err(err) = manager.set_active_persona(id) {
                manager.default_error = Some(err);
            }
        }
        manager
    }

    pub fn take_default_error(&mut self) -> Option<String> {
        self.default_error.take()
    }

    pub fn list_personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn find_persona_by_id(&self, id: &str) -> Option<&Persona> {
        self.index_of(id).map(|index| &self.personas[index])
    }

    pub fn set_active_persona(&mut self, persona_id: &str) -> Result<&Persona, String> {
        match self.index_of(persona_id) {
            Some(index) => {
                self.active = index;
                Ok(&self.personas[index])
            }
            None => {
                let available_ids: Vec<&str> =
                    self.personas.iter().map(|p| p.id.as_str()).collect();
                Err(format!(
                    "Persona '{}' not found. Available personas: {}",
                    persona_id,
                    available_ids.join(", ")
                ))
            }
        }
    }

    pub fn get_active_persona(&self) -> &Persona {
        &self.personas[self.active]
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.personas
            .iter()
            .position(|p| p.id.eq_ignore_ascii_case(id.trim()))
    }
}

impl Persona {
    /// Base instruction followed by this persona's tone.
    pub fn system_instruction(&self) -> String {
        format!("{} {}", BASE_INSTRUCTION, self.instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_custom_personas() -> Config {
        Config {
            personas: vec![
                Persona {
                    id: "pirate".to_string(),
                    display_name: "Pirate".to_string(),
                    instruction: "Talk like a pirate.".to_string(),
                },
                Persona {
                    id: "Formal".to_string(),
                    display_name: "Very Formal".to_string(),
                    instruction: "Answer with utmost ceremony.".to_string(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn friendly_is_active_by_default() {
        let manager = PersonaManager::load_personas(&Config::default());
        assert_eq!(manager.get_active_persona().id, "friendly");
        assert_eq!(manager.list_personas().len(), 5);
    }

    #[test]
    fn builtin_instructions_extend_the_base() {
        let manager = PersonaManager::load_personas(&Config::default());
        let teacher = manager.find_persona_by_id("teacher").expect("teacher");
        assert_eq!(
            teacher.system_instruction(),
            "You are a helpful assistant. Explain clearly with examples and simple language."
        );
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let mut manager = PersonaManager::load_personas(&Config::default());
        let selected = manager.set_active_persona("  SARCASTIC ").expect("sarcastic");
        assert_eq!(selected.display_name, "Sarcastic");
        assert_eq!(manager.get_active_persona().id, "sarcastic");
    }

    #[test]
    fn unknown_persona_is_rejected_and_selection_kept() {
        let mut manager = PersonaManager::load_personas(&Config::default());
        manager.set_active_persona("playful").expect("playful");

        let err = manager.set_active_persona("grumpy").expect_err("unknown persona");
        assert!(err.contains("Persona 'grumpy' not found"));
        assert!(err.contains("friendly, formal, playful, sarcastic, teacher"));
        assert_eq!(manager.get_active_persona().id, "playful");
    }

    #[test]
    fn config_personas_extend_and_replace_builtins() {
        let manager = PersonaManager::load_personas(&config_with_custom_personas());
        assert_eq!(manager.list_personas().len(), 6);
        assert_eq!(
            manager.find_persona_by_id("formal").map(|p| p.instruction.as_str()),
            Some("Answer with utmost ceremony.")
        );
        assert!(manager.find_persona_by_id("pirate").is_some());
    }

    #[test]
    fn configured_default_persona_is_activated() {
        let config = Config {
            default_persona: Some("Teacher".to_string()),
            ..Default::default()
        };
        let manager = PersonaManager::load_personas(&config);
        assert_eq!(manager.get_active_persona().id, "teacher");
    }

    #[test]
    fn unknown_configured_default_falls_back_to_friendly() {
        let config = Config {
            default_persona: Some("nobody".to_string()),
            ..Default::default()
        };
        let mut manager = PersonaManager::load_personas(&config);
        assert_eq!(manager.get_active_persona().id, "friendly");

        let err = manager.take_default_error().expect("rejected default");
        assert!(err.starts_with("Persona 'nobody' not found."));
        assert_eq!(manager.take_default_error(), None);
    }

    #[test]
    fn valid_configured_default_records_no_error() {
        let config = Config {
            default_persona: Some("formal".to_string()),
            ..Default::default()
        };
        let mut manager = PersonaManager::load_personas(&config);
        assert_eq!(manager.take_default_error(), None);
    }
}

use super::data::{Config, Persona, SpeechBackendKind};
use super::defaults::{DEFAULT_CONTEXT_WINDOW, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL};
use super::io::ConfigError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.model_name(), DEFAULT_MODEL);
    assert_eq!(config.context_window(), DEFAULT_CONTEXT_WINDOW);
    assert_eq!(config.max_output_tokens(), DEFAULT_MAX_OUTPUT_TOKENS);
    assert!(config.smart_read());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        model: Some("gemini-1.5-pro".to_string()),
        display_name: Some("Sam".to_string()),
        personas: vec![Persona {
            id: "pirate".to_string(),
            display_name: "Pirate".to_string(),
            instruction: "Talk like a pirate.".to_string(),
        }],
        ..Default::default()
    };
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let mut loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);

    loaded.unset_value("display-name").expect("unset");
    loaded
        .save_to_path(&config_path)
        .expect("Failed to save config");
    let reloaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(reloaded.display_name, None);
    assert_eq!(reloaded.model_name(), "gemini-1.5-pro");
}

#[test]
fn test_parse_full_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
model = "gemini-2.0-flash"
context_window = 4
smart_read = false
default_persona = "teacher"

[speech]
backend = "cloud"
voice = "alloy"
rate = 180
volume = 0.5

[[personas]]
id = "coach"
display_name = "Coach"
instruction = "Motivate the user like a sports coach."
"#,
    )
    .expect("write config");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(config.model_name(), "gemini-2.0-flash");
    assert_eq!(config.context_window(), 4);
    assert!(!config.smart_read());
    assert_eq!(config.speech_backend(), SpeechBackendKind::Cloud);
    assert_eq!(config.speech.voice.as_deref(), Some("alloy"));
    assert_eq!(config.speech.rate, Some(180));
    assert_eq!(config.personas.len(), 1);
}

#[test]
fn test_invalid_toml_reports_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "model = [unterminated").expect("write config");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn test_set_value_validates_input() {
    let mut config = Config::default();

    assert!(config.set_value("smart-read", "off").is_ok());
    assert_eq!(config.smart_read, Some(false));

    assert!(config.set_value("speech-backend", "Cloud").is_ok());
    assert_eq!(config.speech_backend(), SpeechBackendKind::Cloud);

    assert!(config.set_value("context-window", "0").is_err());
    assert!(config.set_value("voice", "maybe").is_err());
    assert!(config.set_value("display-name", "   ").is_err());

    let err = config.set_value("theme", "dark").expect_err("unknown key");
    assert!(err.contains("Unknown config key: theme"));
}

#[test]
fn test_max_sentences_never_zero() {
    let config = Config {
        max_sentences: Some(0),
        ..Default::default()
    };
    assert_eq!(config.max_sentences(), 1);
}

use super::*;
use crate::core::config::SpeechBackendKind;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn bare_invocation_starts_chat() {
    let args = parse_args(&["parley"]);
    assert_eq!(args.command, None);
    assert!(!args.offline);
    assert!(!args.voice);
}

#[test]
fn say_collects_the_whole_prompt() {
    let args = parse_args(&["parley", "say", "what", "is", "-1", "squared"]);
    assert_eq!(
        args.command,
        Some(Commands::Say {
            prompt: vec![
                "what".to_string(),
                "is".to_string(),
                "-1".to_string(),
                "squared".to_string()
            ]
        })
    );
}

#[test]
fn set_accepts_multi_word_values() {
    let args = parse_args(&["parley", "set", "display-name", "Ada", "Lovelace"]);
    match args.command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, "display-name");
            assert_eq!(value.join(" "), "Ada Lovelace");
        }
        other => panic!("expected set, got {other:?}"),
    }
}

#[test]
fn global_flags_work_after_the_subcommand() {
    let args = parse_args(&["parley", "chat", "--persona", "teacher", "--offline"]);
    assert_eq!(args.command, Some(Commands::Chat));
    assert_eq!(args.persona.as_deref(), Some("teacher"));
    assert!(args.offline);
}

#[test]
fn flags_override_config_for_the_run() {
    let args = parse_args(&[
        "parley",
        "--persona",
        "sarcastic",
        "--name",
        "Sam",
        "--voice",
        "--no-smart-read",
        "--history",
        "/tmp/parley-memory.json",
    ]);
    let mut config = Config {
        default_persona: Some("formal".to_string()),
        ..Default::default()
    };
    config.speech.backend = Some(SpeechBackendKind::Cloud);

    args.apply_to(&mut config);

    assert_eq!(config.default_persona.as_deref(), Some("sarcastic"));
    assert_eq!(config.display_name.as_deref(), Some("Sam"));
    assert_eq!(config.speech.voice_on, Some(true));
    assert_eq!(config.speech.backend, Some(SpeechBackendKind::Cloud));
    assert!(!config.smart_read());
    assert_eq!(
        config.history_path(),
        PathBuf::from("/tmp/parley-memory.json")
    );
}

#[test]
fn absent_flags_leave_config_alone() {
    let args = parse_args(&["parley"]);
    let mut config = Config {
        display_name: Some("Ada".to_string()),
        smart_read: Some(true),
        ..Default::default()
    };
    let before = config.clone();
    args.apply_to(&mut config);
    assert_eq!(config, before);
}

#[test]
fn unknown_subcommands_are_rejected() {
    assert!(Args::try_parse_from(["parley", "teleport"]).is_err());
}

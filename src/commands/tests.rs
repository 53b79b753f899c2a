use super::*;
use chrono::TimeZone;

fn fixed_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2025, 3, 14, 7, 5, 9)
        .single()
        .expect("unambiguous local time")
}

fn reply(input: &str) -> CommandResult {
    process_input(input, fixed_now())
}

#[test]
fn plain_text_is_processed_as_message() {
    assert_eq!(
        reply("hello /help"),
        CommandResult::ProcessAsMessage("hello /help".to_string())
    );
}

#[test]
fn commands_ignore_case_and_surrounding_whitespace() {
    assert_eq!(reply("  /DATE \n"), reply("/date"));
    assert_eq!(reply("/Time"), reply("/time"));
}

#[test]
fn time_uses_twenty_four_hour_clock() {
    assert_eq!(
        reply("/time"),
        CommandResult::Reply("🕒 Current time: 07:05:09".to_string())
    );
}

#[test]
fn date_uses_long_format() {
    assert_eq!(
        reply("/date"),
        CommandResult::Reply("📅 Friday, March 14, 2025".to_string())
    );
}

#[test]
fn clear_asks_for_the_conversation_to_be_emptied() {
    assert_eq!(
        reply("/clear"),
        CommandResult::ClearConversation(CLEARED_REPLY.to_string())
    );
}

#[test]
fn help_lists_every_command() {
    let CommandResult::Reply(help) = reply("/help") else {
        panic!("help should reply");
    };
    for command in all_commands() {
        assert!(help.contains(&format!("/{}", command.name)));
    }
    assert!(help.lines().count() > all_commands().len());
}

#[test]
fn about_names_the_assistant() {
    let CommandResult::Reply(about) = reply("/about") else {
        panic!("about should reply");
    };
    assert!(about.contains("Parley"));
    assert!(about.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_and_partial_commands_are_rejected() {
    for input in ["/weather", "/help me", "/", "//time", "/ time"] {
        assert_eq!(
            reply(input),
            CommandResult::Unknown(UNKNOWN_COMMAND_REPLY.to_string()),
            "input {input:?}"
        );
    }
}

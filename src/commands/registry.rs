use super::CommandResult;
use chrono::{DateTime, Local};

pub type CommandHandler = fn(CommandInvocation) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation {
    pub now: DateTime<Local>,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        help: "show this help",
        handler: super::handle_help,
    },
    Command {
        name: "clear",
        help: "clear conversation (session)",
        handler: super::handle_clear,
    },
    Command {
        name: "time",
        help: "current time",
        handler: super::handle_time,
    },
    Command {
        name: "date",
        help: "current date",
        handler: super::handle_date,
    },
    Command {
        name: "about",
        help: "about this bot",
        handler: super::handle_about,
    },
];

//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments, sets up logging and routes to
//! the interactive chat, the one-shot `say` command or config maintenance.

pub mod say;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::backends::Backends;
use crate::core::config::Config;
use crate::core::history::HistoryStore;
use crate::core::session::ChatSession;
use crate::ui::chat_loop::run_chat;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PARLEY_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "parley")]
#[command(version)]
#[command(about = "A terminal chat assistant backed by Gemini")]
#[command(
    long_about = "Parley is a line-mode chat assistant that sends your messages, with recent \
conversation context and a chosen personality, to Google's Gemini API. Long answers are \
shown a few sentences at a time, answers can be read aloud, and the conversation is \
remembered between runs.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY    Your Gemini API key (without it, answers come from a small offline fallback)\n\
  GEMINI_BASE_URL   Custom API base URL (optional)\n\
  PARLEY_LOG        Log filter, e.g. 'debug' (logs go to stderr)\n\n\
Commands (type in chat):\n\
  /help /clear /time /date /about\n\n\
Controls (type in chat):\n\
  :more             Continue reading a long answer\n\
  :1 :2 :3          Ask a suggested follow-up\n\
  :help             List every control\n\
  :quit             Leave"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Personality to start with (friendly, formal, playful, sarcastic, teacher)
    #[arg(long, global = true)]
    pub persona: Option<String>,

    /// Name the assistant should call you
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Read answers aloud
    #[arg(long, global = true)]
    pub voice: bool,

    /// Show whole answers instead of the first few sentences
    #[arg(long, global = true)]
    pub no_smart_read: bool,

    /// Conversation memory file to use instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Do not contact Gemini; use the offline fallback only
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start the chat (default)
    Chat,
    /// Ask a single question and print the answer
    Say {
        /// The question
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Print the effective configuration
    Config,
    /// Erase the saved conversation memory
    Forget,
}

impl Args {
    /// Layer command-line flags over the loaded config for this run.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(persona) = &self.persona {
            config.default_persona = Some(persona.clone());
        }
        if let Some(name) = &self.name {
            config.display_name = Some(name.clone());
        }
        if self.voice {
            config.speech.voice_on = Some(true);
        }
        if self.no_smart_read {
            config.smart_read = Some(false);
        }
        if let Some(history) = &self.history {
            config.history_file = Some(history.clone());
        }
    }
}

pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build a session with backends chosen from `config` and the environment.
pub fn build_session(config: &Config, offline: bool) -> ChatSession {
    let backends = Backends::from_config(config, offline);
    let mut session = ChatSession::new(
        config,
        HistoryStore::new(config.history_path()),
        backends.model,
        backends.speech,
    );
    for (kind, text) in backends.notices {
        session.add_startup_notice(kind, text);
    }
    session
}

pub fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut config = Config::load()?;
    args.apply_to(&mut config);

    match args.command.clone().unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(build_session(&config, args.offline)).await,
        Commands::Say { prompt } => say::run_say(prompt, &config, args.offline).await,
        Commands::Set { key, value } => {
            // Flags only apply to this run; persist the file as written.
            let mut stored = Config::load()?;
            match stored.set_value(&key, &value.join(" ")) {
                Ok(message) => {
                    stored.save()?;
                    println!("✅ {message}");
                }
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut stored = Config::load()?;
            match stored.unset_value(&key) {
                Ok(message) => {
                    stored.save()?;
                    println!("✅ {message}");
                }
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Config => {
            config.print_all();
            Ok(())
        }
        Commands::Forget => {
            HistoryStore::new(config.history_path()).clear()?;
            println!("✅ Memory cleared.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;

//! One-shot "say" command

use std::error::Error;
use std::io::{self, Write};

use crate::cli::build_session;
use crate::core::config::Config;
use crate::core::session::{SessionEvent, SessionObserver};
use crate::ui::renderer::format_notice;

/// Prints answer text to one writer and everything else to another.
pub struct SayPrinter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> SayPrinter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }
}

impl<O: Write, E: Write> SessionObserver for SayPrinter<O, E> {
    fn on_event(&mut self, event: &SessionEvent) {
        let written = match event {
            SessionEvent::MessageAppended(message) if !message.is_user() => {
                writeln!(self.out, "{}", message.text).and_then(|_| match message.diagnostic() {
                    Some(diagnostic) => writeln!(self.err, "{diagnostic}"),
                    None => Ok(()),
                })
            }
            SessionEvent::Notice { kind, text } => {
                writeln!(self.err, "{}", format_notice(*kind, text))
            }
            _ => Ok(()),
        };
        if let Err(err) = written {
            tracing::warn!(error = %err, "Could not print answer");
        }
    }
}

pub async fn run_say(
    prompt: Vec<String>,
    config: &Config,
    offline: bool,
) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: parley say <prompt>");
        std::process::exit(1);
    }

    // Smart read is a chat affordance; a one-shot answer prints in full.
    let mut config = config.clone();
    config.smart_read = Some(false);

    let mut session = build_session(&config, offline);
    let mut printer = SayPrinter::new(io::stdout(), io::stderr());
    session.start(&mut printer);
    session.send(&prompt, &mut printer).await;
    io::stdout().flush()?;
    Ok(())
}

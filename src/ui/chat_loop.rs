//! Line-mode chat loop
//!
//! Reads one line at a time from stdin, routes `:` controls and chat input
//! to the [`ChatSession`], and prints whatever the session reports.

use crate::core::message::Message;
use crate::core::session::{ChatSession, NoticeKind, SessionEvent, SessionObserver};
use crate::ui::controls::{controls_help, parse_control, Control};
use crate::ui::renderer::{
    format_message, format_notice, format_personas, format_settings, format_turn_footer,
};
use std::error::Error;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const INPUT_PROMPT: &str = "> ";

/// Prints session events to a writer.
pub struct LineView<W: Write> {
    out: W,
    display_name: Option<String>,
    /// The next user message was typed and is already on screen.
    skip_typed_echo: bool,
}

impl<W: Write> LineView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            display_name: None,
            skip_typed_echo: false,
        }
    }

    pub fn set_display_name(&mut self, name: Option<String>) {
        self.display_name = name;
    }

    pub fn show_transcript(&mut self, log: &[Message]) {
        for message in log {
            let rendered = format_message(message, self.display_name.as_deref());
            self.emit(&rendered);
        }
    }

    /// Call before sending typed input so it is not printed twice.
    pub fn expect_typed_echo(&mut self) {
        self.skip_typed_echo = true;
    }

    pub fn show(&mut self, text: &str) {
        self.emit(text);
    }

    pub fn notice(&mut self, kind: NoticeKind, text: &str) {
        self.emit(&format_notice(kind, text));
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{INPUT_PROMPT}")?;
        self.out.flush()
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!(error = %err, "Could not write to the terminal");
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SessionObserver for LineView<W> {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::MessageAppended(message)
                if message.is_user() && self.skip_typed_echo =>
            {
                self.skip_typed_echo = false;
            }
            SessionEvent::MessageAppended(message) => {
                let rendered = format_message(message, self.display_name.as_deref());
                self.emit(&rendered);
            }
            SessionEvent::Notice { kind, text } => self.notice(*kind, text),
            SessionEvent::ConversationCleared => self.emit(""),
            SessionEvent::TurnCompleted {
                suggestions,
                can_continue,
            } => {
                if let Some(footer) = format_turn_footer(suggestions, *can_continue) {
                    self.emit(&footer);
                }
            }
        }
    }
}

/// Run an interactive session until `:quit` or end of input.
pub async fn run_chat(mut session: ChatSession) -> Result<(), Box<dyn Error>> {
    let mut view = LineView::new(io::stdout());
    view.set_display_name(session.settings().display_name.clone());
    view.show_transcript(session.log());
    view.show("Type :help for controls, /help for commands.");
    session.start(&mut view);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        view.prompt()?;
        let Some(line) = lines.next_line().await? else {
            debug!("Input closed, leaving chat");
            break;
        };

        match parse_control(&line) {
            None => {
                view.expect_typed_echo();
                session.send(&line, &mut view).await;
                // Rejected input appends nothing to consume the flag.
                view.skip_typed_echo = false;
            }
            Some(Err(usage)) => view.notice(NoticeKind::Warning, &usage),
            Some(Ok(Control::Quit)) => break,
            Some(Ok(Control::ShowHelp)) => view.show(&controls_help()),
            Some(Ok(Control::ShowSettings)) => {
                view.show(&format_settings(session.settings(), session.personas()))
            }
            Some(Ok(Control::ListPersonas)) => view.show(&format_personas(session.personas())),
            Some(Ok(Control::Session(action))) => {
                let outcome = session.handle(action, &mut view).await;
                debug!(?outcome, "Handled control");
            }
        }
        view.set_display_name(session.settings().display_name.clone());
    }

    Ok(())
}

//! Line-mode terminal view for interactive sessions.
//!
//! - [`chat_loop`]: reads input, dispatches it to [`crate::core::session`]
//!   and prints the resulting events.
//! - [`controls`]: parsing of `:`-prefixed view controls.
//! - [`renderer`]: plain-text formatting of messages, notices and hints.
//!
//! This layer only presents and captures interaction; [`crate::core`] owns
//! the conversation and backend coordination.

pub mod chat_loop;
pub mod controls;
pub mod renderer;

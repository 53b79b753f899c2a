//! Parley is a terminal chat assistant for Google's Gemini API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation log and its persistence, prompt
//!   composition, smart-read trimming, personas, and the turn orchestrator
//!   that drives the model and speech backends.
//! - [`commands`] implements the slash commands answered locally without a
//!   model call.
//! - [`ui`] is the line-mode terminal view that feeds user actions into a
//!   session and prints the events it reports.
//! - [`api`] defines the wire payloads for the Gemini and speech endpoints.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which builds a [`core::session::ChatSession`]
//! and hands it to [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;

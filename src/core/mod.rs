pub mod backends;
pub mod config;
pub mod fallback;
pub mod history;
pub mod message;
pub mod model;
pub mod persona;
pub mod prompt;
pub mod reader;
pub mod session;
pub mod settings;
pub mod speech;
pub mod suggestions;

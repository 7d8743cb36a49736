//! Telegram bot handler tree configuration
//!
//! The dispatcher schema lives here together with the command logic. Command
//! logic renders [`Reply`] values without touching the Bot API, so tests can
//! drive it with an in-memory store.

mod commands;
mod schema;
mod types;

pub use commands::{reply_for_error, respond, select_player, Reply};
pub use schema::schema;
pub use types::{Fan, HandlerDeps, HandlerError};

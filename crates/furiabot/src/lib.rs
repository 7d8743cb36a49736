//! furiabot - Telegram front-end for FURIA CS fans
//!
//! Fans pick a favorite player, earn XP and unlock achievements; the
//! progression rules live in `furiacore`, this crate only wires them to
//! Telegram.
//!
//! # Module Structure
//!
//! - `cli`: command-line interface
//! - `telegram`: bot construction, commands, dispatcher schema and replies

pub mod cli;
pub mod telegram;

pub use telegram::{create_bot, schema, setup_bot_commands, Command, HandlerDeps};

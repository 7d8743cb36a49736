//! furiacore - fan progression core for the FURIA CS Telegram bot
//!
//! Everything here is Telegram-agnostic; the bot crate wires it to teloxide.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging
//! - `news`: read side of the team and player news feed
//! - `progress`: fan profiles, XP/levels, achievements and the `FanTracker`
//! - `roster`: the team line-up used for player selection
//! - `storage`: the `ProfileStore` and `NewsStore` seams with MongoDB and in-memory backends

pub mod core;
pub mod news;
pub mod progress;
pub mod roster;
pub mod storage;

// Re-export commonly used types for convenience
pub use core::{config::Config, AppError, AppResult};
pub use news::{NewsFeed, NewsItem, NewsScope};
pub use progress::{FanProfile, FanTracker, XpAward};
pub use storage::{MemoryStore, MongoStore, NewsStore, ProfileStore};

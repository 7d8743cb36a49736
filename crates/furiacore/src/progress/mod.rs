//! Fan progression: profile model, XP levels, achievements and the tracker

pub mod achievements;
pub mod level;
mod profile;
mod tracker;

pub use level::{level_for_xp, xp_for_level, LevelProgress, MAX_LEVEL};
pub use profile::FanProfile;
pub use tracker::{FanTracker, XpAward};

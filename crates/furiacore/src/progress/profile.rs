use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::level::LevelProgress;

/// Persisted progression record, one per Telegram user.
///
/// Stored in the `fans` collection; `user_id` carries a unique index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanProfile {
    /// Telegram user ID
    pub user_id: i64,
    /// Telegram @username, refreshed on every interaction when available
    #[serde(default)]
    pub username: Option<String>,
    /// Favorite player picked during onboarding
    #[serde(default)]
    pub chosen_player: Option<String>,
    /// Experience points; never negative
    #[serde(default)]
    pub xp: i64,
    /// Unlocked achievement ids in unlock order, without duplicates
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Number of bot commands processed for this fan
    #[serde(default)]
    pub interactions: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub last_active: DateTime<Utc>,
}

impl FanProfile {
    /// A fresh profile: no player, zero XP, no achievements.
    pub fn new(user_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            username: None,
            chosen_player: None,
            xp: 0,
            achievements: Vec::new(),
            interactions: 0,
            created_at: now,
            updated_at: now,
            last_active: now,
        }
    }

    pub fn has_achievement(&self, achievement_id: &str) -> bool {
        self.achievements.iter().any(|a| a == achievement_id)
    }

    pub fn level(&self) -> LevelProgress {
        LevelProgress::from_xp(self.xp)
    }
}

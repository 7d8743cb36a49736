use std::sync::Arc;

use crate::core::error::{AppError, AppResult};
use crate::progress::level::level_for_xp;
use crate::progress::FanProfile;
use crate::roster;
use crate::storage::ProfileStore;

/// Outcome of [`FanTracker::award_xp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpAward {
    /// XP total after the award
    pub total: i64,
    pub previous_level: u32,
    pub new_level: u32,
}

impl XpAward {
    fn new(total: i64, amount: i64) -> Self {
        Self {
            total,
            previous_level: level_for_xp(total - amount),
            new_level: level_for_xp(total),
        }
    }

    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

/// Fan Progress Tracker
///
/// Owns the rules for starting, querying and advancing a fan's progression.
/// Holds no state of its own besides the injected store; every mutation is a
/// single atomic store operation, so the tracker is safe to share across
/// concurrent handlers.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use furiacore::{FanTracker, MemoryStore};
///
/// # async fn demo() -> furiacore::AppResult<()> {
/// let tracker = FanTracker::new(Arc::new(MemoryStore::new()));
/// tracker.start_or_resume(42, Some("FalleN")).await?;
/// tracker.award_xp(42, 50).await?;
/// let award = tracker.award_xp(42, 100).await?;
/// assert!(award.leveled_up());
/// assert_eq!(tracker.get_xp(42).await?, 150);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FanTracker {
    store: Arc<dyn ProfileStore>,
}

impl FanTracker {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Create the profile on first contact, or return it unchanged.
    ///
    /// A non-blank `chosen_player` (re)selects the favorite player; roster
    /// names are stored in their canonical spelling.
    pub async fn start_or_resume(&self, user_id: i64, chosen_player: Option<&str>) -> AppResult<FanProfile> {
        let selection = chosen_player.and_then(roster::normalize_selection);
        let result = match selection {
            Some(player) => {
                log::info!("User {} selected player {}", user_id, player);
                self.store.set_player(user_id, &player).await
            }
            None => self.store.ensure(user_id).await,
        };
        result.inspect_err(|e| log::error!("start_or_resume failed for user {}: {}", user_id, e))
    }

    /// Current XP; unknown fans get a default profile and 0.
    pub async fn get_xp(&self, user_id: i64) -> AppResult<i64> {
        Ok(self.profile(user_id).await?.xp)
    }

    /// Achievements in unlock order; unknown fans get a default profile and an empty list.
    pub async fn list_achievements(&self, user_id: i64) -> AppResult<Vec<String>> {
        Ok(self.profile(user_id).await?.achievements)
    }

    /// Profile if the fan ever interacted; never creates one.
    pub async fn lookup(&self, user_id: i64) -> AppResult<Option<FanProfile>> {
        self.store
            .find(user_id)
            .await
            .inspect_err(|e| log::error!("Failed to look up user {}: {}", user_id, e))
    }

    /// Full profile, created lazily.
    pub async fn profile(&self, user_id: i64) -> AppResult<FanProfile> {
        self.store
            .ensure(user_id)
            .await
            .inspect_err(|e| log::error!("Failed to load profile of user {}: {}", user_id, e))
    }

    /// Add `amount` XP; returns the new total and the level transition.
    ///
    /// # Errors
    /// `InvalidInput` when `amount <= 0` or the total would overflow; nothing
    /// is written in either case.
    pub async fn award_xp(&self, user_id: i64, amount: i64) -> AppResult<XpAward> {
        if amount <= 0 {
            return Err(AppError::invalid(format!(
                "XP amount must be positive, got {} for user {}",
                amount, user_id
            )));
        }

        let profile = self
            .store
            .increment_xp(user_id, amount)
            .await
            .inspect_err(|e| log::error!("award_xp({}) failed for user {}: {}", amount, user_id, e))?;

        let award = XpAward::new(profile.xp, amount);
        log::info!("User {} earned {} XP (total {})", user_id, amount, award.total);
        if award.leveled_up() {
            log::info!(
                "User {} reached level {} (was {})",
                user_id,
                award.new_level,
                award.previous_level
            );
        }
        Ok(award)
    }

    /// Unlock an achievement; `true` only the first time for a given fan.
    ///
    /// # Errors
    /// `InvalidInput` for a blank achievement id.
    pub async fn unlock_achievement(&self, user_id: i64, achievement_id: &str) -> AppResult<bool> {
        let achievement_id = achievement_id.trim();
        if achievement_id.is_empty() {
            return Err(AppError::invalid(format!("empty achievement id for user {}", user_id)));
        }

        let unlocked = self
            .store
            .add_achievement(user_id, achievement_id)
            .await
            .inspect_err(|e| log::error!("unlock '{}' failed for user {}: {}", achievement_id, user_id, e))?;

        if unlocked {
            log::info!("User {} unlocked achievement '{}'", user_id, achievement_id);
        } else {
            log::debug!("User {} already had achievement '{}'", user_id, achievement_id);
        }
        Ok(unlocked)
    }

    /// Count a bot interaction and refresh the stored username.
    pub async fn record_interaction(&self, user_id: i64, username: Option<&str>) -> AppResult<FanProfile> {
        self.store
            .touch(user_id, username)
            .await
            .inspect_err(|e| log::warn!("Failed to record interaction of user {}: {}", user_id, e))
    }
}

//! Fan profile persistence
//!
//! The tracker only needs a handful of per-user atomic primitives; each
//! backend maps them onto a single operation so that concurrent mutations of
//! the same fan never lose updates and no in-process locking is required.

mod memory;
mod mongo;

use async_trait::async_trait;

use crate::core::error::AppResult;
use crate::news::{NewsItem, NewsScope};
use crate::progress::FanProfile;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Persistence seam for [`FanProfile`] documents, keyed by Telegram user ID.
///
/// Every method that returns a profile creates the default record first when
/// none exists, so callers never see "not found" on a mutation path.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Get-by-key; `None` when the fan has never interacted.
    async fn find(&self, user_id: i64) -> AppResult<Option<FanProfile>>;

    /// Upsert-with-defaults: returns the existing profile or a freshly inserted one.
    async fn ensure(&self, user_id: i64) -> AppResult<FanProfile>;

    /// Overwrite the favorite player (creating the profile if needed).
    async fn set_player(&self, user_id: i64, player: &str) -> AppResult<FanProfile>;

    /// Atomically add `amount` to the XP counter and return the updated profile.
    ///
    /// Fails with `InvalidInput`, writing nothing, when the total would overflow `i64`.
    async fn increment_xp(&self, user_id: i64, amount: i64) -> AppResult<FanProfile>;

    /// Atomic add-to-set. `true` when the achievement was not present before.
    async fn add_achievement(&self, user_id: i64, achievement_id: &str) -> AppResult<bool>;

    /// Count one interaction, bump `last_active` and refresh the username when known.
    async fn touch(&self, user_id: i64, username: Option<&str>) -> AppResult<FanProfile>;
}

/// Read-only access to stored news posts.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// At most `limit` posts for `scope`, newest first.
    async fn latest_news(&self, scope: NewsScope, limit: usize) -> AppResult<Vec<NewsItem>>;
}

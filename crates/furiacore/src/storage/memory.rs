use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;

use super::{NewsStore, ProfileStore};
use crate::core::error::{AppError, AppResult};
use crate::news::{NewsItem, NewsScope};
use crate::progress::FanProfile;

/// In-process store used by tests and `run --in-memory`.
///
/// Each mutation runs under the DashMap shard lock of its key, which gives the
/// same per-user atomicity as the MongoDB update operators.
#[derive(Default)]
pub struct MemoryStore {
    fans: DashMap<i64, FanProfile>,
    news: DashMap<NewsScope, Vec<NewsItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.fans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fans.is_empty()
    }

    /// Store a news post, as the ingestion job would.
    pub fn publish(&self, scope: NewsScope, item: NewsItem) {
        self.news.entry(scope).or_default().push(item);
    }

    fn entry(&self, user_id: i64) -> RefMut<'_, i64, FanProfile> {
        self.fans
            .entry(user_id)
            .or_insert_with(|| FanProfile::new(user_id, Utc::now()))
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find(&self, user_id: i64) -> AppResult<Option<FanProfile>> {
        Ok(self.fans.get(&user_id).map(|p| p.value().clone()))
    }

    async fn ensure(&self, user_id: i64) -> AppResult<FanProfile> {
        Ok(self.entry(user_id).value().clone())
    }

    async fn set_player(&self, user_id: i64, player: &str) -> AppResult<FanProfile> {
        let mut profile = self.entry(user_id);
        profile.chosen_player = Some(player.to_string());
        profile.updated_at = Utc::now();
        Ok(profile.value().clone())
    }

    async fn increment_xp(&self, user_id: i64, amount: i64) -> AppResult<FanProfile> {
        let mut profile = self.entry(user_id);
        profile.xp = profile
            .xp
            .checked_add(amount)
            .ok_or_else(|| AppError::invalid(format!("XP total of user {} would overflow", user_id)))?;
        profile.updated_at = Utc::now();
        Ok(profile.value().clone())
    }

    async fn add_achievement(&self, user_id: i64, achievement_id: &str) -> AppResult<bool> {
        let mut profile = self.entry(user_id);
        if profile.has_achievement(achievement_id) {
            return Ok(false);
        }
        profile.achievements.push(achievement_id.to_string());
        profile.updated_at = Utc::now();
        Ok(true)
    }

    async fn touch(&self, user_id: i64, username: Option<&str>) -> AppResult<FanProfile> {
        let mut profile = self.entry(user_id);
        let now = Utc::now();
        profile.interactions += 1;
        profile.last_active = now;
        profile.updated_at = now;
        if let Some(username) = username {
            profile.username = Some(username.to_string());
        }
        Ok(profile.value().clone())
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn latest_news(&self, scope: NewsScope, limit: usize) -> AppResult<Vec<NewsItem>> {
        let mut items = self.news.get(&scope).map(|posts| posts.value().clone()).unwrap_or_default();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items.truncate(limit);
        Ok(items)
    }
}

//! Team and player news, read side
//!
//! Posts are collected from the team's and players' social accounts by a
//! separate ingestion job into `team_news` / `player_news`; the bot only
//! reads the latest entries.

use std::sync::Arc;

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::AppResult;
use crate::roster::Player;
use crate::storage::NewsStore;

/// Number of posts shown per request.
pub const NEWS_LIMIT: usize = 5;

/// One stored social-media post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// `twitter` or `instagram`
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub post_id: String,
    /// Lowercase roster key; absent on team posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Whose posts to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsScope {
    Team,
    Player(Player),
}

impl NewsScope {
    /// Blank selects the team, a roster name selects that player, anything else is `None`.
    pub fn from_selection(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let name = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
        if name.is_empty() {
            return Some(NewsScope::Team);
        }
        name.parse::<Player>().ok().map(NewsScope::Player)
    }
}

/// Read access to the news collections.
#[derive(Clone)]
pub struct NewsFeed {
    store: Arc<dyn NewsStore>,
}

impl NewsFeed {
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        Self { store }
    }

    /// Up to [`NEWS_LIMIT`] posts, newest first.
    pub async fn latest(&self, scope: NewsScope) -> AppResult<Vec<NewsItem>> {
        self.store
            .latest_news(scope, NEWS_LIMIT)
            .await
            .inspect_err(|e| log::error!("Failed to load {:?} news: {}", scope, e))
    }
}

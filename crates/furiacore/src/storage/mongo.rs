use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures_util::TryStreamExt;
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};

use super::{NewsStore, ProfileStore};
use crate::core::config::{FANS_COLLECTION, PLAYER_NEWS_COLLECTION, TEAM_NEWS_COLLECTION};
use crate::core::error::{AppError, AppResult};
use crate::news::{NewsItem, NewsScope};
use crate::progress::FanProfile;

/// MongoDB-backed profile store.
///
/// Every mutation is one server-side update. Unconditional ones upsert with
/// `$setOnInsert` defaults, so lazy creation and the mutation are one step.
/// Guarded ones (`$inc` with XP headroom, `$push` guarded by `$ne`) create the
/// profile first, then apply a single conditional update.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    fans: Collection<FanProfile>,
    team_news: Collection<NewsItem>,
    player_news: Collection<NewsItem>,
}

impl MongoStore {
    /// Connect, verify the server answers, and make sure the `user_id` unique index exists.
    ///
    /// # Arguments
    /// * `uri` - Mongo connection string (`MONGODB_URI`)
    /// * `database` - Database name (`MONGODB_DATABASE`)
    /// * `timeout` - Connect and server-selection timeout
    pub async fn connect(uri: &str, database: &str, timeout: Duration) -> AppResult<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("furia-bot".to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        let store = Self::with_client(client, database);

        store.ping().await?;
        store.ensure_indexes().await?;
        log::info!("Connected to MongoDB database '{}'", database);
        Ok(store)
    }

    /// Wrap an existing client without any network round trip.
    pub fn with_client(client: Client, database: &str) -> Self {
        let db = client.database(database);
        Self {
            fans: db.collection(FANS_COLLECTION),
            team_news: db.collection(TEAM_NEWS_COLLECTION),
            player_news: db.collection(PLAYER_NEWS_COLLECTION),
            client,
        }
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.client.database("admin").run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build();
        self.fans.create_index(index).await?;

        let team_feed = IndexModel::builder().keys(doc! { "timestamp": -1 }).build();
        self.team_news.create_index(team_feed).await?;
        let player_feed = IndexModel::builder()
            .keys(doc! { "player_id": 1, "timestamp": -1 })
            .build();
        self.player_news.create_index(player_feed).await?;
        Ok(())
    }

    /// Close pooled connections; call once on process exit.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }

    /// Run `update` as an upsert and return the document after modification.
    async fn upsert(&self, user_id: i64, update: Document) -> AppResult<FanProfile> {
        self.fans
            .find_one_and_update(doc! { "user_id": user_id }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::Unavailable(format!("upsert for user {} returned no document", user_id)))
    }
}

/// Default field values for a new profile, minus the fields the same update
/// already writes through another operator (MongoDB rejects overlapping paths).
fn insert_defaults(now: bson::DateTime, written: &[&str]) -> Document {
    let mut defaults = doc! {
        "username": Bson::Null,
        "chosen_player": Bson::Null,
        "xp": 0_i64,
        "achievements": [],
        "interactions": 0_i64,
        "created_at": now,
        "updated_at": now,
        "last_active": now,
    };
    for field in written {
        defaults.remove(*field);
    }
    defaults
}

#[async_trait]
impl ProfileStore for MongoStore {
    async fn find(&self, user_id: i64) -> AppResult<Option<FanProfile>> {
        Ok(self.fans.find_one(doc! { "user_id": user_id }).await?)
    }

    async fn ensure(&self, user_id: i64) -> AppResult<FanProfile> {
        let now = bson::DateTime::now();
        self.upsert(user_id, doc! { "$setOnInsert": insert_defaults(now, &[]) })
            .await
    }

    async fn set_player(&self, user_id: i64, player: &str) -> AppResult<FanProfile> {
        let now = bson::DateTime::now();
        let update = doc! {
            "$set": { "chosen_player": player, "updated_at": now },
            "$setOnInsert": insert_defaults(now, &["chosen_player", "updated_at"]),
        };
        self.upsert(user_id, update).await
    }

    async fn increment_xp(&self, user_id: i64, amount: i64) -> AppResult<FanProfile> {
        // A miss on the headroom filter means overflow, so it cannot upsert.
        self.ensure(user_id).await?;

        let ceiling = i64::MAX.saturating_sub(amount);
        self.fans
            .find_one_and_update(
                doc! { "user_id": user_id, "xp": { "$lte": ceiling } },
                doc! {
                    "$inc": { "xp": amount },
                    "$set": { "updated_at": bson::DateTime::now() },
                },
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::invalid(format!("XP total of user {} would overflow", user_id)))
    }

    async fn add_achievement(&self, user_id: i64, achievement_id: &str) -> AppResult<bool> {
        // The guarded push cannot upsert (a miss may mean "already unlocked"),
        // so the profile is created first.
        self.ensure(user_id).await?;

        let result = self
            .fans
            .update_one(
                doc! { "user_id": user_id, "achievements": { "$ne": achievement_id } },
                doc! {
                    "$push": { "achievements": achievement_id },
                    "$set": { "updated_at": bson::DateTime::now() },
                },
            )
            .await?;
        Ok(result.modified_count == 1)
    }

    async fn touch(&self, user_id: i64, username: Option<&str>) -> AppResult<FanProfile> {
        let now = bson::DateTime::now();
        let mut set = doc! { "last_active": now, "updated_at": now };
        let mut written = vec!["interactions", "last_active", "updated_at"];
        if let Some(username) = username {
            set.insert("username", username);
            written.push("username");
        }
        let update = doc! {
            "$inc": { "interactions": 1_i64 },
            "$set": set,
            "$setOnInsert": insert_defaults(now, &written),
        };
        self.upsert(user_id, update).await
    }
}

#[async_trait]
impl NewsStore for MongoStore {
    async fn latest_news(&self, scope: NewsScope, limit: usize) -> AppResult<Vec<NewsItem>> {
        let (collection, filter) = match scope {
            NewsScope::Team => (&self.team_news, doc! {}),
            NewsScope::Player(player) => (&self.player_news, doc! { "player_id": player.news_id() }),
        };
        let items = collection
            .find(filter)
            .sort(doc! { "timestamp": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?
            .try_collect()
            .await?;
        Ok(items)
    }
}

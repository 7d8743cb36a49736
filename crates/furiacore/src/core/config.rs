//! Runtime configuration
//!
//! Loaded once in `main` and passed down explicitly. Sources, lowest to highest
//! priority: built-in defaults, then environment variables (`.env` is loaded by
//! the binary before extraction).
//!
//! | Variable | Default |
//! |---|---|
//! | `BOT_TOKEN` / `TELOXIDE_TOKEN` | empty |
//! | `MONGODB_URI` | `mongodb://localhost:27017` |
//! | `MONGODB_DATABASE` / `DATABASE_NAME` | `furia_bot` |
//! | `MONGODB_TIMEOUT_SECS` | `10` |
//! | `LOG_FILE_PATH` | unset |
//! | `BOT_API_URL` | unset |

use std::time::Duration;

use figment::providers::{Env, Serialized};
use figment::Figment;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::core::error::AppResult;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "furia_bot";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Name of the collection holding one document per fan.
pub const FANS_COLLECTION: &str = "fans";

/// Team posts, newest first by `timestamp`. Filled by an external ingestion job.
pub const TEAM_NEWS_COLLECTION: &str = "team_news";

/// Player posts keyed by lowercase `player_id`. Filled by an external ingestion job.
pub const PLAYER_NEWS_COLLECTION: &str = "player_news";

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Telegram bot token
    #[serde(default = "empty_secret", deserialize_with = "secret_from_string")]
    pub bot_token: SecretString,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    /// Connect / server-selection timeout for the Mongo client
    pub mongodb_timeout_secs: u64,
    /// Optional log file, mirrored alongside console output
    pub log_file_path: Option<String>,
    /// Optional local Bot API server
    pub bot_api_url: Option<String>,
}

/// Serializable defaults. The token has none.
#[derive(Serialize)]
struct Defaults {
    mongodb_uri: &'static str,
    mongodb_database: &'static str,
    mongodb_timeout_secs: u64,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn secret_from_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl Config {
    /// Build the figment used by [`Config::from_env`].
    ///
    /// Legacy names are merged first so the canonical variables win when both are set.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Defaults {
                mongodb_uri: DEFAULT_MONGODB_URI,
                mongodb_database: DEFAULT_DATABASE,
                mongodb_timeout_secs: DEFAULT_TIMEOUT_SECS,
            }))
            .merge(Env::raw().only(&["TELOXIDE_TOKEN"]).map(|_| "bot_token".into()))
            .merge(Env::raw().only(&["DATABASE_NAME"]).map(|_| "mongodb_database".into()))
            .merge(Env::raw().only(&[
                "BOT_TOKEN",
                "MONGODB_URI",
                "MONGODB_DATABASE",
                "MONGODB_TIMEOUT_SECS",
                "LOG_FILE_PATH",
                "BOT_API_URL",
            ]))
    }

    /// Extract configuration from defaults + environment.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::figment().extract()?)
    }

    /// Mongo connect / server-selection timeout.
    pub fn mongodb_timeout(&self) -> Duration {
        Duration::from_secs(self.mongodb_timeout_secs)
    }

    pub fn has_bot_token(&self) -> bool {
        !self.bot_token.expose_secret().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_without_environment() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = Config::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.mongodb_uri, DEFAULT_MONGODB_URI);
            assert_eq!(config.mongodb_database, DEFAULT_DATABASE);
            assert_eq!(config.mongodb_timeout(), Duration::from_secs(10));
            assert!(config.log_file_path.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("BOT_TOKEN", "123:abc");
            jail.set_env("MONGODB_URI", "mongodb://mongo:27017");
            jail.set_env("MONGODB_DATABASE", "fans_test");
            jail.set_env("MONGODB_TIMEOUT_SECS", "3");

            let config = Config::from_env().map_err(|e| e.to_string())?;
            assert!(config.has_bot_token());
            assert_eq!(config.bot_token.expose_secret(), "123:abc");
            assert_eq!(config.mongodb_uri, "mongodb://mongo:27017");
            assert_eq!(config.mongodb_database, "fans_test");
            assert_eq!(config.mongodb_timeout_secs, 3);
            Ok(())
        });
    }

    #[test]
    fn test_legacy_names_are_accepted() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("TELOXIDE_TOKEN", "legacy-token");
            jail.set_env("DATABASE_NAME", "legacy_db");

            let config = Config::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.bot_token.expose_secret(), "legacy-token");
            assert_eq!(config.mongodb_database, "legacy_db");
            Ok(())
        });
    }

    #[test]
    fn test_canonical_names_win_over_legacy() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("DATABASE_NAME", "legacy_db");
            jail.set_env("MONGODB_DATABASE", "canonical_db");

            let config = Config::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.mongodb_database, "canonical_db");
            Ok(())
        });
    }

    #[test]
    fn test_missing_token_is_reported() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = Config::from_env().map_err(|e| e.to_string())?;
            assert!(!config.has_bot_token());
            Ok(())
        });
    }
}

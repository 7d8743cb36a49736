//! Handler types and dependencies

use furiacore::{AppError, AppResult, FanTracker, NewsFeed};
use teloxide::types::User;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub tracker: FanTracker,
    pub news: NewsFeed,
}

impl HandlerDeps {
    pub fn new(tracker: FanTracker, news: NewsFeed) -> Self {
        Self { tracker, news }
    }
}

/// The sender of an update, reduced to what progression needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fan {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
}

impl Fan {
    pub fn new(id: i64, username: Option<&str>, first_name: &str) -> Self {
        Self {
            id,
            username: username.map(str::to_string),
            first_name: first_name.to_string(),
        }
    }

    pub fn from_user(user: &User) -> AppResult<Self> {
        Ok(Self::new(fan_id(user.id.0)?, user.username.as_deref(), &user.first_name))
    }

    /// `@username` when set, first name otherwise.
    pub fn display_name(&self) -> String {
        match self.username.as_deref() {
            Some(username) => format!("@{}", username),
            None => self.first_name.clone(),
        }
    }
}

/// Telegram user ids fit in 52 bits, so this only fails on corrupt updates.
fn fan_id(raw: u64) -> AppResult<i64> {
    i64::try_from(raw).map_err(|_| AppError::invalid(format!("user id {} does not fit in i64", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_name_prefers_username() {
        assert_eq!(Fan::new(42, Some("ana_furia"), "Ana").display_name(), "@ana_furia");
        assert_eq!(Fan::new(42, None, "Ana").display_name(), "Ana");
    }

    #[test]
    fn test_fan_id_conversion() {
        assert_eq!(fan_id(123_456_789).unwrap(), 123_456_789);
        assert!(matches!(fan_id(u64::MAX), Err(AppError::InvalidInput(_))));
    }
}

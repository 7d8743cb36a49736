//! Fan progression behavior against the in-memory store

use std::sync::Arc;

use async_trait::async_trait;
use furiacore::{AppError, AppResult, FanProfile, FanTracker, MemoryStore, ProfileStore};
use pretty_assertions::assert_eq;

fn new_tracker() -> FanTracker {
    FanTracker::new(Arc::new(MemoryStore::new()))
}

#[tokio::test]
async fn test_get_xp_before_start_is_zero() {
    let tracker = new_tracker();
    for user_id in [1, 42, i64::MAX] {
        assert_eq!(tracker.get_xp(user_id).await.unwrap(), 0);
    }
}

#[tokio::test]
async fn test_list_achievements_before_start_is_empty() {
    let tracker = new_tracker();
    assert!(tracker.list_achievements(7).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_awards_accumulate() {
    let tracker = new_tracker();
    for (a, b) in [(1, 1), (10, 25), (999, 1)] {
        let user_id = a * 1000 + b;
        assert_eq!(tracker.award_xp(user_id, a).await.unwrap().total, a);
        assert_eq!(tracker.award_xp(user_id, b).await.unwrap().total, a + b);
        assert_eq!(tracker.get_xp(user_id).await.unwrap(), a + b);
    }
}

#[tokio::test]
async fn test_unlock_is_idempotent() {
    let tracker = new_tracker();
    assert!(tracker.unlock_achievement(1, "first_blood").await.unwrap());
    assert!(!tracker.unlock_achievement(1, "first_blood").await.unwrap());

    let achievements = tracker.list_achievements(1).await.unwrap();
    assert_eq!(achievements.iter().filter(|a| *a == "first_blood").count(), 1);
}

#[tokio::test]
async fn test_achievements_in_unlock_order() {
    let tracker = new_tracker();
    for id in ["veteran", "rookie", "first_blood"] {
        tracker.unlock_achievement(1, id).await.unwrap();
    }
    assert_eq!(
        tracker.list_achievements(1).await.unwrap(),
        vec!["veteran", "rookie", "first_blood"]
    );
}

#[tokio::test]
async fn test_reselection_overwrites_player() {
    let tracker = new_tracker();
    tracker.start_or_resume(1, Some("playerA")).await.unwrap();
    let profile = tracker.start_or_resume(1, Some("playerB")).await.unwrap();
    assert_eq!(profile.chosen_player.as_deref(), Some("playerB"));
}

#[tokio::test]
async fn test_resume_without_player_keeps_profile() {
    let tracker = new_tracker();
    let created = tracker.start_or_resume(1, Some("playerA")).await.unwrap();
    tracker.award_xp(1, 30).await.unwrap();

    let resumed = tracker.start_or_resume(1, None).await.unwrap();
    assert_eq!(resumed.chosen_player.as_deref(), Some("playerA"));
    assert_eq!(resumed.xp, 30);
    assert_eq!(resumed.created_at, created.created_at);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_awards_lose_no_updates() {
    let tracker = new_tracker();

    let tasks: Vec<_> = (0..100)
        .map(|_| {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.award_xp(77, 10).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(tracker.get_xp(77).await.unwrap(), 1000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_unlocks_of_same_achievement_succeed_once() {
    let tracker = new_tracker();

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.unlock_achievement(5, "clutch_master").await })
        })
        .collect();

    let mut newly_unlocked = 0;
    for task in tasks {
        if task.await.unwrap().unwrap() {
            newly_unlocked += 1;
        }
    }

    assert_eq!(newly_unlocked, 1);
    assert_eq!(tracker.list_achievements(5).await.unwrap(), vec!["clutch_master"]);
}

#[tokio::test]
async fn test_fan_journey() {
    let tracker = new_tracker();
    let user_id = 123_456;

    let profile = tracker.start_or_resume(user_id, Some("playerX")).await.unwrap();
    assert_eq!(profile.xp, 0);
    assert_eq!(profile.chosen_player.as_deref(), Some("playerX"));
    assert!(profile.achievements.is_empty());

    assert_eq!(tracker.get_xp(user_id).await.unwrap(), 0);

    tracker.award_xp(user_id, 50).await.unwrap();
    assert!(tracker.unlock_achievement(user_id, "rookie").await.unwrap());

    assert_eq!(tracker.get_xp(user_id).await.unwrap(), 50);
    assert_eq!(tracker.list_achievements(user_id).await.unwrap(), vec!["rookie"]);
}

/// Store whose backend is always unreachable.
struct DownStore;

#[async_trait]
impl ProfileStore for DownStore {
    async fn find(&self, _user_id: i64) -> AppResult<Option<FanProfile>> {
        Err(AppError::Unavailable("connection refused".into()))
    }
    async fn ensure(&self, _user_id: i64) -> AppResult<FanProfile> {
        Err(AppError::Unavailable("connection refused".into()))
    }
    async fn set_player(&self, _user_id: i64, _player: &str) -> AppResult<FanProfile> {
        Err(AppError::Unavailable("connection refused".into()))
    }
    async fn increment_xp(&self, _user_id: i64, _amount: i64) -> AppResult<FanProfile> {
        Err(AppError::Unavailable("connection refused".into()))
    }
    async fn add_achievement(&self, _user_id: i64, _achievement_id: &str) -> AppResult<bool> {
        Err(AppError::Unavailable("connection refused".into()))
    }
    async fn touch(&self, _user_id: i64, _username: Option<&str>) -> AppResult<FanProfile> {
        Err(AppError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn test_storage_errors_are_propagated() {
    let tracker = FanTracker::new(Arc::new(DownStore));

    assert!(tracker.get_xp(1).await.unwrap_err().is_connection());
    assert!(tracker.list_achievements(1).await.unwrap_err().is_connection());
    assert!(tracker.start_or_resume(1, Some("FalleN")).await.unwrap_err().is_connection());
    assert!(tracker.award_xp(1, 5).await.unwrap_err().is_connection());
    assert!(tracker.unlock_achievement(1, "rookie").await.unwrap_err().is_connection());
}

#[tokio::test]
async fn test_overflowing_award_is_rejected_and_total_kept() {
    let tracker = new_tracker();
    assert_eq!(tracker.award_xp(1, i64::MAX).await.unwrap().total, i64::MAX);

    let err = tracker.award_xp(1, 1).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert_eq!(tracker.get_xp(1).await.unwrap(), i64::MAX);

    tracker.award_xp(2, i64::MAX - 5).await.unwrap();
    assert!(tracker.award_xp(2, 10).await.is_err());
    assert_eq!(tracker.get_xp(2).await.unwrap(), i64::MAX - 5);
    assert_eq!(tracker.award_xp(2, 5).await.unwrap().total, i64::MAX);
}

#[tokio::test]
async fn test_invalid_amount_checked_before_storage() {
    let tracker = FanTracker::new(Arc::new(DownStore));
    let err = tracker.award_xp(1, 0).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

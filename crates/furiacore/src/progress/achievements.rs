//! Display catalog for achievement ids.
//!
//! Unlocking is driven from outside (CLI, future activity hooks); any non-empty
//! id is accepted and ids missing from the catalog are shown as-is.

/// Presentation data for a known achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementInfo {
    pub id: &'static str,
    pub emoji: &'static str,
    pub title: &'static str,
}

pub const CATALOG: &[AchievementInfo] = &[
    AchievementInfo {
        id: "first_blood",
        emoji: "🩸",
        title: "First Blood",
    },
    AchievementInfo {
        id: "rookie",
        emoji: "🐣",
        title: "Novato da Matilha",
    },
    AchievementInfo {
        id: "loyal_fan",
        emoji: "🐾",
        title: "Fã Fiel",
    },
    AchievementInfo {
        id: "clutch_master",
        emoji: "🎯",
        title: "Mestre do Clutch",
    },
    AchievementInfo {
        id: "veteran",
        emoji: "🐆",
        title: "Veterano FURIA",
    },
];

const FALLBACK_EMOJI: &str = "🏅";

pub fn find(achievement_id: &str) -> Option<&'static AchievementInfo> {
    CATALOG.iter().find(|info| info.id == achievement_id)
}

/// `"🐣 Novato da Matilha"` for known ids, `"🏅 some_id"` otherwise.
pub fn display_name(achievement_id: &str) -> String {
    match find(achievement_id) {
        Some(info) => format!("{} {}", info.emoji, info.title),
        None => format!("{} {}", FALLBACK_EMOJI, achievement_id),
    }
}

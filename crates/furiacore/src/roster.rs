//! FURIA CS2 line-up
//!
//! Used to canonicalize player selections (`/start kscerato` stores
//! `KSCERATO`) and to build the selection keyboard. Names outside the roster
//! are still accepted as free-form favorites.

use strum::{EnumIter, EnumString, IntoEnumIterator};

/// Maximum stored length of a free-form player selection, in characters.
pub const MAX_SELECTION_CHARS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, strum::Display)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    #[strum(to_string = "yuurih")]
    Yuurih,
    #[strum(to_string = "KSCERATO")]
    Kscerato,
    #[strum(to_string = "FalleN")]
    Fallen,
    #[strum(to_string = "molodoy")]
    Molodoy,
    #[strum(to_string = "YEKINDAR")]
    Yekindar,
}

impl Player {
    pub fn role(self) -> &'static str {
        match self {
            Player::Yuurih => "Rifler",
            Player::Kscerato => "Rifler",
            Player::Fallen => "IGL",
            Player::Molodoy => "AWPer",
            Player::Yekindar => "Entry fragger",
        }
    }

    /// Key of this player's posts in the news feed (`yuurih`, `kscerato`, ...).
    pub fn news_id(self) -> String {
        self.to_string().to_lowercase()
    }
}

/// All roster members in display order.
pub fn lineup() -> Vec<Player> {
    Player::iter().collect()
}

/// Normalize a player selection.
///
/// Returns `None` for blank input, the canonical name for roster members
/// (case-insensitive, optional leading `@`), and the trimmed input, capped at
/// [`MAX_SELECTION_CHARS`], for anyone else.
pub fn normalize_selection(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let name = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    if name.is_empty() {
        return None;
    }
    match name.parse::<Player>() {
        Ok(player) => Some(player.to_string()),
        Err(_) => Some(name.chars().take(MAX_SELECTION_CHARS).collect()),
    }
}

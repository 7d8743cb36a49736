//! Inline keyboards

use furiacore::roster;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Callback data prefix for the favorite-player picker: `player:<name>`.
pub const PLAYER_CALLBACK_PREFIX: &str = "player:";

/// One button per roster player, one per row.
pub fn player_keyboard() -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = roster::lineup()
        .into_iter()
        .map(|player| {
            vec![InlineKeyboardButton::callback(
                format!("🎮 {} ({})", player, player.role()),
                format!("{}{}", PLAYER_CALLBACK_PREFIX, player),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

/// Extracts the player name from picker callback data.
pub fn parse_player_callback(data: &str) -> Option<&str> {
    data.strip_prefix(PLAYER_CALLBACK_PREFIX)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_keyboard_has_one_row_per_player() {
        let keyboard = player_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), roster::lineup().len());
        assert!(keyboard.inline_keyboard.iter().all(|row| row.len() == 1));
    }

    #[test]
    fn test_keyboard_callback_data_round_trips() {
        let keyboard = player_keyboard();
        let first = &keyboard.inline_keyboard[0][0];
        match &first.kind {
            InlineKeyboardButtonKind::CallbackData(data) => {
                assert_eq!(parse_player_callback(data), Some("yuurih"));
            }
            other => panic!("unexpected button kind: {:?}", other),
        }
    }

    #[test]
    fn test_parse_player_callback() {
        assert_eq!(parse_player_callback("player:FalleN"), Some("FalleN"));
        assert_eq!(parse_player_callback("player:"), None);
        assert_eq!(parse_player_callback("player:   "), None);
        assert_eq!(parse_player_callback("dl:mp3"), None);
    }
}

//! Reply texts
//!
//! Pure string builders so handler output can be tested without a Bot API.
//! Plain text only (no parse mode), so user-provided names need no escaping.

use furiacore::progress::achievements;
use furiacore::roster;
use furiacore::{FanProfile, NewsItem, NewsScope};
use indoc::formatdoc;
use teloxide::utils::command::BotCommands;

use super::bot::Command;

/// Greeting for `/start`, with the current favorite player when one is set.
pub fn welcome(first_name: &str, profile: &FanProfile) -> String {
    let player_line = match profile.chosen_player.as_deref() {
        Some(player) => format!("⭐ Seu jogador favorito: {}", player),
        None => "👇 Escolha seu jogador favorito abaixo (ou envie /start <nome>).".to_string(),
    };

    formatdoc! {"
        👋 Olá {first_name}!

        Bem-vindo(a) à família FURIA CS! 🐆
        Interaja com o bot para ganhar XP e desbloquear conquistas.

        {player_line}

        /xp - ver seu XP
        /conquistas - ver suas conquistas
        /perfil - ver seu perfil
        /ajuda - todos os comandos"
    }
}

/// Confirmation after picking a player from the keyboard.
pub fn player_selected(player: &str) -> String {
    format!("✅ Jogador favorito definido: {}\n\nVamos pra cima! 🐆", player)
}

/// Reply for `/xp`.
pub fn xp(total: i64) -> String {
    format!("⭐ Seu XP: {}", total)
}

/// Reply for `/conquistas`, in unlock order.
pub fn achievements_list(unlocked: &[String]) -> String {
    if unlocked.is_empty() {
        return "🏆 Você ainda não desbloqueou nenhuma conquista. Continue interagindo!".to_string();
    }

    let lines: Vec<String> = unlocked
        .iter()
        .enumerate()
        .map(|(i, id)| format!("{}. {}", i + 1, achievements::display_name(id)))
        .collect();
    format!("🏆 Suas conquistas ({}):\n\n{}", unlocked.len(), lines.join("\n"))
}

/// Reply for `/perfil`.
pub fn profile(display_name: &str, profile: &FanProfile) -> String {
    let level = profile.level();
    let player = profile.chosen_player.as_deref().unwrap_or("nenhum (use /start)");

    formatdoc! {"
        👤 Perfil de {display_name}

        🎮 Jogador favorito: {player}
        📊 Nível: {level_number}
        ⭐ XP: {xp} / {next}
        [{bar}] {percent}%

        🏆 Conquistas: {achievement_count}
        💬 Interações: {interactions}
        📅 Membro desde: {since}",
        level_number = level.level,
        xp = profile.xp,
        next = level.next_level_at,
        bar = level.bar(),
        percent = level.percent(),
        achievement_count = profile.achievements.len(),
        interactions = profile.interactions,
        since = profile.created_at.format("%d/%m/%Y"),
    }
}

/// Reply for `/jogadores`.
pub fn lineup() -> String {
    let lines: Vec<String> = roster::lineup()
        .into_iter()
        .map(|player| format!("• {} ({})", player, player.role()))
        .collect();
    format!(
        "📊 Line-up CS2 da FURIA:\n\n{}\n\nUse /start <nome> para escolher seu favorito.",
        lines.join("\n")
    )
}

/// Longest post excerpt shown in `/noticias`, in characters.
pub const NEWS_EXCERPT_CHARS: usize = 280;

/// Reply for `/noticias`, newest first.
pub fn news(scope: NewsScope, items: &[NewsItem]) -> String {
    let (icon, subject) = match scope {
        NewsScope::Team => ("📰", "do time".to_string()),
        NewsScope::Player(player) => ("📸", format!("de {}", player)),
    };
    if items.is_empty() {
        return format!("{} Nenhuma notícia {} encontrada.", icon, subject);
    }

    let entries: Vec<String> = items
        .iter()
        .map(|item| {
            let excerpt = excerpt(&item.text, NEWS_EXCERPT_CHARS);
            match item.url.as_deref() {
                Some(url) => format!("• {}\n  🔗 {}", excerpt, url),
                None => format!("• {}", excerpt),
            }
        })
        .collect();
    format!("{} Últimas notícias {}:\n\n{}", icon, subject, entries.join("\n\n"))
}

/// `/noticias` with a name outside the line-up.
pub fn unknown_player(name: &str) -> String {
    format!("❓ Não encontrei o jogador \"{}\". Veja o line-up em /jogadores.", name)
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

/// Reply for `/ajuda`.
pub fn help() -> String {
    Command::descriptions().to_string()
}

/// Persistence unreachable.
pub fn unavailable() -> String {
    "⚠️ Não consegui acessar seus dados agora. Tente novamente mais tarde.".to_string()
}

/// Anything else that went wrong while handling a command.
pub fn generic_error() -> String {
    "❌ Algo deu errado. Tente novamente.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn fan(xp: i64, player: Option<&str>) -> FanProfile {
        let joined = Utc.with_ymd_and_hms(2025, 4, 30, 12, 0, 0).unwrap();
        let mut profile = FanProfile::new(1, joined);
        profile.xp = xp;
        profile.chosen_player = player.map(str::to_string);
        profile
    }

    #[test]
    fn test_xp_reply_contains_total() {
        assert_eq!(xp(0), "⭐ Seu XP: 0");
        assert!(xp(50).ends_with("50"));
    }

    #[test]
    fn test_welcome_without_player_prompts_selection() {
        let text = welcome("Ana", &fan(0, None));
        assert!(text.starts_with("👋 Olá Ana!"));
        assert!(text.contains("Escolha seu jogador favorito"));
    }

    #[test]
    fn test_welcome_with_player() {
        let text = welcome("Ana", &fan(0, Some("playerX")));
        assert!(text.contains("⭐ Seu jogador favorito: playerX"));
        assert!(!text.contains("Escolha seu jogador favorito"));
    }

    #[test]
    fn test_empty_achievements() {
        assert!(achievements_list(&[]).contains("ainda não desbloqueou"));
    }

    #[test]
    fn test_achievements_in_order() {
        let text = achievements_list(&["rookie".to_string(), "major_winner".to_string()]);
        assert_eq!(
            text,
            "🏆 Suas conquistas (2):\n\n1. 🐣 Novato da Matilha\n2. 🏅 major_winner"
        );
    }

    #[test]
    fn test_profile_shows_level_progress() {
        let mut profile = fan(50, Some("FalleN"));
        profile.achievements.push("rookie".to_string());
        profile.interactions = 3;

        let text = super::profile("@ana", &profile);
        assert!(text.starts_with("👤 Perfil de @ana"));
        assert!(text.contains("🎮 Jogador favorito: FalleN"));
        assert!(text.contains("📊 Nível: 1"));
        assert!(text.contains("⭐ XP: 50 / 100"));
        assert!(text.contains("] 50%"));
        assert!(text.contains("🏆 Conquistas: 1"));
        assert!(text.contains("💬 Interações: 3"));
        assert!(text.contains("📅 Membro desde: 30/04/2025"));
    }

    #[test]
    fn test_lineup_lists_every_player() {
        let text = lineup();
        for player in roster::lineup() {
            assert!(text.contains(&player.to_string()));
        }
    }

    fn post(text: &str, url: Option<&str>) -> NewsItem {
        NewsItem {
            source: "twitter".to_string(),
            post_id: "1".to_string(),
            player_id: None,
            timestamp: Utc.with_ymd_and_hms(2025, 5, 1, 18, 0, 0).unwrap(),
            text: text.to_string(),
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_news_empty_states() {
        assert_eq!(news(NewsScope::Team, &[]), "📰 Nenhuma notícia do time encontrada.");
        assert_eq!(
            news(NewsScope::Player(roster::Player::Fallen), &[]),
            "📸 Nenhuma notícia de FalleN encontrada."
        );
    }

    #[test]
    fn test_news_lists_posts_with_links() {
        let items = [
            post("Vitória na IEM!", Some("https://twitter.com/FURIA/status/2")),
            post("Bootcamp", None),
        ];
        assert_eq!(
            news(NewsScope::Team, &items),
            "📰 Últimas notícias do time:\n\n• Vitória na IEM!\n  🔗 https://twitter.com/FURIA/status/2\n\n• Bootcamp"
        );
    }

    #[test]
    fn test_long_posts_are_cut() {
        let long = "a".repeat(NEWS_EXCERPT_CHARS + 50);
        let text = news(NewsScope::Team, &[post(&long, None)]);
        assert!(text.ends_with('…'));
        assert!(!text.contains(&long));
    }

    #[test]
    fn test_help_mentions_core_commands() {
        let text = help();
        for command in ["/start", "/xp", "/conquistas", "/noticias"] {
            assert!(text.contains(command), "help is missing {}", command);
        }
    }
}

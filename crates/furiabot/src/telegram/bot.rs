//! Bot initialization and the command set
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use std::time::Duration;

use anyhow::Context;
use furiacore::Config;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// HTTP timeout for Bot API requests; must exceed the long-polling timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandos disponíveis:")]
pub enum Command {
    #[command(description = "começar e escolher seu jogador favorito (ex.: /start FalleN)")]
    Start(String),
    #[command(description = "ver seu XP")]
    Xp,
    #[command(description = "ver suas conquistas")]
    Conquistas,
    #[command(description = "ver seu perfil de fã")]
    Perfil,
    #[command(description = "ver o line-up da FURIA")]
    Jogadores,
    #[command(description = "últimas notícias do time ou de um jogador (ex.: /noticias FalleN)")]
    Noticias(String),
    #[command(description = "mostrar esta ajuda")]
    Ajuda,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, HTTP client setup)
pub fn create_bot(config: &Config) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;
    let bot = Bot::with_client(config.bot_token.expose_secret(), client);

    // Check if local Bot API server is configured
    match config.bot_api_url.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).with_context(|| format!("Invalid BOT_API_URL: {}", bot_api_url))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

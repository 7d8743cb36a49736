//! Command handler implementations

use furiacore::{AppError, AppResult, FanTracker, NewsScope};
use teloxide::prelude::*;
use teloxide::types::InlineKeyboardMarkup;

use super::types::{Fan, HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::keyboards::{parse_player_callback, player_keyboard};
use crate::telegram::replies;

/// Text to send back, optionally with an inline keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: String) -> Self {
        Self { text, keyboard: None }
    }

    pub fn with_keyboard(text: String, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text,
            keyboard: Some(keyboard),
        }
    }
}

/// Run one command for `fan` and render the reply.
///
/// Every command counts as an interaction before it runs.
pub async fn respond(deps: &HandlerDeps, fan: &Fan, cmd: Command) -> AppResult<Reply> {
    let tracker = &deps.tracker;
    let touched = tracker.record_interaction(fan.id, fan.username.as_deref()).await?;

    let reply = match cmd {
        Command::Start(player) => {
            let profile = tracker.start_or_resume(fan.id, Some(&player)).await?;
            let text = replies::welcome(&fan.first_name, &profile);
            if player.trim().is_empty() {
                Reply::with_keyboard(text, player_keyboard())
            } else {
                Reply::text(text)
            }
        }
        Command::Xp => Reply::text(replies::xp(tracker.get_xp(fan.id).await?)),
        Command::Conquistas => Reply::text(replies::achievements_list(&tracker.list_achievements(fan.id).await?)),
        Command::Perfil => Reply::text(replies::profile(&fan.display_name(), &touched)),
        Command::Jogadores => Reply::text(replies::lineup()),
        Command::Noticias(player) => match NewsScope::from_selection(&player) {
            Some(scope) => Reply::text(replies::news(scope, &deps.news.latest(scope).await?)),
            None => Reply::text(replies::unknown_player(player.trim())),
        },
        Command::Ajuda => Reply::text(replies::help()),
    };
    Ok(reply)
}

/// Handle a press on the favorite-player keyboard.
pub async fn select_player(tracker: &FanTracker, fan: &Fan, player: &str) -> AppResult<String> {
    tracker.record_interaction(fan.id, fan.username.as_deref()).await?;
    let profile = tracker.start_or_resume(fan.id, Some(player)).await?;
    let chosen = profile.chosen_player.as_deref().unwrap_or(player);
    Ok(replies::player_selected(chosen))
}

/// What the user sees when a command fails. Details stay in the logs.
pub fn reply_for_error(err: &AppError) -> Reply {
    if err.is_connection() {
        log::warn!("Storage unavailable while handling command: {}", err);
        Reply::text(replies::unavailable())
    } else {
        log::error!("Command failed: {}", err);
        Reply::text(replies::generic_error())
    }
}

/// Entry point for every parsed command.
pub(super) async fn handle_command(
    bot: &Bot,
    msg: &Message,
    cmd: Command,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let Some(user) = msg.from.as_ref() else {
        log::debug!("Ignoring {:?} without sender in chat {}", cmd, msg.chat.id);
        return Ok(());
    };
    log::info!("Received command {:?} from user {} in chat {}", cmd, user.id, msg.chat.id);

    let result = match Fan::from_user(user) {
        Ok(fan) => respond(deps, &fan, cmd).await,
        Err(e) => Err(e),
    };
    let reply = result.unwrap_or_else(|e| reply_for_error(&e));

    let mut request = bot.send_message(msg.chat.id, reply.text);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await?;
    Ok(())
}

/// Entry point for callback queries.
pub(super) async fn handle_callback(bot: &Bot, q: &CallbackQuery, deps: &HandlerDeps) -> Result<(), HandlerError> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(player) = q.data.as_deref().and_then(parse_player_callback) else {
        log::debug!("Ignoring callback {:?} from user {}", q.data, q.from.id);
        return Ok(());
    };

    let result = match Fan::from_user(&q.from) {
        Ok(fan) => select_player(&deps.tracker, &fan, player).await,
        Err(e) => Err(e),
    };
    let text = result.unwrap_or_else(|e| reply_for_error(&e).text);

    match q.regular_message() {
        Some(message) => {
            bot.edit_message_text(message.chat.id, message.id, text).await?;
        }
        None => {
            bot.send_message(q.from.id, text).await?;
        }
    }
    Ok(())
}

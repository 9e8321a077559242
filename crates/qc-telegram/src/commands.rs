//! Telegram bot commands

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use tracing::info;

use qc_core::{ChatApi, Outcome, QuickChat, parse_command};

use crate::bot::Command;
use crate::error::Result;

/// Bot state shared across commands
pub struct BotState<C> {
    pub quickchat: QuickChat<C>,
    pub admin_user_ids: Vec<i64>,
}

/// Id of the user who sent `msg`; `None` for anonymous senders
pub fn sender_id(msg: &Message) -> Option<i64> {
    msg.from.as_ref().map(|user| user.id.0 as i64)
}

/// An empty admin list allows every known sender
pub fn is_authorized(admin_user_ids: &[i64], sender_id: Option<i64>) -> bool {
    match sender_id {
        Some(id) => admin_user_ids.is_empty() || admin_user_ids.contains(&id),
        None => false,
    }
}

/// Handle /quickchat command
pub async fn handle_quickchat<C: ChatApi>(
    bot: Bot,
    msg: Message,
    state: Arc<BotState<C>>,
    args: String,
) -> Result<()> {
    let user_id = sender_id(&msg);
    let chat_id = msg.chat.id;
    let strings = state.quickchat.strings();

    info!("Processing /quickchat from user {:?} in chat {}: {:?}", user_id, chat_id, args);

    if !is_authorized(&state.admin_user_ids, user_id) {
        bot.send_message(chat_id, strings.unauthorized())
            .parse_mode(ParseMode::Html)
            .await?;
        return Ok(());
    }

    let parsed = match parse_command(&args) {
        Ok(parsed) => parsed,
        Err(_) => {
            let usage = Outcome::Usage.render(strings, state.quickchat.prefix());
            bot.send_message(chat_id, usage)
                .parse_mode(ParseMode::Html)
                .await?;
            return Ok(());
        }
    };

    let status = bot
        .send_message(chat_id, strings.creating(&parsed.title))
        .parse_mode(ParseMode::Html)
        .await?;

    let outcome = state.quickchat.create(&parsed).await;
    let reply = outcome.render(strings, state.quickchat.prefix());

    bot.edit_message_text(chat_id, status.id, reply)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

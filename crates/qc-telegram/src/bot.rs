//! Telegram bot implementation

use std::sync::Arc;

use teloxide::{
    dispatching::UpdateFilterExt, prelude::*, types::Me, utils::command::BotCommands,
};
use tracing::info;

use qc_core::{ChatApi, Config, QuickChat};

use crate::commands::{BotState, handle_help, handle_quickchat};
use crate::error::{Result, TelegramError};

/// Telegram bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "QuickChat commands")]
pub enum Command {
    #[command(description = "Create a supergroup: /quickchat Title | @user1 @user2")]
    Quickchat(String),
    #[command(description = "Show help message")]
    Help,
}

/// Parse a command message, accepting any whitespace after the command
///
/// teloxide only splits the command from its arguments at a space, so
/// `/quickchat\nTitle\n@user` is rewritten to `/quickchat Title\n@user`.
pub fn parse_bot_command(text: &str, bot_username: &str) -> Option<Command> {
    let normalized = match text.split_once(char::is_whitespace) {
        Some((head, rest)) if head.starts_with('/') => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                head.to_string()
            } else {
                format!("{} {}", head, rest)
            }
        }
        _ => text.to_string(),
    };

    Command::parse(&normalized, bot_username).ok()
}

/// Telegram bot wrapper
pub struct TelegramBot<C> {
    bot: Bot,
    state: Arc<BotState<C>>,
}

impl<C: ChatApi + 'static> TelegramBot<C> {
    /// Create a new Telegram bot
    pub fn new(token: &str, quickchat: QuickChat<C>, admin_user_ids: Vec<i64>) -> Self {
        let bot = Bot::new(token);
        let state = Arc::new(BotState {
            quickchat,
            admin_user_ids,
        });

        Self { bot, state }
    }

    /// Create a bot from configuration; fails when no token is set
    pub fn from_config(config: &Config, client: C) -> Result<Self> {
        let token = config
            .telegram
            .token
            .as_deref()
            .ok_or(TelegramError::TokenNotSet)?;

        Ok(Self::new(
            token,
            QuickChat::new(client, config),
            config.telegram.admin_user_ids.clone(),
        ))
    }

    /// Start the bot
    pub async fn start(self) -> Result<()> {
        info!("Starting Telegram bot...");

        let command_handler = Update::filter_message()
            .filter_map(|msg: Message, me: Me| parse_bot_command(msg.text()?, me.username()))
            .endpoint(
                |bot: Bot, msg: Message, cmd: Command, state: Arc<BotState<C>>| async move {
                    match cmd {
                        Command::Quickchat(args) => handle_quickchat(bot, msg, state, args).await,
                        Command::Help => handle_help(bot, msg).await,
                    }
                },
            );

        Dispatcher::builder(self.bot, command_handler)
            .dependencies(dptree::deps![self.state])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

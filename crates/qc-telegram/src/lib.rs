//! qc-telegram: Telegram front-end for QuickChat
//!
//! Exposes `/quickchat` and `/help` through a teloxide dispatcher and
//! replies with the outcome rendered by `qc-core`.

pub mod bot;
pub mod commands;
pub mod error;

pub use bot::TelegramBot;
pub use commands::{BotState, is_authorized};
pub use error::{Result, TelegramError};

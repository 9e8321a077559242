//! qc-core: QuickChat core library
//!
//! Parses `/quickchat` command text into a chat title and an invite list,
//! and drives the create-then-invite workflow against a pluggable chat client.

pub mod client;
pub mod config;
pub mod error;
pub mod parser;
pub mod quickchat;
pub mod strings;

pub use client::{ChatApi, CreatedChat, DryRunChat, DryRunClient, ResolvedUser};
pub use config::{ChatConfig, Config, TelegramConfig};
pub use error::{Error, Result};
pub use parser::{ParseNotice, ParsedCommand, normalize_invitees, parse_command};
pub use quickchat::{Outcome, QuickChat, QuickChatReport};
pub use strings::{Language, Strings, escape_html};

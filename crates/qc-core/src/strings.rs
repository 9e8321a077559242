//! Localized reply texts
//!
//! Replies are Telegram HTML. Every value interpolated from user input goes
//! through [`escape_html`] before it is placed into a template.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Reply language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "ru" | "russian" => Ok(Self::Ru),
            other => Err(Error::Config(format!("Unsupported language: {}", other))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Ru => write!(f, "ru"),
        }
    }
}

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Message catalog for one language
#[derive(Debug, Clone, Copy, Default)]
pub struct Strings {
    language: Language,
}

impl Strings {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn no_title(&self) -> &'static str {
        match self.language {
            Language::En => "🚫 <b>Specify a chat title.</b>",
            Language::Ru => "🚫 <b>Укажи название чата.</b>",
        }
    }

    pub fn unauthorized(&self) -> &'static str {
        match self.language {
            Language::En => "⚠️ <b>You are not allowed to use this command.</b>",
            Language::Ru => "⚠️ <b>У тебя нет доступа к этой команде.</b>",
        }
    }

    /// Usage hint; `prefix` is the command prefix (e.g. `/`)
    pub fn usage(&self, prefix: &str) -> String {
        let prefix = escape_html(prefix);
        match self.language {
            Language::En => format!(
                "ℹ️ <b>Usage:</b> <code>{prefix}quickchat Project name | @user1 @user2</code>\n\
                 Also supports a newline separator or quoted title followed by usernames."
            ),
            Language::Ru => format!(
                "ℹ️ <b>Использование:</b> <code>{prefix}quickchat Название | @user1 @user2</code>\n\
                 Также можно разделить название и участников переводом строки или указать \
                 название в кавычках, а затем перечислить пользователей."
            ),
        }
    }

    pub fn creating(&self, title: &str) -> String {
        let title = escape_html(title);
        match self.language {
            Language::En => format!("🛠 <b>Creating chat <code>{title}</code>…</b>"),
            Language::Ru => format!("🛠 <b>Создаю чат <code>{title}</code>…</b>"),
        }
    }

    /// Success line, linking the chat when a public link is known
    pub fn created(&self, title: &str, link: Option<&str>) -> String {
        let title = escape_html(title);
        match (self.language, link) {
            (Language::En, Some(link)) => format!(
                "✅ <b>Chat <a href=\"{}\">{title}</a> is ready.</b>",
                escape_html(link)
            ),
            (Language::En, None) => format!("✅ <b>Chat <code>{title}</code> is ready.</b>"),
            (Language::Ru, Some(link)) => format!(
                "✅ <b>Чат <a href=\"{}\">{title}</a> готов.</b>",
                escape_html(link)
            ),
            (Language::Ru, None) => format!("✅ <b>Чат <code>{title}</code> готов.</b>"),
        }
    }

    pub fn added(&self, users: &[String]) -> String {
        let users = join_escaped(users);
        match self.language {
            Language::En => format!("👥 <b>Invited:</b> {users}"),
            Language::Ru => format!("👥 <b>Приглашены:</b> {users}"),
        }
    }

    pub fn not_found(&self, users: &[String]) -> String {
        let users = join_escaped(users);
        match self.language {
            Language::En => format!("⚠️ <b>Could not resolve:</b> {users}"),
            Language::Ru => format!("⚠️ <b>Не удалось найти:</b> {users}"),
        }
    }

    pub fn invite_failed(&self, error: &str) -> String {
        let error = escape_html(error);
        match self.language {
            Language::En => format!("💢 <b>Telegram refused to invite members:</b> {error}"),
            Language::Ru => format!("💢 <b>Телеграм отказал в приглашении:</b> {error}"),
        }
    }

    pub fn failed(&self, error: &str) -> String {
        let error = escape_html(error);
        match self.language {
            Language::En => format!("💥 <b>Could not create chat:</b> {error}"),
            Language::Ru => format!("💥 <b>Не удалось создать чат:</b> {error}"),
        }
    }

    /// Default description of the created chat
    pub fn about(&self) -> &'static str {
        match self.language {
            Language::En => "Quick chat created via the QuickChat command.",
            Language::Ru => "Быстрый чат, созданный командой QuickChat.",
        }
    }

    /// First message posted into the created chat
    pub fn welcome(&self) -> &'static str {
        match self.language {
            Language::En => "👋 Chat created with QuickChat. Configure it as you like!",
            Language::Ru => "👋 Чат создан через QuickChat. Настрой всё под себя!",
        }
    }
}

fn join_escaped(items: &[String]) -> String {
    items
        .iter()
        .map(|item| escape_html(item))
        .collect::<Vec<_>>()
        .join(", ")
}

//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. `quickchat.toml`
//! 3. Default values
//!
//! `${VAR_NAME}` inside the TOML file is replaced with the environment value.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::strings::{Language, Strings};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "quickchat.toml";

/// Telegram bot settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token (required only in bot mode)
    pub token: Option<String>,

    /// Users allowed to run commands; empty means everyone
    #[serde(default)]
    pub admin_user_ids: Vec<i64>,
}

/// Chat creation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub language: Language,

    /// Post a welcome message into every new chat
    #[serde(default = "default_send_welcome")]
    pub send_welcome: bool,

    /// Command prefix shown in the usage text
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Chat description; the catalog text is used when unset
    pub about: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            send_welcome: default_send_welcome(),
            prefix: default_prefix(),
            about: None,
        }
    }
}

fn default_send_welcome() -> bool {
    true
}

fn default_prefix() -> String {
    "/".to_string()
}

/// Main configuration for QuickChat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub chat: ChatConfig,
}

impl Config {
    /// Replace `${VAR_NAME}` with the environment value (empty when unset)
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse TOML text after `${VAR}` expansion, without env overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);
        let mut config: Self = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        // `token = "${TELEGRAM_BOT_TOKEN}"` expands to "" when the variable is unset
        config.telegram.token = config.telegram.token.filter(|t| !t.is_empty());
        Ok(config)
    }

    /// Load `quickchat.toml` from the working directory, or env only
    pub fn load() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Self::from_env()
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("TELEGRAM_BOT_TOKEN").filter(|t| !t.is_empty()) {
            self.telegram.token = Some(token);
        }

        if let Some(ids) = lookup("ADMIN_USER_IDS") {
            self.telegram.admin_user_ids = parse_user_ids(&ids)?;
        }

        if let Some(language) = lookup("QUICKCHAT_LANGUAGE").filter(|l| !l.is_empty()) {
            self.chat.language = language.parse()?;
        }

        if let Some(enabled) = lookup("QUICKCHAT_SEND_WELCOME") {
            self.chat.send_welcome = enabled.to_lowercase() != "false";
        }

        if let Some(prefix) = lookup("QUICKCHAT_PREFIX").filter(|p| !p.is_empty()) {
            self.chat.prefix = prefix;
        }

        if let Some(about) = lookup("QUICKCHAT_ABOUT").filter(|a| !a.is_empty()) {
            self.chat.about = Some(about);
        }

        Ok(())
    }

    pub fn strings(&self) -> Strings {
        Strings::new(self.chat.language)
    }

    /// Description for new chats: configured text or the catalog default
    pub fn about(&self) -> String {
        self.chat
            .about
            .clone()
            .unwrap_or_else(|| self.strings().about().to_string())
    }
}

fn parse_user_ids(value: &str) -> Result<Vec<i64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| Error::Config(format!("Invalid user id in ADMIN_USER_IDS: {}", s)))
        })
        .collect()
}

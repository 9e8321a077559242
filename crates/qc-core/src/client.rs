//! Chat client abstraction
//!
//! QuickChat never talks to Telegram directly. The host runtime hands it a
//! [`ChatApi`] implementation backed by its own authenticated session.
//! [`DryRunClient`] is an in-memory implementation used by the CLI and tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Public Telegram username: 5-32 chars, starts with a letter
static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]{4,31}$").expect("username pattern is valid")
});

/// First id handed out by [`DryRunClient`], shaped like a supergroup id
const DRY_RUN_FIRST_CHAT_ID: i64 = -1_001_000_000_001;

/// A freshly created supergroup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedChat {
    pub id: i64,
    pub title: String,
    /// Public link, if the chat has one
    pub link: Option<String>,
}

/// A user looked up by username or numeric id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUser {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

/// Operations QuickChat needs from a Telegram client
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Create a supergroup (megagroup) owned by the current account
    async fn create_supergroup(&self, title: &str, about: &str) -> Result<CreatedChat>;

    /// Resolve a username (without `@`) or numeric user id
    async fn resolve_user(&self, username: &str) -> Result<ResolvedUser>;

    /// Invite all `user_ids` into the chat in a single request
    async fn invite_users(&self, chat_id: i64, user_ids: &[i64]) -> Result<()>;

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
}

/// A chat recorded by [`DryRunClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunChat {
    pub chat: CreatedChat,
    pub about: String,
    pub members: Vec<i64>,
    pub messages: Vec<String>,
}

#[derive(Debug)]
struct DryRunState {
    next_chat_id: i64,
    next_user_id: i64,
    chats: Vec<DryRunChat>,
    users: HashMap<String, ResolvedUser>,
}

impl Default for DryRunState {
    fn default() -> Self {
        Self {
            next_chat_id: DRY_RUN_FIRST_CHAT_ID,
            next_user_id: 1,
            chats: Vec::new(),
            users: HashMap::new(),
        }
    }
}

/// In-memory [`ChatApi`] that records every call instead of sending it
#[derive(Debug, Clone, Default)]
pub struct DryRunClient {
    state: Arc<RwLock<DryRunState>>,
    unknown_users: HashSet<String>,
    create_error: Option<String>,
    invite_error: Option<String>,
    message_error: Option<String>,
}

impl DryRunClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `username` fail to resolve even if it is well-formed
    pub fn with_unknown_user(mut self, username: &str) -> Self {
        self.unknown_users.insert(username.to_lowercase());
        self
    }

    /// Make chat creation fail with `error`
    pub fn failing_create(mut self, error: &str) -> Self {
        self.create_error = Some(error.to_string());
        self
    }

    /// Make invites fail with `error`
    pub fn failing_invites(mut self, error: &str) -> Self {
        self.invite_error = Some(error.to_string());
        self
    }

    /// Make message sending fail with `error`
    pub fn failing_messages(mut self, error: &str) -> Self {
        self.message_error = Some(error.to_string());
        self
    }

    /// Snapshot of all chats created so far
    pub async fn chats(&self) -> Vec<DryRunChat> {
        self.state.read().await.chats.clone()
    }
}

#[async_trait]
impl ChatApi for DryRunClient {
    async fn create_supergroup(&self, title: &str, about: &str) -> Result<CreatedChat> {
        if let Some(error) = &self.create_error {
            return Err(Error::Api(error.clone()));
        }

        let mut state = self.state.write().await;
        let chat = CreatedChat {
            id: state.next_chat_id,
            title: title.to_string(),
            link: None,
        };
        state.next_chat_id -= 1;
        state.chats.push(DryRunChat {
            chat: chat.clone(),
            about: about.to_string(),
            members: Vec::new(),
            messages: Vec::new(),
        });

        info!("[dry-run] created supergroup {} ({})", chat.title, chat.id);
        Ok(chat)
    }

    async fn resolve_user(&self, username: &str) -> Result<ResolvedUser> {
        let key = username.to_lowercase();
        if self.unknown_users.contains(&key) {
            return Err(Error::UserNotFound(username.to_string()));
        }

        let mut state = self.state.write().await;
        if let Some(user) = state.users.get(&key) {
            return Ok(user.clone());
        }

        let id = if let Ok(id) = username.parse::<i64>() {
            id
        } else if USERNAME_PATTERN.is_match(username) {
            let id = state.next_user_id;
            state.next_user_id += 1;
            id
        } else {
            return Err(Error::UserNotFound(username.to_string()));
        };

        let user = ResolvedUser {
            id,
            username: username.to_string(),
            display_name: username.to_string(),
        };
        state.users.insert(key, user.clone());

        debug!("[dry-run] resolved {} -> {}", username, id);
        Ok(user)
    }

    async fn invite_users(&self, chat_id: i64, user_ids: &[i64]) -> Result<()> {
        if let Some(error) = &self.invite_error {
            return Err(Error::Api(error.clone()));
        }

        let mut state = self.state.write().await;
        let chat = state
            .chats
            .iter_mut()
            .find(|c| c.chat.id == chat_id)
            .ok_or_else(|| Error::Api(format!("CHANNEL_INVALID: {}", chat_id)))?;

        for id in user_ids {
            if !chat.members.contains(id) {
                chat.members.push(*id);
            }
        }

        info!("[dry-run] invited {} users into {}", user_ids.len(), chat_id);
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        if let Some(error) = &self.message_error {
            return Err(Error::Api(error.clone()));
        }

        let mut state = self.state.write().await;
        let chat = state
            .chats
            .iter_mut()
            .find(|c| c.chat.id == chat_id)
            .ok_or_else(|| Error::Api(format!("PEER_ID_INVALID: {}", chat_id)))?;
        chat.messages.push(text.to_string());

        debug!("[dry-run] message to {}: {}", chat_id, text);
        Ok(())
    }
}

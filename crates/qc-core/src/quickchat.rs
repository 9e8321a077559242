//! The `quickchat` command
//!
//! Creates a supergroup from parsed command text, resolves and invites the
//! requested users, and posts a welcome message. Remote calls run strictly
//! one after another.

use tracing::{debug, info, warn};

use crate::client::{ChatApi, CreatedChat};
use crate::config::Config;
use crate::parser::{ParsedCommand, parse_command};
use crate::strings::Strings;

/// What happened after chat creation succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickChatReport {
    pub chat: CreatedChat,
    /// Display names of users that were invited
    pub invited: Vec<String>,
    /// Identifiers that could not be resolved to users
    pub unresolved: Vec<String>,
    /// Error text when the invite request itself was refused
    pub invite_error: Option<String>,
}

/// Result of one command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No title given; show usage
    Usage,
    /// The chat could not be created
    Failed { title: String, error: String },
    Created(QuickChatReport),
}

impl Outcome {
    /// Render the reply shown to the user (Telegram HTML)
    pub fn render(&self, strings: &Strings, prefix: &str) -> String {
        match self {
            Self::Usage => format!("{}\n{}", strings.no_title(), strings.usage(prefix)),
            Self::Failed { error, .. } => strings.failed(error),
            Self::Created(report) => {
                let mut lines = vec![strings.created(&report.chat.title, report.chat.link.as_deref())];

                if !report.invited.is_empty() {
                    lines.push(strings.added(&report.invited));
                }
                if !report.unresolved.is_empty() {
                    lines.push(strings.not_found(&report.unresolved));
                }
                if let Some(error) = &report.invite_error {
                    lines.push(strings.invite_failed(error));
                }

                lines.join("\n")
            }
        }
    }
}

/// Command service bound to one chat client
pub struct QuickChat<C> {
    client: C,
    strings: Strings,
    about: String,
    prefix: String,
    send_welcome: bool,
}

impl<C: ChatApi> QuickChat<C> {
    pub fn new(client: C, config: &Config) -> Self {
        Self {
            client,
            strings: config.strings(),
            about: config.about(),
            prefix: config.chat.prefix.clone(),
            send_welcome: config.chat.send_welcome,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn strings(&self) -> &Strings {
        &self.strings
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse `raw` and run the command
    pub async fn execute(&self, raw: &str) -> Outcome {
        match parse_command(raw) {
            Ok(parsed) => self.create(&parsed).await,
            Err(e) => {
                debug!("Rejected command {:?}: {}", raw, e);
                Outcome::Usage
            }
        }
    }

    /// Create the chat described by an already parsed command
    pub async fn create(&self, command: &ParsedCommand) -> Outcome {
        if let Some(notice) = command.notice() {
            debug!("{}", notice);
        }

        let chat = match self.client.create_supergroup(&command.title, &self.about).await {
            Ok(chat) => chat,
            Err(e) => {
                warn!("Failed to create chat {:?}: {}", command.title, e);
                return Outcome::Failed {
                    title: command.title.clone(),
                    error: e.to_string(),
                };
            }
        };

        info!("Created chat {:?} ({})", chat.title, chat.id);

        let report = self.invite(chat, &command.invitees).await;

        if self.send_welcome {
            if let Err(e) = self.client.send_message(report.chat.id, self.strings.welcome()).await {
                warn!("Failed to send welcome message to {}: {}", report.chat.id, e);
            }
        }

        Outcome::Created(report)
    }

    async fn invite(&self, chat: CreatedChat, invitees: &[String]) -> QuickChatReport {
        let mut report = QuickChatReport {
            chat,
            invited: Vec::new(),
            unresolved: Vec::new(),
            invite_error: None,
        };

        let mut user_ids = Vec::new();
        let mut names = Vec::new();

        for username in invitees {
            match self.client.resolve_user(username).await {
                Ok(user) => {
                    user_ids.push(user.id);
                    names.push(user.display_name);
                }
                Err(e) => {
                    debug!("Could not resolve {}: {}", username, e);
                    report.unresolved.push(username.clone());
                }
            }
        }

        if user_ids.is_empty() {
            return report;
        }

        match self.client.invite_users(report.chat.id, &user_ids).await {
            Ok(()) => {
                info!("Invited {} users into {}", user_ids.len(), report.chat.id);
                report.invited = names;
            }
            Err(e) => {
                warn!("Invite into {} failed: {}", report.chat.id, e);
                report.invite_error = Some(e.to_string());
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DryRunClient;
    use crate::strings::Language;

    fn service(client: DryRunClient) -> QuickChat<DryRunClient> {
        QuickChat::new(client, &Config::default())
    }

    #[tokio::test]
    async fn test_usage_on_empty_title() {
        let client = DryRunClient::new();
        let quickchat = service(client.clone());

        assert_eq!(quickchat.execute("  ").await, Outcome::Usage);
        assert_eq!(quickchat.execute("| @alice_w").await, Outcome::Usage);
        assert!(client.chats().await.is_empty());
    }

    #[tokio::test]
    async fn test_title_only_creates_chat_with_welcome() {
        let client = DryRunClient::new();
        let quickchat = service(client.clone());

        let Outcome::Created(report) = quickchat.execute("Project hub").await else {
            panic!("expected Created");
        };
        assert_eq!(report.chat.title, "Project hub");
        assert!(report.invited.is_empty());
        assert!(report.unresolved.is_empty());

        let chats = client.chats().await;
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].about, Strings::new(Language::En).about());
        assert_eq!(chats[0].messages, vec![Strings::new(Language::En).welcome()]);
    }

    #[tokio::test]
    async fn test_invites_resolved_users() {
        let client = DryRunClient::new();
        let quickchat = service(client.clone());

        let Outcome::Created(report) = quickchat.execute("Project hub | @user1 @user2 @user1").await
        else {
            panic!("expected Created");
        };
        assert_eq!(report.invited, vec!["user1", "user2"]);
        assert!(report.invite_error.is_none());

        let chats = client.chats().await;
        assert_eq!(chats[0].members.len(), 2);
    }

    #[tokio::test]
    async fn test_unresolved_users_do_not_block_others() {
        let client = DryRunClient::new().with_unknown_user("ghost_user");
        let quickchat = service(client.clone());

        let Outcome::Created(report) = quickchat.execute("Hub | ghost_user, alice_w, x").await else {
            panic!("expected Created");
        };
        assert_eq!(report.invited, vec!["alice_w"]);
        assert_eq!(report.unresolved, vec!["ghost_user", "x"]);
        assert_eq!(client.chats().await[0].members.len(), 1);
    }

    #[tokio::test]
    async fn test_no_invite_call_when_nobody_resolves() {
        let client = DryRunClient::new().failing_invites("should not be called");
        let quickchat = service(client);

        let Outcome::Created(report) = quickchat.execute("Hub | x y").await else {
            panic!("expected Created");
        };
        assert!(report.invite_error.is_none());
        assert_eq!(report.unresolved, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_invite_failure_is_reported() {
        let client = DryRunClient::new().failing_invites("USER_PRIVACY_RESTRICTED");
        let quickchat = service(client);

        let Outcome::Created(report) = quickchat.execute("Hub | alice_w").await else {
            panic!("expected Created");
        };
        assert!(report.invited.is_empty());
        assert_eq!(
            report.invite_error.as_deref(),
            Some("Telegram API error: USER_PRIVACY_RESTRICTED")
        );
    }

    #[tokio::test]
    async fn test_create_failure() {
        let client = DryRunClient::new().failing_create("CHANNELS_TOO_MUCH");
        let quickchat = service(client);

        let outcome = quickchat.execute("Hub | alice_w").await;
        assert_eq!(
            outcome,
            Outcome::Failed {
                title: "Hub".to_string(),
                error: "Telegram API error: CHANNELS_TOO_MUCH".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_welcome_failure_is_ignored() {
        let client = DryRunClient::new().failing_messages("CHAT_WRITE_FORBIDDEN");
        let quickchat = service(client);

        assert!(matches!(quickchat.execute("Hub").await, Outcome::Created(_)));
    }

    #[tokio::test]
    async fn test_welcome_can_be_disabled() {
        let client = DryRunClient::new();
        let mut config = Config::default();
        config.chat.send_welcome = false;
        let quickchat = QuickChat::new(client.clone(), &config);

        quickchat.execute("Hub").await;
        assert!(client.chats().await[0].messages.is_empty());
    }

    #[test]
    fn test_render_created_report() {
        let strings = Strings::new(Language::En);
        let outcome = Outcome::Created(QuickChatReport {
            chat: CreatedChat {
                id: -100,
                title: "Hub".to_string(),
                link: None,
            },
            invited: vec!["Alice".to_string()],
            unresolved: vec!["ghost".to_string()],
            invite_error: None,
        });

        assert_eq!(
            outcome.render(&strings, "/"),
            "✅ <b>Chat <code>Hub</code> is ready.</b>\n\
             👥 <b>Invited:</b> Alice\n\
             ⚠️ <b>Could not resolve:</b> ghost"
        );
    }

    #[test]
    fn test_render_usage_and_failure() {
        let strings = Strings::new(Language::En);
        assert_eq!(
            Outcome::Usage.render(&strings, "."),
            format!("{}\n{}", strings.no_title(), strings.usage("."))
        );

        let failed = Outcome::Failed {
            title: "Hub".to_string(),
            error: "FLOOD_WAIT <30>".to_string(),
        };
        assert_eq!(
            failed.render(&strings, "/"),
            "💥 <b>Could not create chat:</b> FLOOD_WAIT &lt;30&gt;"
        );
    }
}

//! Command line argument handling

/// Run mode
#[derive(Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Print the parsed title and invitees as JSON
    Parse(String),
    /// Execute the command against the dry-run client
    Run(String),
    /// Start the Telegram bot
    Bot,
    Help,
    Version,
}

impl RunMode {
    /// `parse` is pure and must work even with a broken configuration
    pub fn needs_config(&self) -> bool {
        matches!(self, Self::Run(_) | Self::Bot)
    }
}

/// Parse command line arguments (without the program name)
///
/// Everything after `parse` / `run` is joined with spaces into the command text.
pub fn parse_args<I>(args: I) -> RunMode
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();

    match args.next().as_deref() {
        Some("parse") => RunMode::Parse(args.collect::<Vec<_>>().join(" ")),
        Some("run") => RunMode::Run(args.collect::<Vec<_>>().join(" ")),
        Some("bot") => RunMode::Bot,
        Some("--version" | "-v") => RunMode::Version,
        _ => RunMode::Help,
    }
}

/// Print help message
pub fn print_help() {
    println!("quickchat - create Telegram supergroups and invite users in one command");
    println!();
    println!("Usage:");
    println!("  quickchat parse <text>   Show how <text> is split into title and invitees");
    println!("  quickchat run <text>     Execute <text> against the dry-run client");
    println!("  quickchat bot            Start the Telegram bot");
    println!("  quickchat --help         Show this help message");
    println!("  quickchat --version      Show version");
    println!();
    println!("Command text:");
    println!("  Project hub | @user1 @user2");
    println!("  \"Project hub\" @user1 @user2");
    println!();
    println!("Environment Variables:");
    println!("  TELEGRAM_BOT_TOKEN       Bot token (bot mode)");
    println!("  ADMIN_USER_IDS           Comma-separated user ids allowed to use the bot");
    println!("  QUICKCHAT_LANGUAGE       Reply language: en or ru (default: en)");
    println!("  QUICKCHAT_SEND_WELCOME   Post a welcome message (default: true)");
    println!("  QUICKCHAT_PREFIX         Command prefix shown in usage (default: /)");
    println!("  QUICKCHAT_ABOUT          Description of created chats");
}

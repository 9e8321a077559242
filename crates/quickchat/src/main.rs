//! quickchat: QuickChat main binary
//!
//! Usage:
//!   quickchat parse <text>   - Show the parsed title and invitees
//!   quickchat run <text>     - Execute against the dry-run client
//!   quickchat bot            - Start the Telegram bot
//!   quickchat --help         - Show help

mod cli;

use qc_core::{Config, DryRunClient, QuickChat, parse_command};
use qc_telegram::TelegramBot;
use tracing_subscriber::EnvFilter;

use cli::RunMode;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = cli::parse_args(std::env::args().skip(1));

    match mode {
        RunMode::Help => {
            cli::print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("quickchat {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Logs go to stderr so `parse` output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let config = mode
        .needs_config()
        .then(load_config)
        .transpose()?
        .unwrap_or_default();

    match mode {
        RunMode::Parse(text) => run_parse(&text),
        RunMode::Run(text) => run_dry(&config, &text).await,
        RunMode::Bot => run_bot(&config).await,
        _ => Ok(()),
    }
}

fn load_config() -> anyhow::Result<Config> {
    Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

fn run_parse(text: &str) -> anyhow::Result<()> {
    let parsed = parse_command(text)?;

    if let Some(notice) = parsed.notice() {
        tracing::info!("{}", notice);
    }

    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

async fn run_dry(config: &Config, text: &str) -> anyhow::Result<()> {
    let quickchat = QuickChat::new(DryRunClient::new(), config);

    let outcome = quickchat.execute(text).await;
    println!("{}", outcome.render(quickchat.strings(), quickchat.prefix()));
    Ok(())
}

async fn run_bot(config: &Config) -> anyhow::Result<()> {
    tracing::warn!("No MTProto backend configured, chats are simulated by the dry-run client");

    let bot = TelegramBot::from_config(config, DryRunClient::new())?;
    bot.start().await?;
    Ok(())
}

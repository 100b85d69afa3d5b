//! Chat Vault - Export Claude and ChatGPT conversation history to JSON files.
//!
//! This tool reads browser session credentials from a Firefox profile's
//! cookie database, fetches conversations straight from the provider APIs,
//! and writes them to disk as pretty-printed JSON.
//!
//! 💾 QUICK START:
//!   chat-vault export-claude <url>    # Export one Claude chat
//!   chat-vault export-chatgpt <url>   # Export one ChatGPT thread
//!   chat-vault export-all             # Export every Claude conversation
//!   chat-vault list                   # See what is available
//!   chat-vault listen                 # Accept popup-style JSON commands

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{credentials, dispatch_line, format_summary_table, ExportPipeline};
use cli::{Cli, Commands};
use domain::AppConfig;
use infrastructure::{
    ChatGptClient, ClaudeApi, ClaudeClient, ConsoleNotifier, DownloadsSink, FirefoxCookieStore,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Main application logic.
///
/// The returned flag becomes the process exit status; export flows report
/// their own failures through the notifier rather than this result.
async fn run(cli: Cli) -> domain::Result<bool> {
    match cli.command {
        Commands::ExportClaude { url } => {
            let services = Services::build(cli.out)?;
            Ok(services.pipeline().export_current_chat(&url).await)
        }
        Commands::ExportChatgpt { url } => {
            let services = Services::build(cli.out)?;
            Ok(services.pipeline().export_current_chat_gpt(&url).await)
        }
        Commands::ExportAll => {
            let services = Services::build(cli.out)?;
            Ok(services.pipeline().export_conversations().await)
        }
        Commands::List { limit } => {
            let services = Services::build(cli.out)?;
            cmd_list(&services, limit).await?;
            Ok(true)
        }
        Commands::Listen => {
            let services = Services::build(cli.out)?;
            cmd_listen(&services).await?;
            Ok(true)
        }
        Commands::Paths => {
            let services = Services::build(cli.out)?;
            cmd_paths(&services);
            Ok(true)
        }
        Commands::Config => {
            cmd_config()?;
            Ok(true)
        }
    }
}

/// Live service wiring shared by every command.
struct Services {
    config: AppConfig,
    cookies: FirefoxCookieStore,
    claude: ClaudeClient,
    chatgpt: ChatGptClient,
    sink: DownloadsSink,
    notifier: ConsoleNotifier,
}

impl Services {
    /// Load configuration and construct the live adapters.
    fn build(out: Option<PathBuf>) -> domain::Result<Self> {
        let config = infrastructure::load_config()?;
        let export_dir = out.unwrap_or_else(|| config.export_dir());

        Ok(Self {
            cookies: FirefoxCookieStore::new(config.browser.cookie_db.clone()),
            claude: ClaudeClient::new(config.providers.claude_base_url.as_str())?,
            chatgpt: ChatGptClient::new(config.providers.chatgpt_base_url.as_str())?,
            sink: DownloadsSink::new(export_dir),
            notifier: ConsoleNotifier,
            config,
        })
    }

    /// Assemble the export pipeline over the live adapters.
    fn pipeline(&self) -> ExportPipeline<'_> {
        ExportPipeline {
            cookies: &self.cookies,
            claude: &self.claude,
            chatgpt: &self.chatgpt,
            sink: &self.sink,
            notifier: &self.notifier,
            batch: self.config.batch.policy(),
        }
    }
}

/// List conversations command.
async fn cmd_list(services: &Services, limit: usize) -> domain::Result<()> {
    let organization_id = credentials::organization_id(&services.cookies)?;
    let cookie_header = credentials::cookie_header(&services.cookies, credentials::CLAUDE_DOMAIN)?;

    let mut summaries = services
        .claude
        .list_conversations(&cookie_header, &organization_id)
        .await?;
    let total = summaries.len();
    if limit > 0 {
        summaries.truncate(limit);
    }

    println!("{}", format_summary_table(&summaries));
    println!();
    println!(
        "Showing {} of {} conversation(s)",
        summaries.len().to_string().cyan(),
        total.to_string().cyan()
    );

    Ok(())
}

/// Listen for popup-style JSON commands on stdin until EOF.
async fn cmd_listen(services: &Services) -> domain::Result<()> {
    let pipeline = services.pipeline();

    println!(
        "{}",
        "👂 Listening for commands on stdin (one JSON object per line, Ctrl-D to stop)".bold()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| domain::AppError::io("Failed to read stdin", e))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        dispatch_line(&pipeline, line).await;
    }

    Ok(())
}

/// Show the paths in use command.
fn cmd_paths(services: &Services) {
    println!("{}", "📂 Chat Vault Paths".bold());
    println!();

    println!(
        "  [{}] {}",
        "config ".green(),
        AppConfig::config_file_path().display()
    );

    match services.cookies.database_path() {
        Ok(path) => println!("  [{}] {}", "cookies".blue(), path.display()),
        Err(e) => println!("  [{}] {}", "cookies".red(), e),
    }

    println!("  [{}] {}", "exports".cyan(), services.sink.dir().display());
}

/// Show (and create if missing) the configuration file.
fn cmd_config() -> domain::Result<()> {
    infrastructure::ensure_config_exists()?;
    let path = AppConfig::config_file_path();
    let content = std::fs::read_to_string(&path)
        .map_err(|e| domain::AppError::io(format!("Failed to read {}", path.display()), e))?;

    println!("{} {}", "📄 Config file:".bold(), path.display());
    println!();
    print!("{content}");

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chat Vault - Export Claude and ChatGPT conversation history to JSON files.
///
/// 💾 Quick use: chat-vault export-claude <url> | export-all | listen
#[derive(Parser, Debug)]
#[command(name = "chat-vault")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory to write exports into (overrides the configured export dir).
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one Claude conversation by its chat URL.
    ExportClaude {
        /// Claude chat URL, e.g. https://claude.ai/chat/<id>.
        url: String,
    },

    /// Export one ChatGPT conversation by its thread URL.
    ExportChatgpt {
        /// ChatGPT thread URL, e.g. https://chatgpt.com/c/<id>.
        url: String,
    },

    /// Export every Claude conversation into one archive file.
    ExportAll,

    /// List Claude conversations (summary table).
    List {
        /// Maximum number of conversations to show (0 = all).
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Read JSON commands from stdin and run exports until EOF.
    Listen,

    /// Show the cookie database, config, and export paths being used.
    Paths,

    /// Create the default configuration file if missing and show it.
    Config,
}

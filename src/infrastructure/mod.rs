//! Infrastructure layer - external adapters (browser database, network, filesystem).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod browser_paths;
pub mod chatgpt;
pub mod claude;
pub mod config;
pub mod cookie_store;
pub mod http;
pub mod notifier;
pub mod sink;
pub mod token_cache;

pub use browser_paths::find_cookie_database;
pub use chatgpt::{ChatGptApi, ChatGptClient};
pub use claude::{ClaudeApi, ClaudeClient};
pub use config::{ensure_config_exists, load_config, save_config};
pub use cookie_store::{CookieStore, FirefoxCookieStore};
pub use notifier::{ConsoleNotifier, Notifier};
pub use sink::{ArtifactSink, DownloadsSink};

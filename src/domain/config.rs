//! Application configuration for chat-vault.
//!
//! Covers the export destination, bulk-fetch fan-out, browser cookie source,
//! and provider endpoints. Everything has a default so an empty config file
//! is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a bulk export fans out its per-conversation detail requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    /// Upper bound on in-flight requests; `None` launches all at once.
    pub max_concurrency: Option<usize>,
    /// Keep conversations that fetched successfully when others fail.
    pub allow_partial: bool,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            max_concurrency: None,
            allow_partial: false,
        }
    }
}

/// Export output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Directory exported files are written to.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Bulk export fan-out configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum concurrent detail requests; 0 means unbounded.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Keep conversations that fetched successfully when others fail.
    #[serde(default = "default_allow_partial")]
    pub allow_partial: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            allow_partial: default_allow_partial(),
        }
    }
}

const fn default_max_concurrency() -> usize {
    0 // unbounded
}

const fn default_allow_partial() -> bool {
    false
}

impl BatchConfig {
    /// Convert to the policy handed to the fetch fan-out.
    #[must_use]
    pub const fn policy(&self) -> BatchPolicy {
        BatchPolicy {
            max_concurrency: match self.max_concurrency {
                0 => None,
                n => Some(n),
            },
            allow_partial: self.allow_partial,
        }
    }
}

/// Browser cookie source configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BrowserConfig {
    /// Explicit path to a Firefox `cookies.sqlite`; autodetected when unset.
    #[serde(default)]
    pub cookie_db: Option<PathBuf>,
}

/// Provider endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the Claude web API.
    #[serde(default = "default_claude_base_url")]
    pub claude_base_url: String,

    /// Base URL for the ChatGPT web API.
    #[serde(default = "default_chatgpt_base_url")]
    pub chatgpt_base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            claude_base_url: default_claude_base_url(),
            chatgpt_base_url: default_chatgpt_base_url(),
        }
    }
}

fn default_claude_base_url() -> String {
    "https://claude.ai".to_string()
}

fn default_chatgpt_base_url() -> String {
    "https://chatgpt.com".to_string()
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Export output configuration.
    #[serde(default)]
    pub export: ExportConfig,

    /// Bulk export fan-out configuration.
    #[serde(default)]
    pub batch: BatchConfig,

    /// Browser cookie source configuration.
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Provider endpoint configuration.
    #[serde(default)]
    pub providers: ProviderConfig,
}

impl AppConfig {
    /// Get the export directory, using the download folder if not configured.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .dir
            .clone()
            .unwrap_or_else(Self::default_export_dir)
    }

    /// Get the default export directory path.
    #[must_use]
    pub fn default_export_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the data directory path.
    #[must_use]
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chat-vault")
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }
}

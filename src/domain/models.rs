//! Domain models for exported conversation data.
//!
//! The provider APIs return free-form JSON; these models type only the fields
//! the export pipeline actually reads and carry the rest through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry from a provider's conversation listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Unique identifier for this conversation.
    pub uuid: String,
    /// Display title; may be empty for unnamed chats.
    #[serde(default)]
    pub name: String,
    /// Last-modified timestamp as reported by the provider.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Remaining listing fields, preserved verbatim for the archive file.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ConversationSummary {
    /// Get a short identifier prefix for display.
    #[must_use]
    pub fn short_id(&self) -> &str {
        &self.uuid[..8.min(self.uuid.len())]
    }
}

/// Full conversation payload, kept as raw JSON.
///
/// The pipeline never interprets the message tree; it only needs a display
/// title for filenames and notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationDetail(pub Value);

impl ConversationDetail {
    /// Get the display title, if the payload carries a non-empty one.
    ///
    /// Claude payloads use `name`, ChatGPT payloads use `title`.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.0
                    .get("title")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
    }
}

/// A fully assembled export: a filename plus the serialized JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Sanitized filename, including the `.json` extension.
    pub filename: String,
    /// Pretty-printed JSON document.
    pub content: String,
}

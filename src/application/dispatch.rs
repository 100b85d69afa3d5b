//! Inbound command dispatch.
//!
//! Listen mode accepts newline-delimited JSON commands, one per line.
//! Malformed lines and unknown actions are logged and dropped; flow
//! outcomes reach the user through the notifier only, never through a
//! return value.

use serde::Deserialize;

use crate::application::flows::ExportPipeline;

/// Action exporting every Claude conversation into one archive.
pub const ACTION_EXPORT_CONVERSATIONS: &str = "exportConversations";

/// Action exporting the Claude conversation at the given URL.
pub const ACTION_EXPORT_CURRENT_CHAT: &str = "exportCurrentChat";

/// Action exporting the ChatGPT thread at the given URL.
pub const ACTION_EXPORT_CURRENT_CHAT_GPT: &str = "exportCurrentChatGPT";

/// One inbound command.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionMessage {
    pub action: String,
    /// Page URL, required by the current-chat actions.
    #[serde(default)]
    pub url: Option<String>,
}

/// Parse one command line and route it.
pub async fn dispatch_line(pipeline: &ExportPipeline<'_>, line: &str) {
    let message: ActionMessage = match serde_json::from_str(line) {
        Ok(message) => message,
        Err(err) => {
            tracing::debug!("Ignoring malformed command: {}", err);
            return;
        }
    };
    dispatch(pipeline, &message).await;
}

/// Route a command to its export flow.
///
/// A missing URL falls through to the flow's own wrong-page check, which
/// reports it as an error notification.
pub async fn dispatch(pipeline: &ExportPipeline<'_>, message: &ActionMessage) {
    tracing::debug!("Received message: {}", message.action);
    let url = message.url.as_deref().unwrap_or_default();
    match message.action.as_str() {
        ACTION_EXPORT_CONVERSATIONS => {
            pipeline.export_conversations().await;
        }
        ACTION_EXPORT_CURRENT_CHAT => {
            pipeline.export_current_chat(url).await;
        }
        ACTION_EXPORT_CURRENT_CHAT_GPT => {
            pipeline.export_current_chat_gpt(url).await;
        }
        other => {
            tracing::debug!("Ignoring unknown action: {}", other);
        }
    }
}

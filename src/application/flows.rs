//! Export flows: one complete operation from trigger to final notification.
//!
//! Each flow runs its pre-flight checks before touching the network, then
//! fetches, assembles, and saves. Every run ends in exactly one notification;
//! errors never escape to the caller. The returned flag only tells the CLI
//! whether to exit non-zero.

use chrono::Local;

use crate::application::{assembler, batch, credentials, locator};
use crate::domain::{AppError, BatchPolicy, Result};
use crate::infrastructure::chatgpt::ChatGptApi;
use crate::infrastructure::claude::ClaudeApi;
use crate::infrastructure::cookie_store::CookieStore;
use crate::infrastructure::notifier::Notifier;
use crate::infrastructure::sink::ArtifactSink;

/// Notification title for Claude exports.
const CLAUDE_TITLE: &str = "Claude backup";

/// Notification title for ChatGPT exports.
const CHATGPT_TITLE: &str = "ChatGPT backup";

/// Everything an export flow needs, injected at the seams so tests can
/// substitute fakes for the browser jar, the provider APIs, and the disk.
pub struct ExportPipeline<'a> {
    pub cookies: &'a dyn CookieStore,
    pub claude: &'a dyn ClaudeApi,
    pub chatgpt: &'a dyn ChatGptApi,
    pub sink: &'a dyn ArtifactSink,
    pub notifier: &'a dyn Notifier,
    pub batch: BatchPolicy,
}

impl ExportPipeline<'_> {
    /// Export the Claude conversation open at `url` to a single JSON file.
    pub async fn export_current_chat(&self, url: &str) -> bool {
        let outcome = self.claude_chat(url).await;
        self.report(CLAUDE_TITLE, "Failed to export current chat", outcome)
    }

    /// Export every Claude conversation into one combined archive file.
    pub async fn export_conversations(&self) -> bool {
        let outcome = self.claude_archive().await;
        self.report(CLAUDE_TITLE, "Failed to export conversations", outcome)
    }

    /// Export the ChatGPT thread open at `url` to a single JSON file.
    pub async fn export_current_chat_gpt(&self, url: &str) -> bool {
        let outcome = self.chatgpt_chat(url).await;
        self.report(CHATGPT_TITLE, "Failed to export ChatGPT chat", outcome)
    }

    /// Turn a flow outcome into exactly one notification.
    ///
    /// Pre-flight failures (wrong page, not logged in) already carry a
    /// user-facing message and surface as-is; everything else is wrapped in
    /// the flow's failure prefix.
    fn report(&self, title: &str, failure_prefix: &str, outcome: Result<String>) -> bool {
        match outcome {
            Ok(message) => {
                self.notifier.notify(title, &message, false);
                true
            }
            Err(err) => {
                tracing::error!("{}: {}", failure_prefix, err);
                let message = match &err {
                    AppError::WrongPage { message } | AppError::NotAuthenticated { message } => {
                        message.clone()
                    }
                    other => format!("{failure_prefix}: {other}"),
                };
                self.notifier.notify(title, &message, true);
                false
            }
        }
    }

    async fn claude_chat(&self, url: &str) -> Result<String> {
        if !locator::is_claude_chat_url(url) {
            return Err(AppError::wrong_page(
                "Please open a Claude.ai chat before using this feature.",
            ));
        }
        let conversation_id = locator::claude_conversation_id(url).ok_or_else(|| {
            AppError::wrong_page("Could not identify the conversation ID from the current page.")
        })?;

        let organization_id = credentials::organization_id(self.cookies)?;
        let cookie_header = credentials::cookie_header(self.cookies, credentials::CLAUDE_DOMAIN)?;

        tracing::debug!("Fetching Claude conversation with ID: {}", conversation_id);
        let detail = self
            .claude
            .fetch_detail(&cookie_header, &organization_id, conversation_id)
            .await?;

        let title = detail.display_name().unwrap_or("untitled").to_string();
        let stamp = assembler::export_stamp(&Local::now());
        let artifact = assembler::assemble_claude_chat(&detail, &stamp)?;
        self.sink.save(&artifact)?;

        Ok(format!("Successfully exported \"{title}\"!"))
    }

    async fn claude_archive(&self) -> Result<String> {
        let organization_id = credentials::organization_id(self.cookies)?;
        let cookie_header = credentials::cookie_header(self.cookies, credentials::CLAUDE_DOMAIN)?;

        let summaries = self
            .claude
            .list_conversations(&cookie_header, &organization_id)
            .await?;
        tracing::debug!("Fetching details for {} conversations", summaries.len());

        let ids: Vec<String> = summaries.into_iter().map(|s| s.uuid).collect();
        let header = cookie_header.as_str();
        let org = organization_id.as_str();
        let details = batch::run_batch(ids, self.batch, |id| async move {
            self.claude.fetch_detail(header, org, &id).await
        })
        .await?;

        let stamp = assembler::export_stamp(&Local::now());
        let artifact = assembler::assemble_claude_archive(&details, &stamp)?;
        self.sink.save(&artifact)?;

        Ok(format!(
            "Successfully exported {} conversations!",
            details.len()
        ))
    }

    async fn chatgpt_chat(&self, url: &str) -> Result<String> {
        if !locator::is_chatgpt_thread_url(url) {
            return Err(AppError::wrong_page(
                "Please open a ChatGPT conversation before using this feature.",
            ));
        }
        let thread_id = locator::chatgpt_thread_id(url).ok_or_else(|| {
            AppError::wrong_page("Could not identify the conversation ID from the current page.")
        })?;

        let cookie_header = credentials::cookie_header(self.cookies, credentials::CHATGPT_DOMAIN)?;

        tracing::debug!("Fetching ChatGPT conversation with ID: {}", thread_id);
        let detail = self.chatgpt.fetch_conversation(&cookie_header, thread_id).await?;

        let artifact = assembler::assemble_chatgpt_chat(&detail, thread_id)?;
        self.sink.save(&artifact)?;

        Ok("Successfully exported ChatGPT conversation!".to_string())
    }
}

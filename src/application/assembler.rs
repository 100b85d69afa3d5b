//! Export assembly: filenames, timestamps, and serialized documents.
//!
//! Each provider keeps its historical filename convention. Claude exports
//! are prefixed with a local timestamp; ChatGPT exports carry the thread ID
//! as a suffix.

use chrono::{DateTime, Offset, TimeZone};

use crate::domain::{AppError, ConversationDetail, ExportArtifact, Result};

/// Title used when a conversation has no display name.
const UNTITLED: &str = "untitled";

/// Maximum title length kept in ChatGPT filenames.
///
/// Claude filenames keep the full title. TODO: decide whether Claude exports
/// should share this cap; long titles produce unwieldy filenames.
const CHATGPT_TITLE_LIMIT: usize = 50;

/// Sanitize a Claude conversation title for use in a filename.
///
/// Every character outside `A-Z a-z 0-9` becomes `_`; the result is
/// lowercased and kept at full length.
#[must_use]
pub fn sanitize_claude_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Sanitize a ChatGPT conversation title for use in a filename.
///
/// Every character outside `A-Z a-z 0-9 -` becomes `_`; case is preserved
/// and the result is cut at [`CHATGPT_TITLE_LIMIT`] characters.
#[must_use]
pub fn sanitize_chatgpt_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(CHATGPT_TITLE_LIMIT)
        .collect()
}

/// Format an export timestamp as `YYYY-MM-DDTHHMM±H` in local time.
///
/// The offset is the signed whole-hour UTC offset without zero padding.
/// Fractional-hour zones lose their minutes.
#[must_use]
pub fn export_stamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let offset_hours = now.offset().fix().local_minus_utc() / 3600;
    let sign = if offset_hours >= 0 { '+' } else { '-' };
    format!(
        "{}{}{}",
        now.format("%Y-%m-%dT%H%M"),
        sign,
        offset_hours.abs()
    )
}

/// Assemble a single Claude conversation export.
///
/// # Errors
/// Returns error if serialization fails.
pub fn assemble_claude_chat(
    detail: &ConversationDetail,
    stamp: &str,
) -> Result<ExportArtifact> {
    let title = detail.display_name().unwrap_or(UNTITLED);
    let content = serde_json::to_string_pretty(detail).map_err(AppError::json_parse)?;
    Ok(ExportArtifact {
        filename: format!(
            "{stamp}_claude_chat_{}.json",
            sanitize_claude_title(title)
        ),
        content,
    })
}

/// Assemble the combined Claude archive holding every conversation.
///
/// # Errors
/// Returns error if serialization fails.
pub fn assemble_claude_archive(
    details: &[ConversationDetail],
    stamp: &str,
) -> Result<ExportArtifact> {
    let content = serde_json::to_string_pretty(details).map_err(AppError::json_parse)?;
    Ok(ExportArtifact {
        filename: format!("{stamp}_claude_all_conversations.json"),
        content,
    })
}

/// Assemble a single ChatGPT conversation export.
///
/// # Errors
/// Returns error if serialization fails.
pub fn assemble_chatgpt_chat(
    detail: &ConversationDetail,
    thread_id: &str,
) -> Result<ExportArtifact> {
    let title = detail.display_name().unwrap_or(UNTITLED);
    let content = serde_json::to_string_pretty(detail).map_err(AppError::json_parse)?;
    Ok(ExportArtifact {
        filename: format!(
            "{} -- ChatGPT log -- {thread_id}.json",
            sanitize_chatgpt_title(title)
        ),
        content,
    })
}

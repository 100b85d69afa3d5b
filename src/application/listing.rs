//! Table output for the conversation listing.

use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::ConversationSummary;

/// Formats a table listing of conversation summaries.
#[must_use]
pub fn format_summary_table(summaries: &[ConversationSummary]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Updated", "Title"]);

    for summary in summaries {
        let updated = summary
            .updated_at
            .as_deref()
            .map_or_else(|| "-".to_string(), short_timestamp);

        let title = if summary.name.is_empty() {
            "(untitled)".to_string()
        } else {
            truncate(&summary.name, 35)
        };

        table.add_row(vec![summary.short_id(), &updated, &title]);
    }

    table.to_string()
}

/// Cuts an ISO timestamp down to date plus minutes.
fn short_timestamp(ts: &str) -> String {
    ts.chars().take(16).collect()
}

/// Truncates a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::summary;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world!", 8), "hello...");
        assert_eq!(truncate("first line\nsecond", 35), "first line");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("héllo wörld, ça va très bien", 8), "héllo...");
    }

    #[test]
    fn test_short_timestamp() {
        assert_eq!(short_timestamp("2024-05-01T12:00:00.123Z"), "2024-05-01T12:00");
        assert_eq!(short_timestamp("2024-05-01"), "2024-05-01");
    }

    #[test]
    fn test_table_shows_rows() {
        let mut named = summary("0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9", "Weekly sync");
        named.updated_at = Some("2024-05-01T12:00:00Z".to_string());
        let unnamed = summary("ffff0000-1111-2222-3333-444455556666", "");

        let rendered = format_summary_table(&[named, unnamed]);
        assert!(rendered.contains("0a1b2c3d"));
        assert!(rendered.contains("Weekly sync"));
        assert!(rendered.contains("2024-05-01T12:00"));
        assert!(rendered.contains("(untitled)"));
    }
}

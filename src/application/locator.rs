//! Conversation URL identification.
//!
//! Pulls conversation identifiers out of page URLs for both supported
//! providers. ChatGPT threads come in two shapes: plain `/c/{id}` and
//! project conversations nested under `/g/{project}/c/{id}`.

use std::sync::LazyLock;

use regex::Regex;

static CLAUDE_CHAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/chat/([a-zA-Z0-9-]+)").expect("valid pattern"));
static CHATGPT_THREAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"chatgpt\.com/c/([\w-]+)").expect("valid pattern"));
static CHATGPT_PROJECT_THREAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"chatgpt\.com/g/[^/]+/c/([a-zA-Z0-9-]+)").expect("valid pattern")
});

/// Check whether a URL points at a Claude chat page.
#[must_use]
pub fn is_claude_chat_url(url: &str) -> bool {
    url.contains("claude.ai/chat")
}

/// Check whether a URL points at a ChatGPT conversation page.
#[must_use]
pub fn is_chatgpt_thread_url(url: &str) -> bool {
    url.contains("chatgpt.com/c/") || CHATGPT_PROJECT_THREAD_RE.is_match(url)
}

/// Extract the conversation ID from a Claude chat URL.
#[must_use]
pub fn claude_conversation_id(url: &str) -> Option<&str> {
    CLAUDE_CHAT_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the thread ID from a ChatGPT conversation URL.
///
/// The plain form is tried first, then the project-scoped one; both shapes
/// yield the same ID.
#[must_use]
pub fn chatgpt_thread_id(url: &str) -> Option<&str> {
    CHATGPT_THREAD_RE
        .captures(url)
        .or_else(|| CHATGPT_PROJECT_THREAD_RE.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

//! In-memory doubles for the capability seams, shared across unit tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AppError, ConversationDetail, ConversationSummary, ExportArtifact, Result};
use crate::infrastructure::chatgpt::ChatGptApi;
use crate::infrastructure::claude::ClaudeApi;
use crate::infrastructure::cookie_store::CookieStore;
use crate::infrastructure::notifier::Notifier;
use crate::infrastructure::sink::ArtifactSink;

/// Cookie store backed by a plain map.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    jars: HashMap<String, HashMap<String, String>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, domain: &str, name: &str, value: &str) {
        self.jars
            .entry(domain.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }
}

impl CookieStore for MemoryCookieStore {
    fn cookie(&self, domain: &str, name: &str) -> Result<Option<String>> {
        Ok(self.jars.get(domain).and_then(|jar| jar.get(name)).cloned())
    }

    fn cookies_for(&self, domain: &str) -> Result<HashMap<String, String>> {
        Ok(self.jars.get(domain).cloned().unwrap_or_default())
    }
}

/// Builds a summary with just the fields the flows read.
pub fn summary(uuid: &str, name: &str) -> ConversationSummary {
    ConversationSummary {
        uuid: uuid.to_string(),
        name: name.to_string(),
        updated_at: None,
        extra: serde_json::Map::new(),
    }
}

/// Claude API double serving canned conversations and counting calls.
#[derive(Default)]
pub struct StubClaudeApi {
    summaries: Vec<ConversationSummary>,
    details: HashMap<String, Value>,
    fail_detail_for: Option<String>,
    pub list_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl StubClaudeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one conversation, listed and fetchable by `uuid`.
    #[must_use]
    pub fn with_conversation(mut self, uuid: &str, name: &str, detail: Value) -> Self {
        self.summaries.push(summary(uuid, name));
        self.details.insert(uuid.to_string(), detail);
        self
    }

    /// Makes the detail fetch for `uuid` answer HTTP 500.
    #[must_use]
    pub fn failing_detail(mut self, uuid: &str) -> Self {
        self.fail_detail_for = Some(uuid.to_string());
        self
    }
}

#[async_trait]
impl ClaudeApi for StubClaudeApi {
    async fn list_conversations(
        &self,
        _cookie_header: &str,
        _organization_id: &str,
    ) -> Result<Vec<ConversationSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.summaries.clone())
    }

    async fn fetch_detail(
        &self,
        _cookie_header: &str,
        _organization_id: &str,
        conversation_id: &str,
    ) -> Result<ConversationDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_detail_for.as_deref() == Some(conversation_id) {
            return Err(AppError::Http {
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }
        self.details
            .get(conversation_id)
            .map(|value| ConversationDetail(value.clone()))
            .ok_or_else(|| AppError::Http {
                status: 404,
                body: "Not Found".to_string(),
            })
    }
}

/// ChatGPT API double serving canned threads and counting calls.
#[derive(Default)]
pub struct StubChatGptApi {
    threads: HashMap<String, Value>,
    pub calls: AtomicUsize,
}

impl StubChatGptApi {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_thread(mut self, thread_id: &str, detail: Value) -> Self {
        self.threads.insert(thread_id.to_string(), detail);
        self
    }
}

#[async_trait]
impl ChatGptApi for StubChatGptApi {
    async fn fetch_conversation(
        &self,
        _cookie_header: &str,
        thread_id: &str,
    ) -> Result<ConversationDetail> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.threads
            .get(thread_id)
            .map(|value| ConversationDetail(value.clone()))
            .ok_or_else(|| AppError::Http {
                status: 404,
                body: "Not Found".to_string(),
            })
    }
}

/// Notifier capturing every notice instead of printing.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(String, String, bool)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<(String, String, bool)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|(_, _, is_error)| *is_error)
            .map(|(_, message, _)| message)
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|(_, _, is_error)| !*is_error)
            .map(|(_, message, _)| message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str, is_error: bool) {
        self.notices
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string(), is_error));
    }
}

/// Sink capturing artifacts in memory instead of touching the filesystem.
#[derive(Debug, Default)]
pub struct RecordingSink {
    saved: Mutex<Vec<ExportArtifact>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> Vec<ExportArtifact> {
        self.saved.lock().unwrap().clone()
    }

    pub fn filenames(&self) -> Vec<String> {
        self.artifacts()
            .into_iter()
            .map(|artifact| artifact.filename)
            .collect()
    }
}

impl ArtifactSink for RecordingSink {
    fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        self.saved.lock().unwrap().push(artifact.clone());
        Ok(PathBuf::from("exports").join(&artifact.filename))
    }
}

//! Claude web API client.
//!
//! Talks to the same endpoints the claude.ai web app uses. Authentication
//! is the browser cookie jar plus the organization ID carried by the
//! `lastActiveOrg` cookie.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};

use crate::domain::{AppError, ConversationDetail, ConversationSummary, Result};
use crate::infrastructure::http::expect_json;

/// Query string for the detail endpoint; matches what the web app sends so
/// the payload carries the full message tree and tool renderings.
const DETAIL_QUERY: &[(&str, &str)] = &[
    ("tree", "True"),
    ("rendering_mode", "messages"),
    ("render_all_tools", "true"),
];

/// Listing and detail access to Claude conversations.
#[async_trait]
pub trait ClaudeApi: Send + Sync {
    /// List every conversation in the organization.
    ///
    /// # Errors
    /// Returns error if the request or response decoding fails.
    async fn list_conversations(
        &self,
        cookie_header: &str,
        organization_id: &str,
    ) -> Result<Vec<ConversationSummary>>;

    /// Fetch one conversation with its full message tree.
    ///
    /// # Errors
    /// Returns error if the request or response decoding fails.
    async fn fetch_detail(
        &self,
        cookie_header: &str,
        organization_id: &str,
        conversation_id: &str,
    ) -> Result<ConversationDetail>;
}

/// HTTP client for the Claude web API.
pub struct ClaudeClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClaudeClient {
    /// Create a client against the given base URL.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::network("Failed to build HTTP client", e))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        cookie_header: &str,
    ) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .query(query)
            .header(COOKIE, cookie_header)
            .send()
            .await
            .map_err(|e| AppError::network(format!("Request to {url} failed"), e))?;

        expect_json(response).await
    }
}

#[async_trait]
impl ClaudeApi for ClaudeClient {
    async fn list_conversations(
        &self,
        cookie_header: &str,
        organization_id: &str,
    ) -> Result<Vec<ConversationSummary>> {
        let url = format!(
            "{}/api/organizations/{}/chat_conversations",
            self.base_url, organization_id
        );
        self.get_json(&url, &[], cookie_header).await
    }

    async fn fetch_detail(
        &self,
        cookie_header: &str,
        organization_id: &str,
        conversation_id: &str,
    ) -> Result<ConversationDetail> {
        let url = format!(
            "{}/api/organizations/{}/chat_conversations/{}",
            self.base_url, organization_id, conversation_id
        );
        self.get_json(&url, DETAIL_QUERY, cookie_header).await
    }
}

//! ChatGPT web API client.
//!
//! Conversation reads need a bearer token that only the logged-in web
//! session can mint. The token comes from the session endpoint, stays
//! cached in masked form for the rest of the run, and rides along every
//! conversation call together with the browser cookies.

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE,
    COOKIE, PRAGMA, USER_AGENT,
};
use serde::Deserialize;

use crate::domain::{AppError, ConversationDetail, Result};
use crate::infrastructure::http::expect_json;
use crate::infrastructure::token_cache::TokenCache;

const FIREFOX_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Conversation access to ChatGPT threads.
#[async_trait]
pub trait ChatGptApi: Send + Sync {
    /// Fetch one thread's full payload.
    ///
    /// # Errors
    /// Returns error if authentication, the request, or response decoding
    /// fails.
    async fn fetch_conversation(
        &self,
        cookie_header: &str,
        thread_id: &str,
    ) -> Result<ConversationDetail>;
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

/// HTTP client for the ChatGPT web API.
pub struct ChatGptClient {
    http: reqwest::Client,
    base_url: String,
    host: String,
    tokens: TokenCache,
}

impl ChatGptClient {
    /// Create a client against the given base URL.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let host = reqwest::Url::parse(&base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
            .unwrap_or_else(|| "chatgpt.com".to_string());

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(FIREFOX_UA));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::network("Failed to build HTTP client", e))?;

        Ok(Self {
            http,
            base_url,
            host,
            tokens: TokenCache::new(),
        })
    }

    /// Fetch a fresh bearer token from the session endpoint.
    async fn fetch_access_token(&self, cookie_header: &str) -> Result<String> {
        let url = format!("{}/api/auth/session", self.base_url);
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .header("Alt-Used", self.host.as_str())
            .header(COOKIE, cookie_header)
            .send()
            .await
            .map_err(|e| AppError::network(format!("Request to {url} failed"), e))?;

        let session: SessionResponse = expect_json(response).await?;
        session
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::not_authenticated(
                    "No access token in session response. Make sure you are logged in to \
                     chatgpt.com in your browser.",
                )
            })
    }

    /// Get the session bearer token, fetching and caching it on first use.
    ///
    /// # Errors
    /// Returns error if the session endpoint fails or carries no token.
    pub async fn access_token(&self, cookie_header: &str) -> Result<String> {
        self.tokens
            .get_or_fetch(|| self.fetch_access_token(cookie_header))
            .await
    }
}

#[async_trait]
impl ChatGptApi for ChatGptClient {
    async fn fetch_conversation(
        &self,
        cookie_header: &str,
        thread_id: &str,
    ) -> Result<ConversationDetail> {
        let token = self.access_token(cookie_header).await?;

        let url = format!("{}/backend-api/conversation/{}", self.base_url, thread_id);
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header("Alt-Used", self.host.as_str())
            .header(COOKIE, cookie_header)
            .send()
            .await
            .map_err(|e| AppError::network(format!("Request to {url} failed"), e))?;

        expect_json(response).await
    }
}

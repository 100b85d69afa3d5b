//! Shared HTTP response handling for the provider clients.

use serde::de::DeserializeOwned;

use crate::domain::{AppError, Result};

/// Read a response body as JSON.
///
/// # Errors
/// Returns `AppError::Http` for non-2xx statuses with the best-effort body
/// text, `AppError::Network` when the body cannot be read, and
/// `AppError::JsonParse` for malformed JSON.
pub async fn expect_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Http {
            status: status.as_u16(),
            body,
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| AppError::network("Failed to read response body", e))?;

    serde_json::from_str(&text).map_err(AppError::json_parse)
}

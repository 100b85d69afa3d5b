//! Obfuscated caching for the ChatGPT session token.
//!
//! The bearer token never sits in memory as plain text between uses: it is
//! XOR-masked against a random per-run key and unmasked on demand. The mask
//! is symmetric, so applying it twice restores the original bytes.
//!
//! The first fetch is memoized. Concurrent first callers share a single
//! in-flight session request and every later call reuses the cached token.

use std::future::Future;

use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::OnceCell;

use crate::domain::{AppError, Result};

/// Length of the per-run masking key.
const KEY_LENGTH: usize = 32;

const KEY_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// XOR `data` against a repeating key.
///
/// Applying the mask twice with the same key yields the original bytes.
#[must_use]
pub fn mask(data: &[u8], key: &str) -> Vec<u8> {
    let key = key.as_bytes();
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .enumerate()
        .map(|(i, byte)| byte ^ key[i % key.len()])
        .collect()
}

/// Generate a random alphanumeric masking key of [`KEY_LENGTH`] characters.
fn generate_key() -> String {
    let mut rng = rand::rng();
    let mut charset = KEY_CHARSET.to_vec();
    charset.shuffle(&mut rng);

    let mut picks = [0u8; KEY_LENGTH];
    rng.fill(&mut picks[..]);
    picks
        .iter()
        .map(|b| charset[*b as usize % charset.len()] as char)
        .collect()
}

/// Per-run cache holding the masked session token.
pub struct TokenCache {
    key: String,
    masked: OnceCell<Vec<u8>>,
}

impl TokenCache {
    /// Create an empty cache with a fresh masking key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: generate_key(),
            masked: OnceCell::new(),
        }
    }

    /// Get the cached token, fetching it with `fetch` on first use.
    ///
    /// Concurrent first calls are serialized so `fetch` runs at most once.
    /// A failed fetch leaves the cache empty and the next caller retries.
    ///
    /// # Errors
    /// Returns the fetch error when the token has to be fetched and the
    /// fetch fails.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let masked = self
            .masked
            .get_or_try_init(|| async {
                let token = fetch().await?;
                tracing::debug!("Session token fetched and cached");
                Ok::<_, AppError>(mask(token.as_bytes(), &self.key))
            })
            .await?;

        let clear = mask(masked, &self.key);
        String::from_utf8(clear)
            .map_err(|_| AppError::not_authenticated("Cached session token could not be decoded"))
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_mask_is_an_involution() {
        let cases: &[(&[u8], &str)] = &[
            (b"eyJhbGciOiJSUzI1NiJ9.payload.sig", "Xk29fmAbQ7"),
            (b"short", "a-much-longer-key-than-the-data"),
            (b"", "key"),
            (b"token", "k"),
        ];
        for (data, key) in cases {
            assert_eq!(mask(&mask(data, key), key), *data);
        }
    }

    #[test]
    fn test_mask_changes_every_byte() {
        let data = b"secret-session-token";
        let masked = mask(data, "Fj3kQ9zLm2Xw");
        assert_ne!(masked.as_slice(), data.as_slice());
        for (clear, hidden) in data.iter().zip(&masked) {
            assert_ne!(clear, hidden);
        }
    }

    #[test]
    fn test_generated_keys_are_alphanumeric() {
        let key = generate_key();
        assert_eq!(key.len(), KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(key, generate_key());
    }

    #[tokio::test]
    async fn test_first_fetch_is_memoized() {
        let cache = TokenCache::new();
        let fetches = AtomicUsize::new(0);
        let fetches = &fetches;

        for _ in 0..3 {
            let token = cache
                .get_or_fetch(|| async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok("tok-1".to_string())
                })
                .await
                .unwrap();
            assert_eq!(token, "tok-1");
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_share_one_fetch() {
        let cache = TokenCache::new();
        let fetches = AtomicUsize::new(0);
        let fetches = &fetches;

        let fetch = || async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok("tok-1".to_string())
        };

        let (a, b) = tokio::join!(cache.get_or_fetch(fetch), cache.get_or_fetch(fetch));

        assert_eq!(a.unwrap(), "tok-1");
        assert_eq!(b.unwrap(), "tok-1");
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_retried_next_call() {
        let cache = TokenCache::new();
        let fetches = AtomicUsize::new(0);
        let fetches = &fetches;

        let first: Result<String> = cache
            .get_or_fetch(|| async move {
                fetches.fetch_add(1, Ordering::SeqCst);
                Err(AppError::Http {
                    status: 503,
                    body: "down".into(),
                })
            })
            .await;
        assert!(first.is_err());

        let second = cache
            .get_or_fetch(|| async move {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok("tok-2".to_string())
            })
            .await
            .unwrap();

        assert_eq!(second, "tok-2");
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }
}

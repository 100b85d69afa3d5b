//! Credential assembly from the browser session.
//!
//! Claude requests authenticate with the plain cookie jar for `claude.ai`;
//! the active organization comes from the `lastActiveOrg` cookie the web app
//! maintains. ChatGPT requests use the `chatgpt.com` jar to bootstrap a
//! session token (see `infrastructure::chatgpt`).

use crate::domain::{AppError, Result};
use crate::infrastructure::cookie_store::CookieStore;

/// Domain whose cookies authenticate Claude requests.
pub const CLAUDE_DOMAIN: &str = "claude.ai";

/// Domain whose cookies authenticate ChatGPT requests.
pub const CHATGPT_DOMAIN: &str = "chatgpt.com";

/// Cookie holding the organization ID the Claude web app last used.
pub const ORG_COOKIE: &str = "lastActiveOrg";

/// Read the active Claude organization ID from the browser session.
///
/// # Errors
///
/// Returns `AppError::NotAuthenticated` when the cookie is absent and
/// propagates cookie jar read failures.
pub fn organization_id(store: &dyn CookieStore) -> Result<String> {
    store.cookie(CLAUDE_DOMAIN, ORG_COOKIE)?.ok_or_else(|| {
        AppError::not_authenticated(
            "Required cookie not found. Please make sure you're logged into Claude.ai.",
        )
    })
}

/// Assemble a `Cookie` header value from every live cookie for `domain`.
///
/// Pairs are sorted by name so the header is deterministic across runs.
///
/// # Errors
///
/// Returns `AppError::NotAuthenticated` when the jar holds no cookies for
/// the domain and propagates cookie jar read failures.
pub fn cookie_header(store: &dyn CookieStore, domain: &str) -> Result<String> {
    let cookies = store.cookies_for(domain)?;
    if cookies.is_empty() {
        return Err(AppError::not_authenticated(format!(
            "No cookies found for {domain}. Please make sure you're logged into {domain}.",
        )));
    }

    let mut pairs: Vec<(String, String)> = cookies.into_iter().collect();
    pairs.sort();
    let header = pairs
        .into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ");
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MemoryCookieStore;

    #[test]
    fn test_organization_id_reads_org_cookie() {
        let mut store = MemoryCookieStore::new();
        store.insert(CLAUDE_DOMAIN, ORG_COOKIE, "org-uuid-1234");
        store.insert(CLAUDE_DOMAIN, "sessionKey", "sk-abc");

        let org = organization_id(&store).unwrap();
        assert_eq!(org, "org-uuid-1234");
    }

    #[test]
    fn test_missing_org_cookie_is_not_authenticated() {
        let mut store = MemoryCookieStore::new();
        store.insert(CLAUDE_DOMAIN, "sessionKey", "sk-abc");

        let err = organization_id(&store).unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated { .. }));
        assert!(err.to_string().contains("cookie"));
    }

    #[test]
    fn test_cookie_header_joins_sorted_pairs() {
        let mut store = MemoryCookieStore::new();
        store.insert(CLAUDE_DOMAIN, "sessionKey", "sk-abc");
        store.insert(CLAUDE_DOMAIN, "activitySessionId", "act-1");
        store.insert(CLAUDE_DOMAIN, "lastActiveOrg", "org-1");

        let header = cookie_header(&store, CLAUDE_DOMAIN).unwrap();
        assert_eq!(
            header,
            "activitySessionId=act-1; lastActiveOrg=org-1; sessionKey=sk-abc"
        );
    }

    #[test]
    fn test_cookie_header_ignores_other_domains() {
        let mut store = MemoryCookieStore::new();
        store.insert(CLAUDE_DOMAIN, "sessionKey", "sk-abc");
        store.insert(CHATGPT_DOMAIN, "__Secure-next-auth.session-token", "tok");

        let header = cookie_header(&store, CHATGPT_DOMAIN).unwrap();
        assert_eq!(header, "__Secure-next-auth.session-token=tok");
    }

    #[test]
    fn test_empty_jar_is_not_authenticated() {
        let store = MemoryCookieStore::new();

        let err = cookie_header(&store, CHATGPT_DOMAIN).unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated { .. }));
    }
}

//! Browser cookie access.
//!
//! Credentials come straight from a Firefox profile's `cookies.sqlite`.
//! Every lookup opens a fresh read-only connection so values written by a
//! running browser are always picked up; nothing is cached here.

use std::collections::HashMap;
use std::path::PathBuf;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::domain::{AppError, Result};
use crate::infrastructure::browser_paths;

/// Read access to the browser cookie jar.
pub trait CookieStore: Send + Sync {
    /// Look up a single cookie value for a domain.
    ///
    /// # Errors
    /// Returns error if the cookie jar cannot be read. A missing cookie is
    /// `Ok(None)`, not an error.
    fn cookie(&self, domain: &str, name: &str) -> Result<Option<String>>;

    /// Fetch all live cookies for a domain as a name-to-value map.
    ///
    /// # Errors
    /// Returns error if the cookie jar cannot be read.
    fn cookies_for(&self, domain: &str) -> Result<HashMap<String, String>>;
}

/// Cookie store backed by a Firefox `cookies.sqlite` database.
pub struct FirefoxCookieStore {
    db_path: Option<PathBuf>,
}

impl FirefoxCookieStore {
    /// Create a store; the profile is autodiscovered unless a path is given.
    #[must_use]
    pub const fn new(db_path: Option<PathBuf>) -> Self {
        Self { db_path }
    }

    /// Resolve the cookie database path this store reads from.
    ///
    /// # Errors
    /// Returns error if no database can be located.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => browser_paths::find_cookie_database(),
        }
    }

    /// Opens a fresh read-only connection to the cookie database.
    fn open(&self) -> Result<Connection> {
        let path = self.database_path()?;

        // The immutable URI open reads the database even while Firefox holds
        // its own lock on it.
        let uri = format!("file:{}?immutable=1", path.display());
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        Connection::open_with_flags(uri, flags).map_err(AppError::database)
    }
}

/// Both host spellings Firefox stores: `example.com` and `.example.com`.
fn host_forms(domain: &str) -> (String, String) {
    (domain.to_string(), format!(".{domain}"))
}

impl CookieStore for FirefoxCookieStore {
    fn cookie(&self, domain: &str, name: &str) -> Result<Option<String>> {
        let conn = self.open()?;
        let (host, dotted_host) = host_forms(domain);
        let now = chrono::Utc::now().timestamp();

        conn.query_row(
            "SELECT value FROM moz_cookies
             WHERE (host = ?1 OR host = ?2) AND name = ?3
               AND (expiry = 0 OR expiry > ?4)
             ORDER BY expiry DESC LIMIT 1",
            params![host, dotted_host, name, now],
            |row| row.get(0),
        )
        .optional()
        .map_err(AppError::database)
    }

    fn cookies_for(&self, domain: &str) -> Result<HashMap<String, String>> {
        let conn = self.open()?;
        let (host, dotted_host) = host_forms(domain);
        let now = chrono::Utc::now().timestamp();

        let mut stmt = conn
            .prepare(
                "SELECT name, value FROM moz_cookies
                 WHERE (host = ?1 OR host = ?2)
                   AND (expiry = 0 OR expiry > ?3)",
            )
            .map_err(AppError::database)?;

        let rows = stmt
            .query_map(params![host, dotted_host, now], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(AppError::database)?;

        let mut cookies = HashMap::new();
        for row in rows {
            match row {
                Ok((name, value)) => {
                    cookies.insert(name, value);
                }
                Err(e) => {
                    tracing::warn!("Failed to read cookie row: {}", e);
                }
            }
        }

        tracing::debug!("Fetched {} cookies for '{}'", cookies.len(), domain);

        Ok(cookies)
    }
}

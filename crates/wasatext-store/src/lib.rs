//! Session store accessor.
//!
//! The session credential is an opaque string kept under [`SESSION_KEY`] in a
//! key/value store. Reads never fail: a missing key or a broken backing store
//! both read as "no session".

pub mod migrations;
pub mod queries;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, RwLock};

use anyhow::{Result, anyhow};
use rusqlite::Connection;
use tracing::info;

/// Key the session identifier is stored under.
pub const SESSION_KEY: &str = "sessionId";

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Current session token, if any.
pub fn session_token(store: &dyn SessionStore) -> Option<String> {
    store.get(SESSION_KEY)
}

// -- In-memory --

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .map_err(|e| anyhow!("Store lock poisoned: {}", e))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .map_err(|e| anyhow!("Store lock poisoned: {}", e))?
            .remove(key);
        Ok(())
    }
}

// -- Injected token --

/// A store holding only the session token, handed in by the caller.
/// Other keys read as absent and cannot be written.
pub struct StaticToken {
    token: RwLock<Option<String>>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn empty() -> Self {
        Self {
            token: RwLock::new(None),
        }
    }
}

impl SessionStore for StaticToken {
    fn get(&self, key: &str) -> Option<String> {
        if key != SESSION_KEY {
            return None;
        }
        self.token.read().ok()?.clone()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key != SESSION_KEY {
            return Err(anyhow!("StaticToken only holds {}", SESSION_KEY));
        }
        *self
            .token
            .write()
            .map_err(|e| anyhow!("Store lock poisoned: {}", e))? = Some(value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if key == SESSION_KEY {
            *self
                .token
                .write()
                .map_err(|e| anyhow!("Store lock poisoned: {}", e))? = None;
        }
        Ok(())
    }
}

// -- SQLite --

/// Persistent key/value store backed by a single SQLite table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Session store opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow!("Store lock poisoned: {}", e))?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(session_token(&store), None);

        store.set(SESSION_KEY, "tok-1").unwrap();
        assert_eq!(session_token(&store).as_deref(), Some("tok-1"));

        store.set(SESSION_KEY, "tok-2").unwrap();
        assert_eq!(session_token(&store).as_deref(), Some("tok-2"));

        store.remove(SESSION_KEY).unwrap();
        assert_eq!(session_token(&store), None);
    }

    #[test]
    fn static_token_only_answers_session_key() {
        let store = StaticToken::new("abc");
        assert_eq!(session_token(&store).as_deref(), Some("abc"));
        assert_eq!(store.get("username"), None);
        assert!(store.set("username", "ann").is_err());

        store.remove(SESSION_KEY).unwrap();
        assert_eq!(session_token(&store), None);

        let empty = StaticToken::empty();
        assert_eq!(session_token(&empty), None);
        empty.set(SESSION_KEY, "later").unwrap();
        assert_eq!(session_token(&empty).as_deref(), Some("later"));
    }
}

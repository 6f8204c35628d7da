//! File-backed session persistence.
//!
//! The session record (identity + bearer credential) is the only durable
//! state the client owns. It lives in one JSON file; replacement goes
//! through a temp file and an atomic rename so a crash mid-write can
//! never leave a half-written record behind.

use crate::environment::SessionStore;
use crate::error::SessionStoreError;
use crate::types::Session;
use std::fs;
use std::path::{Path, PathBuf};

/// Session store persisting to a single JSON file
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the given file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn restore(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "No persisted session");
                return None;
            },
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                // A corrupt record is treated as absent, not fatal.
                tracing::warn!(path = %self.path.display(), error = %err, "Discarding corrupt session record");
                None
            },
        }
    }

    fn persist(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let raw = serde_json::to_string_pretty(session)?;

        // Write-then-rename so the record is replaced atomically.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::types::UserId;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    /// A unique file path per test so tests never race on one file.
    fn temp_store() -> FileSessionStore {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "cinebook-session-test-{}-{n}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        FileSessionStore::new(path)
    }

    fn session() -> Session {
        Session {
            user_id: UserId::new("u1".to_string()),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            token: "tok-123".to_string(),
            logged_in_at: Utc::now(),
        }
    }

    #[test]
    fn restore_missing_file_is_none() {
        let store = temp_store();
        assert!(store.restore().is_none());
    }

    #[test]
    fn persist_then_restore_roundtrips() {
        let store = temp_store();
        let session = session();

        store.persist(&session).unwrap();
        assert_eq!(store.restore(), Some(session));

        store.clear().unwrap();
    }

    #[test]
    fn restore_corrupt_file_is_none() {
        let store = temp_store();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.restore().is_none());

        store.clear().unwrap();
    }

    #[test]
    fn clear_is_idempotent() {
        let store = temp_store();
        store.persist(&session()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.restore().is_none());
    }
}

//! Persisted session: bearer token plus last-known user snapshot.
//!
//! # Design
//! - Two independent keys (`token` raw, `user` JSON), each degrading to
//!   absent on its own when missing or corrupt.
//! - The snapshot never carries the password.
//! - Last write wins; no merge with concurrent writers.

use movienest_api_models::User;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult, SessionItem};
use crate::storage::KeyValueStorage;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialized user snapshot.
pub const USER_KEY: &str = "user";

/// Snapshot of the persisted session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Bearer credential issued at login.
    pub token: Option<String>,
    /// Last-known user record.
    pub user: Option<User>,
}

impl Session {
    /// Whether a token is available for authenticated calls.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Typed load/save/clear contract over a [`KeyValueStorage`].
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Wrap `storage`.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist a fresh login, replacing any previous session.
    ///
    /// When the user snapshot cannot be written the new token is removed again,
    /// so a token is never paired with another account's snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when either entry cannot be written.
    pub fn save(&mut self, token: &str, user: &User) -> ClientResult<()> {
        self.storage
            .set_item(TOKEN_KEY, token)
            .map_err(|source| ClientError::Storage {
                operation: "write",
                key: TOKEN_KEY,
                source,
            })?;
        if let Err(err) = self.save_user(user) {
            if let Err(cleanup) = self.storage.remove_item(TOKEN_KEY) {
                warn!(error = %cleanup, "failed to discard token after user write failure");
            }
            return Err(err);
        }
        Ok(())
    }

    /// Replace only the user snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the entry cannot be written.
    pub fn save_user(&mut self, user: &User) -> ClientResult<()> {
        let snapshot = user.clone().without_password();
        let encoded = serde_json::to_string(&snapshot).map_err(|source| ClientError::Storage {
            operation: "encode",
            key: USER_KEY,
            source: source.into(),
        })?;
        self.storage
            .set_item(USER_KEY, &encoded)
            .map_err(|source| ClientError::Storage {
                operation: "write",
                key: USER_KEY,
                source,
            })?;
        debug!(username = %snapshot.username, "session user saved");
        Ok(())
    }

    /// Read the session. Absent or malformed entries read as empty.
    #[must_use]
    pub fn load(&self) -> Session {
        Session {
            token: self.token(),
            user: self.user(),
        }
    }

    /// Stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage
            .get_item(TOKEN_KEY)
            .map(|raw| raw.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    /// Stored user snapshot, if present and well-formed.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        let raw = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "stored session user is malformed; ignoring");
                None
            }
        }
    }

    /// Stored token or [`ClientError::SessionMissing`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionMissing`] when no token is stored.
    pub fn require_token(&self) -> ClientResult<String> {
        self.token().ok_or_else(|| {
            warn!("session token not found");
            ClientError::SessionMissing {
                what: SessionItem::Token,
            }
        })
    }

    /// Stored user or [`ClientError::SessionMissing`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionMissing`] when no usable user is stored.
    pub fn require_user(&self) -> ClientResult<User> {
        self.user().ok_or_else(|| {
            warn!("session user not found");
            ClientError::SessionMissing {
                what: SessionItem::User,
            }
        })
    }

    /// Remove both entries.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when an entry cannot be removed.
    pub fn clear(&mut self) -> ClientResult<()> {
        for key in [TOKEN_KEY, USER_KEY] {
            self.storage
                .remove_item(key)
                .map_err(|source| ClientError::Storage {
                    operation: "remove",
                    key,
                    source,
                })?;
        }
        debug!("session cleared");
        Ok(())
    }

    /// Underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use movienest_test_support::fixtures::sample_user;

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new())
    }

    #[test]
    fn save_then_load_returns_token_and_user() {
        let mut store = store();
        let user = sample_user("neo");
        store.save("jwt-token", &user).expect("save");

        let session = store.load();
        assert!(session.is_authenticated());
        assert_eq!(session.token.as_deref(), Some("jwt-token"));
        assert_eq!(session.user, Some(user));
    }

    #[test]
    fn snapshot_never_stores_password() {
        let mut store = store();
        let mut user = sample_user("neo");
        user.password = Some("$2b$10$hash".to_string());
        store.save("jwt-token", &user).expect("save");

        let raw = store.storage().get_item(USER_KEY).expect("user stored");
        assert!(!raw.contains("Password"));
        assert!(store.require_user().expect("user").password.is_none());
    }

    #[test]
    fn absent_session_loads_empty() {
        let store = store();
        assert_eq!(store.load(), Session::default());
        assert!(matches!(
            store.require_token(),
            Err(ClientError::SessionMissing {
                what: SessionItem::Token
            })
        ));
        assert!(matches!(
            store.require_user(),
            Err(ClientError::SessionMissing {
                what: SessionItem::User
            })
        ));
    }

    #[test]
    fn malformed_user_degrades_independently() {
        let mut storage = MemoryStorage::new();
        storage.set_item(TOKEN_KEY, "jwt-token").expect("set token");
        storage.set_item(USER_KEY, "{not json").expect("set user");
        let store = SessionStore::new(storage);

        let session = store.load();
        assert_eq!(session.token.as_deref(), Some("jwt-token"));
        assert!(session.user.is_none());
    }

    #[test]
    fn blank_token_reads_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.set_item(TOKEN_KEY, "  \n").expect("set token");
        let store = SessionStore::new(storage);
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn clear_removes_both_entries() {
        let mut store = store();
        store.save("jwt-token", &sample_user("neo")).expect("save");
        store.clear().expect("clear");
        assert_eq!(store.load(), Session::default());
        assert!(store.storage().is_empty());
        store.clear().expect("clearing twice is fine");
    }

    #[test]
    fn save_user_keeps_token() {
        let mut store = store();
        store.save("jwt-token", &sample_user("neo")).expect("save");
        let mut renamed = sample_user("thomas");
        renamed.favourite_movies = vec!["m9".into()];
        store.save_user(&renamed).expect("save user");

        let session = store.load();
        assert_eq!(session.token.as_deref(), Some("jwt-token"));
        assert_eq!(session.user, Some(renamed));
    }

    /// Memory storage that refuses writes to one key.
    struct RejectingStorage {
        inner: MemoryStorage,
        reject: &'static str,
    }

    impl KeyValueStorage for RejectingStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> std::io::Result<()> {
            if key == self.reject {
                return Err(std::io::Error::other("disk full"));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> std::io::Result<()> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn failed_user_write_discards_new_token() {
        let mut inner = MemoryStorage::new();
        inner.set_item(TOKEN_KEY, "old-token").expect("set token");
        let previous = serde_json::to_string(&sample_user("trinity")).expect("encode");
        inner.set_item(USER_KEY, &previous).expect("set user");
        let mut store = SessionStore::new(RejectingStorage {
            inner,
            reject: USER_KEY,
        });

        let err = store
            .save("new-token", &sample_user("neo"))
            .expect_err("user write fails");

        assert!(matches!(
            err,
            ClientError::Storage {
                operation: "write",
                key: USER_KEY,
                ..
            }
        ));
        let session = store.load();
        assert!(session.token.is_none());
        assert_eq!(
            session.user.map(|user| user.username).as_deref(),
            Some("trinity")
        );
        assert!(matches!(
            store.require_token(),
            Err(ClientError::SessionMissing { .. })
        ));
    }

    #[test]
    fn file_backed_session_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let mut store = SessionStore::new(FileStorage::new(dir.path()));
            store.save("jwt-token", &sample_user("neo")).expect("save");
        }
        let reopened = SessionStore::new(FileStorage::new(dir.path()));
        let session = reopened.load();
        assert_eq!(session.token.as_deref(), Some("jwt-token"));
        assert_eq!(session.user.map(|user| user.username).as_deref(), Some("neo"));
    }
}

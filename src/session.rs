//! Explicit session context
//!
//! Owns the bearer tokens and the current user for one client instance.
//! Constructed fresh or restored from persisted storage; torn down on
//! logout or irrecoverable refresh failure. Deliberately not a
//! process-wide singleton: whoever builds the HTTP client decides which
//! session it uses.

use crate::error::Result;
use crate::storage::{PersistedSession, SessionStorage};
use crate::types::{AuthTokens, User};
use parking_lot::RwLock;

pub struct SessionContext {
    access_token: RwLock<Option<String>>,
    refresh_token: RwLock<Option<String>>,
    user: RwLock<Option<User>>,
    storage: Box<dyn SessionStorage>,
}

impl SessionContext {
    /// Fresh anonymous session.
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            access_token: RwLock::new(None),
            refresh_token: RwLock::new(None),
            user: RwLock::new(None),
            storage,
        }
    }

    /// Session restored from the persisted snapshot, if one exists.
    pub fn restore(storage: Box<dyn SessionStorage>) -> Result<Self> {
        let snapshot = storage.load()?.unwrap_or_default();
        Ok(Self {
            access_token: RwLock::new(snapshot.access_token),
            refresh_token: RwLock::new(snapshot.refresh_token),
            user: RwLock::new(snapshot.user),
            storage,
        })
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token.read().clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.refresh_token.read().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.user.read().clone()
    }

    /// `true` iff a user is held. Access tokens may outlive the user
    /// transiently while a refresh is in flight.
    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    /// Store both tokens and persist the snapshot. Persisting happens
    /// before the caller proceeds, so a retried request never runs
    /// ahead of storage.
    pub fn set_tokens(&self, tokens: &AuthTokens) -> Result<()> {
        *self.access_token.write() = Some(tokens.access_token.clone());
        *self.refresh_token.write() = Some(tokens.refresh_token.clone());
        self.persist()
    }

    /// Store the current user and persist the snapshot.
    pub fn set_user(&self, user: Option<User>) -> Result<()> {
        *self.user.write() = user;
        self.persist()
    }

    /// Drop tokens and user and remove the persisted snapshot.
    pub fn clear(&self) -> Result<()> {
        *self.access_token.write() = None;
        *self.refresh_token.write() = None;
        *self.user.write() = None;
        self.storage.clear()
    }

    fn persist(&self) -> Result<()> {
        let snapshot = PersistedSession {
            access_token: self.access_token.read().clone(),
            refresh_token: self.refresh_token.read().clone(),
            user: self.user.read().clone(),
        };
        self.storage.save(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "at-1".to_string(),
            refresh_token: "rt-1".to_string(),
        }
    }

    #[test]
    fn starts_anonymous() {
        let session = SessionContext::new(Box::new(MemoryStorage::new()));
        assert!(session.access_token().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn set_tokens_then_clear() {
        let session = SessionContext::new(Box::new(MemoryStorage::new()));
        session.set_tokens(&tokens()).unwrap();
        assert_eq!(session.access_token().as_deref(), Some("at-1"));
        assert_eq!(session.refresh_token().as_deref(), Some("rt-1"));

        session.clear().unwrap();
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn restore_picks_up_snapshot() {
        let storage = MemoryStorage::new();
        storage
            .save(&PersistedSession {
                access_token: Some("at-2".to_string()),
                refresh_token: Some("rt-2".to_string()),
                user: None,
            })
            .unwrap();

        let session = SessionContext::restore(Box::new(storage)).unwrap();
        assert_eq!(session.access_token().as_deref(), Some("at-2"));
        assert!(!session.is_authenticated());
    }
}

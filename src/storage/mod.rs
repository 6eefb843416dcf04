//! Persisted client-side session state
//!
//! The browser front end kept `accessToken`, `refreshToken` and a
//! serialized user snapshot in origin-scoped storage. Here the same
//! snapshot lives behind the [`SessionStorage`] trait with a JSON file
//! backend and an in-memory backend for tests. Writes are
//! last-write-wins; there is no cross-process locking.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use crate::types::User;
use serde::{Deserialize, Serialize};

/// Snapshot of the persisted session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl PersistedSession {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

/// Backend for the persisted session snapshot.
pub trait SessionStorage: Send + Sync {
    /// Load the stored snapshot, if any. A corrupt snapshot is treated
    /// as absent rather than an error.
    fn load(&self) -> Result<Option<PersistedSession>>;

    /// Replace the stored snapshot.
    fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Remove the stored snapshot.
    fn clear(&self) -> Result<()>;
}

//! In-memory session storage for tests and ephemeral sessions

use super::{PersistedSession, SessionStorage};
use crate::error::Result;
use parking_lot::RwLock;

/// Keeps the snapshot in memory only. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    session: RwLock<Option<PersistedSession>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.session.read().clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        *self.session.write() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.write() = None;
        Ok(())
    }
}

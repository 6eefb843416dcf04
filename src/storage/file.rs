//! File-based session storage

use super::{PersistedSession, SessionStorage};
use crate::error::{ClientError, Result};
use std::fs;
use std::path::PathBuf;

const SESSION_FILE: &str = "session.json";

/// Stores the session snapshot as a JSON file in a config directory.
pub struct FileStorage {
    config_dir: PathBuf,
}

impl FileStorage {
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Storage rooted at the platform config directory.
    pub fn in_default_dir() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| ClientError::Config("no platform config directory".to_string()))?;
        Ok(Self::new(base.join("portfolio-client")))
    }

    fn session_path(&self) -> PathBuf {
        self.config_dir.join(SESSION_FILE)
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<PersistedSession>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path)
            .map_err(|e| ClientError::Storage(format!("failed to read session file: {}", e)))?;

        match serde_json::from_str::<PersistedSession>(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // Unreadable snapshot is discarded, not fatal
                tracing::warn!("discarding corrupt session file: {}", e);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| ClientError::Storage(format!("failed to create config dir: {}", e)))?;

        let data = serde_json::to_string_pretty(session)?;
        fs::write(self.session_path(), data)
            .map_err(|e| ClientError::Storage(format!("failed to write session file: {}", e)))?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| ClientError::Storage(format!("failed to remove session file: {}", e)))?;
        }
        Ok(())
    }
}

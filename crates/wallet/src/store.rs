// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! On-disk persistence of the connected account.
//!
//! Only the address and the chosen role survive a restart; network and
//! balance are refreshed from the provider. The file lives at
//! `$XDG_CONFIG_DIR/greenroom/session.json` by default.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs::{read, remove_file, write};
use tokio::task::spawn_blocking;

use greenroom_core::types::{Address, Role};

use crate::error::WalletError;

/// Slice of the session that survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub address: Address,
    pub role: Option<Role>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `$XDG_CONFIG_DIR/greenroom/session.json`
    pub async fn default_path() -> Result<PathBuf, WalletError> {
        let path = spawn_blocking(move || {
            xdg::BaseDirectories::with_prefix("greenroom")
                .map(|dirs| dirs.place_config_file("session.json"))
        })
        .await???;

        Ok(path)
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Reads the persisted session, `None` when no session was saved.
    pub async fn load(&self) -> Result<Option<PersistedSession>, WalletError> {
        let bytes = match read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let session = serde_json::from_slice(&bytes)?;
        Ok(Some(session))
    }

    pub async fn save(&self, session: &PersistedSession) -> Result<(), WalletError> {
        let bytes = serde_json::to_vec_pretty(session)?;
        write(&self.path, bytes).await?;
        Ok(())
    }

    /// Removes the persisted session. Succeeds when no file exists.
    pub async fn clear(&self) -> Result<(), WalletError> {
        match remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    #[tokio::test]
    async fn load_returns_none_when_nothing_saved() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let session = PersistedSession {
            address: Address::new("0xAbC123"),
            role: Some(Role::Individual),
        };
        store.save(&session).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(session));
        assert!(store.exists());
    }

    #[tokio::test]
    async fn clear_removes_the_file_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store
            .save(&PersistedSession {
                address: Address::new("0x1"),
                role: None,
            })
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert!(!store.exists());

        // Clearing again must not fail.
        store.clear().await.unwrap();
    }
}

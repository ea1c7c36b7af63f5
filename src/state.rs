// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Registry records carried between command invocations.
//!
//! The in-memory stores are loaded from and dumped back to a JSON file in
//! the XDG data directory, so a registration made by one invocation is
//! visible to the next.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::fs::{read, write};
use tokio::task::spawn_blocking;

use greenroom_core::types::{Application, Ticket, UserProfile};
use greenroom_registry::memory::InMemoryRegistry;
use greenroom_registry::profiles::ProfileStore;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub profiles: Vec<UserProfile>,
}

impl AppState {
    /// `$XDG_DATA_DIR/greenroom/state.json`
    pub async fn state_path() -> Result<PathBuf> {
        let path = spawn_blocking(|| {
            xdg::BaseDirectories::with_prefix("greenroom")
                .map(|dirs| dirs.place_data_file("state.json"))
        })
        .await???;

        Ok(path)
    }

    /// Reads the persisted records; a missing file is an empty state.
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = match read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        write(path, bytes).await?;
        Ok(())
    }
}

/// The registry and profile stores, rehydrated from disk.
pub struct Stores {
    pub registry: InMemoryRegistry,
    pub profiles: ProfileStore,
    path: PathBuf,
}

impl Stores {
    pub async fn open() -> Result<Self> {
        let path = AppState::state_path().await?;
        let state = AppState::load(&path).await?;

        Ok(Self {
            registry: InMemoryRegistry::with_records(state.tickets, state.applications),
            profiles: ProfileStore::with_profiles(state.profiles),
            path,
        })
    }

    /// Writes every record back out.
    pub async fn commit(&self) -> Result<()> {
        let state = AppState {
            tickets: self.registry.tickets(),
            applications: self.registry.applications(),
            profiles: self.profiles.profiles(),
        };
        state.save(&self.path).await
    }
}

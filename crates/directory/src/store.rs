// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use greenroom_core::types::{Address, EventRecord, EventStatus};

use crate::error::DirectoryError;

/// Query interface over published events.
///
/// Lookup by an unknown id is not an error: it answers `Ok(None)`. Errors
/// are reserved for the backend itself failing.
#[async_trait]
pub trait EventDirectory: Send + Sync {
    /// All events, oldest listing first.
    async fn list_all(&self) -> Result<Vec<EventRecord>, DirectoryError>;

    async fn event(&self, id: &str) -> Result<Option<EventRecord>, DirectoryError>;

    async fn list_by_status(
        &self,
        status: EventStatus,
    ) -> Result<Vec<EventRecord>, DirectoryError>;

    /// Events published by `organizer`, matched case-insensitively.
    async fn list_by_organizer(
        &self,
        organizer: &Address,
    ) -> Result<Vec<EventRecord>, DirectoryError>;

    /// Case-insensitive substring search over title, description and tags.
    async fn search(&self, keyword: &str) -> Result<Vec<EventRecord>, DirectoryError>;
}

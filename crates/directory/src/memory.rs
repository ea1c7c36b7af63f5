// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use greenroom_core::types::{Address, EventRecord, EventStatus};

use crate::catalog;
use crate::error::DirectoryError;
use crate::store::EventDirectory;

/// Directory backend holding its records in process memory.
///
/// Listing order is the order records were handed to the constructor.
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    events: Arc<RwLock<Vec<EventRecord>>>,
}

impl InMemoryDirectory {
    pub fn new(events: Vec<EventRecord>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
        }
    }

    /// Directory preloaded with the launch catalog.
    pub fn seeded() -> Self {
        Self::new(catalog::seed_events())
    }
}

#[async_trait]
impl EventDirectory for InMemoryDirectory {
    async fn list_all(&self) -> Result<Vec<EventRecord>, DirectoryError> {
        Ok(self.events.read().clone())
    }

    async fn event(&self, id: &str) -> Result<Option<EventRecord>, DirectoryError> {
        let events = self.events.read();
        Ok(events.iter().find(|event| event.id == id).cloned())
    }

    async fn list_by_status(
        &self,
        status: EventStatus,
    ) -> Result<Vec<EventRecord>, DirectoryError> {
        let events = self.events.read();
        Ok(events
            .iter()
            .filter(|event| event.status == status)
            .cloned()
            .collect())
    }

    async fn list_by_organizer(
        &self,
        organizer: &Address,
    ) -> Result<Vec<EventRecord>, DirectoryError> {
        let events = self.events.read();
        Ok(events
            .iter()
            .filter(|event| event.organizer.address == *organizer)
            .cloned()
            .collect())
    }

    async fn search(&self, keyword: &str) -> Result<Vec<EventRecord>, DirectoryError> {
        let keyword = keyword.to_lowercase();
        let events = self.events.read();
        Ok(events
            .iter()
            .filter(|event| {
                event.title.to_lowercase().contains(&keyword)
                    || event.description.to_lowercase().contains(&keyword)
                    || event
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&keyword))
            })
            .cloned()
            .collect())
    }
}

// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

use thiserror::Error;

use greenroom_core::types::Address;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{applicant} has already applied for event {event_id}")]
    AlreadyApplied { event_id: String, applicant: Address },

    #[error("Application {0} does not exist")]
    ApplicationNotFound(String),

    /// Reviews are final: a reviewed application cannot change state again.
    #[error("Application {0} has already been reviewed")]
    AlreadyReviewed(String),

    #[error("Skill '{0}' is already listed on the profile")]
    DuplicateSkill(String),

    /// Failure inside the backing store, e.g. a remote registry going away.
    #[error("Registry backend error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl RegistryError {
    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Box::new(err))
    }
}

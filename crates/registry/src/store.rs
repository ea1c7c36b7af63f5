// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use greenroom_core::types::{Address, Application, ParseEnumError, Ticket, TicketType};

use crate::error::RegistryError;

/// An organizer's verdict on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewDecision::Approve => write!(f, "approve"),
            ReviewDecision::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for ReviewDecision {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "approve" => Ok(ReviewDecision::Approve),
            "reject" => Ok(ReviewDecision::Reject),
            _ => Err(ParseEnumError::new("review decision", s)),
        }
    }
}

/// What a review produced: the updated application, and the admission
/// ticket when the decision was an approval.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub application: Application,
    pub ticket: Option<Ticket>,
}

/// Write side of the platform: tickets and applications.
///
/// Holder and applicant addresses are matched case-insensitively
/// throughout.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Issues a ticket for an open event.
    async fn register(
        &self,
        event_id: &str,
        holder: &Address,
        ticket_type: TicketType,
        price: &str,
        currency: &str,
    ) -> Result<Ticket, RegistryError>;

    /// Submits an application for an event that requires one. At most one
    /// application per (event, applicant) pair.
    async fn apply(
        &self,
        event_id: &str,
        applicant: &Address,
        responses: BTreeMap<String, String>,
    ) -> Result<Application, RegistryError>;

    /// Settles a pending application. Approval atomically issues the
    /// admission ticket alongside the status change.
    async fn review(
        &self,
        application_id: &str,
        decision: ReviewDecision,
    ) -> Result<ReviewOutcome, RegistryError>;

    async fn tickets_for_event(
        &self,
        event_id: &str,
        holder: &Address,
    ) -> Result<Vec<Ticket>, RegistryError>;

    async fn tickets_for_holder(&self, holder: &Address) -> Result<Vec<Ticket>, RegistryError>;

    async fn application_for(
        &self,
        event_id: &str,
        applicant: &Address,
    ) -> Result<Option<Application>, RegistryError>;

    async fn applications_for_event(
        &self,
        event_id: &str,
    ) -> Result<Vec<Application>, RegistryError>;
}

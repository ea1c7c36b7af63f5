// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ethers::core::utils::keccak256;
use parking_lot::RwLock;
use tracing::info;

use greenroom_core::types::{Address, Application, ApplicationStatus, Ticket, TicketType};

use crate::error::RegistryError;
use crate::store::{RegistrationStore, ReviewDecision, ReviewOutcome};

/// Ticket parameters used when an approval issues the ticket itself.
const APPROVAL_TICKET_PRICE: &str = "0";
const APPROVAL_TICKET_CURRENCY: &str = "ETH";

#[derive(Debug, Default)]
struct Records {
    tickets: Vec<Ticket>,
    applications: Vec<Application>,
}

#[derive(Debug, Default)]
struct RegistryState {
    // One lock over both collections, so an approval lands the status
    // change and its ticket as a single visible step.
    records: RwLock<Records>,
    sequence: AtomicU64,
}

/// Registration store holding its records in process memory.
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    state: Arc<RegistryState>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates a registry from previously dumped records.
    pub fn with_records(tickets: Vec<Ticket>, applications: Vec<Application>) -> Self {
        let registry = Self::default();
        *registry.state.records.write() = Records {
            tickets,
            applications,
        };
        registry
    }

    /// Every ticket on record, in issuance order.
    pub fn tickets(&self) -> Vec<Ticket> {
        self.state.records.read().tickets.clone()
    }

    /// Every application on record, in submission order.
    pub fn applications(&self) -> Vec<Application> {
        self.state.records.read().applications.clone()
    }

    fn next_id(&self, prefix: &str) -> String {
        let sequence = self.state.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{}-{sequence}", Utc::now().timestamp_millis())
    }

    fn new_ticket(
        &self,
        event_id: &str,
        holder: &Address,
        ticket_type: TicketType,
        price: &str,
        currency: &str,
    ) -> Ticket {
        let id = self.next_id("ticket");
        let digest = keccak256(format!("{id}:{holder}").as_bytes());

        Ticket {
            id,
            event_id: event_id.to_string(),
            holder: holder.clone(),
            ticket_type,
            price: price.to_string(),
            currency: currency.to_string(),
            transaction_hash: format!("0x{}", hex::encode(digest)),
            issued_at: Utc::now(),
            used_at: None,
            transferred_at: None,
            transferred_to: None,
            token_id: None,
        }
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistry {
    async fn register(
        &self,
        event_id: &str,
        holder: &Address,
        ticket_type: TicketType,
        price: &str,
        currency: &str,
    ) -> Result<Ticket, RegistryError> {
        let ticket = self.new_ticket(event_id, holder, ticket_type, price, currency);
        self.state.records.write().tickets.push(ticket.clone());

        info!(
            "Ticket {} issued for event {event_id} to {}",
            ticket.id,
            holder.short()
        );
        Ok(ticket)
    }

    async fn apply(
        &self,
        event_id: &str,
        applicant: &Address,
        responses: BTreeMap<String, String>,
    ) -> Result<Application, RegistryError> {
        let mut records = self.state.records.write();

        let duplicate = records
            .applications
            .iter()
            .any(|application| {
                application.event_id == event_id && application.applicant == *applicant
            });
        if duplicate {
            return Err(RegistryError::AlreadyApplied {
                event_id: event_id.to_string(),
                applicant: applicant.clone(),
            });
        }

        let application = Application {
            id: self.next_id("app"),
            event_id: event_id.to_string(),
            applicant: applicant.clone(),
            status: ApplicationStatus::Pending,
            responses,
            submitted_at: Utc::now(),
            reviewed_at: None,
        };
        records.applications.push(application.clone());

        info!(
            "Application {} submitted for event {event_id} by {}",
            application.id,
            applicant.short()
        );
        Ok(application)
    }

    async fn review(
        &self,
        application_id: &str,
        decision: ReviewDecision,
    ) -> Result<ReviewOutcome, RegistryError> {
        let mut records = self.state.records.write();

        let application = records
            .applications
            .iter_mut()
            .find(|application| application.id == application_id)
            .ok_or_else(|| RegistryError::ApplicationNotFound(application_id.to_string()))?;
        if !application.is_pending() {
            return Err(RegistryError::AlreadyReviewed(application_id.to_string()));
        }

        application.status = match decision {
            ReviewDecision::Approve => ApplicationStatus::Approved,
            ReviewDecision::Reject => ApplicationStatus::Rejected,
        };
        application.reviewed_at = Some(Utc::now());
        let application = application.clone();

        let ticket = match decision {
            ReviewDecision::Approve => {
                let ticket = self.new_ticket(
                    &application.event_id,
                    &application.applicant,
                    TicketType::Standard,
                    APPROVAL_TICKET_PRICE,
                    APPROVAL_TICKET_CURRENCY,
                );
                records.tickets.push(ticket.clone());
                Some(ticket)
            }
            ReviewDecision::Reject => None,
        };
        drop(records);

        match &ticket {
            Some(ticket) => info!(
                "Application {application_id} approved; ticket {} issued",
                ticket.id
            ),
            None => info!("Application {application_id} rejected"),
        }
        Ok(ReviewOutcome {
            application,
            ticket,
        })
    }

    async fn tickets_for_event(
        &self,
        event_id: &str,
        holder: &Address,
    ) -> Result<Vec<Ticket>, RegistryError> {
        let records = self.state.records.read();
        Ok(records
            .tickets
            .iter()
            .filter(|ticket| ticket.event_id == event_id && ticket.holder == *holder)
            .cloned()
            .collect())
    }

    async fn tickets_for_holder(&self, holder: &Address) -> Result<Vec<Ticket>, RegistryError> {
        let records = self.state.records.read();
        Ok(records
            .tickets
            .iter()
            .filter(|ticket| ticket.holder == *holder)
            .cloned()
            .collect())
    }

    async fn application_for(
        &self,
        event_id: &str,
        applicant: &Address,
    ) -> Result<Option<Application>, RegistryError> {
        let records = self.state.records.read();
        Ok(records
            .applications
            .iter()
            .find(|application| {
                application.event_id == event_id && application.applicant == *applicant
            })
            .cloned())
    }

    async fn applications_for_event(
        &self,
        event_id: &str,
    ) -> Result<Vec<Application>, RegistryError> {
        let records = self.state.records.read();
        Ok(records
            .applications
            .iter()
            .filter(|application| application.event_id == event_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLDER: &str = "0xAbC4567890123456789012345678901234567890";

    #[tokio::test]
    async fn registration_issues_a_complete_ticket() {
        let registry = InMemoryRegistry::new();
        let holder = Address::new(HOLDER);

        let ticket = registry
            .register("4", &holder, TicketType::Standard, "0.05", "ETH")
            .await
            .unwrap();

        assert_eq!(ticket.event_id, "4");
        assert_eq!(ticket.holder, holder);
        assert_eq!(ticket.ticket_type, TicketType::Standard);
        assert_eq!(ticket.price, "0.05");
        assert_eq!(ticket.currency, "ETH");
        assert!(ticket.id.starts_with("ticket-"));
        assert!(ticket.transaction_hash.starts_with("0x"));
        assert_eq!(ticket.transaction_hash.len(), 66);
    }

    #[tokio::test]
    async fn repeated_registrations_get_distinct_ids() {
        let registry = InMemoryRegistry::new();
        let holder = Address::new(HOLDER);

        let first = registry
            .register("4", &holder, TicketType::Standard, "0.05", "ETH")
            .await
            .unwrap();
        let second = registry
            .register("4", &holder, TicketType::Vip, "0.2", "ETH")
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.transaction_hash, second.transaction_hash);
        assert_eq!(registry.tickets().len(), 2);
    }

    #[tokio::test]
    async fn second_application_for_the_same_event_is_refused() {
        let registry = InMemoryRegistry::new();
        let applicant = Address::new(HOLDER);

        let first = registry
            .apply("1", &applicant, BTreeMap::new())
            .await
            .unwrap();
        assert_eq!(first.status, ApplicationStatus::Pending);

        // A different casing of the same address is still the same applicant.
        let again = Address::new(HOLDER.to_lowercase());
        let err = registry.apply("1", &again, BTreeMap::new()).await.unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyApplied { .. }));

        // Other events are unaffected.
        registry.apply("2", &applicant, BTreeMap::new()).await.unwrap();
    }

    #[tokio::test]
    async fn approval_issues_exactly_one_ticket() {
        let registry = InMemoryRegistry::new();
        let applicant = Address::new(HOLDER);

        let application = registry
            .apply("1", &applicant, BTreeMap::new())
            .await
            .unwrap();
        let outcome = registry
            .review(&application.id, ReviewDecision::Approve)
            .await
            .unwrap();

        assert_eq!(outcome.application.status, ApplicationStatus::Approved);
        assert!(outcome.application.reviewed_at.is_some());

        let ticket = outcome.ticket.unwrap();
        assert_eq!(ticket.event_id, "1");
        assert_eq!(ticket.holder, applicant);
        assert_eq!(ticket.ticket_type, TicketType::Standard);
        assert_eq!(ticket.price, "0");
        assert_eq!(ticket.currency, "ETH");

        let tickets = registry.tickets_for_event("1", &applicant).await.unwrap();
        assert_eq!(tickets, vec![ticket]);
    }

    #[tokio::test]
    async fn rejection_issues_no_ticket() {
        let registry = InMemoryRegistry::new();
        let applicant = Address::new(HOLDER);

        let application = registry
            .apply("1", &applicant, BTreeMap::new())
            .await
            .unwrap();
        let outcome = registry
            .review(&application.id, ReviewDecision::Reject)
            .await
            .unwrap();

        assert_eq!(outcome.application.status, ApplicationStatus::Rejected);
        assert!(outcome.application.reviewed_at.is_some());
        assert_eq!(outcome.ticket, None);
        assert!(registry.tickets_for_holder(&applicant).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reviews_are_final() {
        let registry = InMemoryRegistry::new();
        let applicant = Address::new(HOLDER);

        let application = registry
            .apply("1", &applicant, BTreeMap::new())
            .await
            .unwrap();
        registry
            .review(&application.id, ReviewDecision::Reject)
            .await
            .unwrap();

        let err = registry
            .review(&application.id, ReviewDecision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyReviewed(_)));
    }

    #[tokio::test]
    async fn reviewing_an_unknown_application_fails() {
        let registry = InMemoryRegistry::new();
        let err = registry
            .review("app-0-0", ReviewDecision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::ApplicationNotFound(_)));
    }

    #[tokio::test]
    async fn queries_match_holders_case_insensitively() {
        let registry = InMemoryRegistry::new();
        let holder = Address::new(HOLDER);
        let other = Address::new("0x9999999999999999999999999999999999999999");

        registry
            .register("1", &holder, TicketType::Standard, "0.1", "ETH")
            .await
            .unwrap();
        registry
            .register("2", &holder, TicketType::Vip, "0.2", "ETH")
            .await
            .unwrap();
        registry
            .register("1", &other, TicketType::Standard, "0.1", "ETH")
            .await
            .unwrap();

        let lowercased = Address::new(HOLDER.to_lowercase());
        assert_eq!(
            registry.tickets_for_holder(&lowercased).await.unwrap().len(),
            2
        );
        assert_eq!(
            registry
                .tickets_for_event("1", &lowercased)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn rehydration_restores_earlier_records() {
        let registry = InMemoryRegistry::new();
        let applicant = Address::new(HOLDER);

        registry
            .register("4", &applicant, TicketType::Standard, "0.05", "ETH")
            .await
            .unwrap();
        registry.apply("1", &applicant, BTreeMap::new()).await.unwrap();

        let restored =
            InMemoryRegistry::with_records(registry.tickets(), registry.applications());
        assert_eq!(restored.tickets(), registry.tickets());
        assert_eq!(
            restored
                .application_for("1", &applicant)
                .await
                .unwrap()
                .map(|application| application.status),
            Some(ApplicationStatus::Pending)
        );
    }
}

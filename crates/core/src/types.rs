// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Domain model shared by every Greenroom crate.
//!
//! Events, applications and tickets are plain serializable records. Account
//! addresses are kept as the strings the wallet hands us rather than parsed
//! `H160`s: comparisons are case-insensitive so a checksummed address and its
//! lowercase form always name the same account.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Account address as surfaced by a wallet or supplied by a caller.
///
/// Equality, ordering and hashing are ASCII case-insensitive. Addresses are
/// only parsed into `H160` at the RPC boundary; everywhere else they stay
/// opaque strings so short test fixtures remain valid holders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated `0x1234...5678` form used in logs and summaries.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let rhs = other.0.bytes().map(|b| b.to_ascii_lowercase());
        lhs.cmp(rhs)
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Address {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl FromStr for Address {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Failed to parse one of the domain enums from its string form.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Whether a session belongs to an attendee or an event organizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Individual,
    Organization,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Individual => "individual",
            Role::Organization => "organization",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "individual" => Ok(Role::Individual),
            "organization" => Ok(Role::Organization),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

/// Lifecycle position of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Active,
    Past,
    Canceled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Active => "active",
            EventStatus::Past => "past",
            EventStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upcoming" => Ok(EventStatus::Upcoming),
            "active" => Ok(EventStatus::Active),
            "past" => Ok(EventStatus::Past),
            "canceled" => Ok(EventStatus::Canceled),
            _ => Err(ParseEnumError::new("event status", s)),
        }
    }
}

/// Whether an event currently accepts applications, plus the aggregate
/// review state shown on event pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventApplicationStatus {
    Open,
    Closed,
    Pending,
    Approved,
    Rejected,
}

impl EventApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventApplicationStatus::Open => "open",
            EventApplicationStatus::Closed => "closed",
            EventApplicationStatus::Pending => "pending",
            EventApplicationStatus::Approved => "approved",
            EventApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for EventApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a single registration application.
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket classes an event may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    Standard,
    Vip,
    Sponsor,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Standard => "standard",
            TicketType::Vip => "vip",
            TicketType::Sponsor => "sponsor",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(TicketType::Standard),
            "vip" => Ok(TicketType::Vip),
            "sponsor" => Ok(TicketType::Sponsor),
            _ => Err(ParseEnumError::new("ticket type", s)),
        }
    }
}

/// Account that published an event, with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Organizer {
    pub fn new(address: impl Into<Address>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: Some(name.into()),
        }
    }
}

/// A published event as held by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub location: String,
    pub image_url: String,
    pub organizer: Organizer,
    pub capacity: u32,
    /// Seats already taken; never exceeds `capacity`.
    pub attendees: u32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<NaiveDate>,
    /// Admission price in ether, as a decimal string such as `"0.1"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_currency: Option<String>,
    pub application_required: bool,
    pub application_status: EventApplicationStatus,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRecord {
    /// Seats still available, saturating at zero if oversubscribed.
    pub fn remaining_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.attendees)
    }

    pub fn is_full(&self) -> bool {
        self.attendees >= self.capacity
    }
}

/// A registration application submitted by a prospective attendee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub event_id: String,
    pub applicant: Address,
    pub status: ApplicationStatus,
    /// Free-form answers keyed by the organizer's question prompts.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Application {
    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }
}

/// Proof of admission issued once a registration goes through.
///
/// Immutable once issued, apart from the usage and transfer annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub event_id: String,
    pub holder: Address,
    pub ticket_type: TicketType,
    /// Price paid, mirrored from the event at issuance time.
    pub price: String,
    pub currency: String,
    /// Hash of the transaction that minted the ticket.
    pub transaction_hash: String,
    pub issued_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transferred_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transferred_to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
}

/// Profile data attached to a wallet account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub past_events: Vec<PastEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub joined_date: DateTime<Utc>,
}

/// Entry in a profile's attendance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastEvent {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    /// Capacity in which the user attended, e.g. "Attendee" or "Speaker".
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn record(id: &str, capacity: u32, attendees: u32) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: "Test Event".to_string(),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: None,
            location: "Nowhere".to_string(),
            image_url: String::new(),
            organizer: Organizer::new("0x1234567890abcdef1234567890abcdef12345678", "Org"),
            capacity,
            attendees,
            category: "Conference".to_string(),
            tags: vec![],
            registration_deadline: None,
            ticket_price: Some("0.1".to_string()),
            ticket_currency: Some("ETH".to_string()),
            application_required: true,
            application_status: EventApplicationStatus::Open,
            status: EventStatus::Upcoming,
            contract_address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn address_equality_ignores_case() {
        let checksummed = Address::new("0xAbCdEf1234567890aBcDeF1234567890ABCDEF12");
        let lowercase = Address::new("0xabcdef1234567890abcdef1234567890abcdef12");
        assert_eq!(checksummed, lowercase);
        assert_eq!(checksummed.cmp(&lowercase), Ordering::Equal);
    }

    #[test]
    fn address_hashing_ignores_case() {
        let mut balances: HashMap<Address, u64> = HashMap::new();
        balances.insert(Address::new("0xABC"), 7);
        assert_eq!(balances.get(&Address::new("0xabc")), Some(&7));
    }

    #[test]
    fn address_short_form_truncates_long_addresses() {
        let addr = Address::new("0x1234567890abcdef1234567890abcdef12345678");
        assert_eq!(addr.short(), "0x1234...5678");
        assert_eq!(Address::new("0xabc").short(), "0xabc");
    }

    #[test]
    fn address_serde_is_transparent() {
        let addr = Address::new("0xABC");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0xABC\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn statuses_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&EventStatus::Upcoming).unwrap(),
            "\"upcoming\""
        );
        assert_eq!(
            serde_json::to_string(&EventApplicationStatus::Open).unwrap(),
            "\"open\""
        );
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Rejected).unwrap(),
            "\"rejected\""
        );
        assert_eq!(
            serde_json::to_string(&TicketType::Standard).unwrap(),
            "\"standard\""
        );
    }

    #[test]
    fn event_status_parses_back() {
        assert_eq!(
            "Upcoming".parse::<EventStatus>().unwrap(),
            EventStatus::Upcoming
        );
        assert_eq!(
            "canceled".parse::<EventStatus>().unwrap(),
            EventStatus::Canceled
        );
        assert!("finished".parse::<EventStatus>().is_err());
    }

    #[test]
    fn reviewed_statuses_are_terminal() {
        assert!(!ApplicationStatus::Pending.is_terminal());
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
    }

    #[test]
    fn remaining_capacity_saturates() {
        assert_eq!(record("1", 100, 40).remaining_capacity(), 60);
        assert_eq!(record("2", 100, 120).remaining_capacity(), 0);
        assert!(record("3", 100, 100).is_full());
    }
}

// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Directory browsing and registration commands.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use clap::Subcommand;

use greenroom_core::types::{
    Address, EventApplicationStatus, EventRecord, EventStatus, Ticket, TicketType,
};
use greenroom_directory::memory::InMemoryDirectory;
use greenroom_directory::store::EventDirectory;
use greenroom_registry::store::{RegistrationStore, ReviewDecision};

use crate::session;
use crate::state::Stores;

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// List events, optionally filtered
    List {
        /// upcoming, active, past or canceled
        #[arg(long)]
        status: Option<EventStatus>,
        /// Only events published by this address
        #[arg(long, conflicts_with = "status")]
        organizer: Option<String>,
    },
    /// Full record of one event
    Show { id: String },
    /// Case-insensitive search over titles, descriptions and tags
    Search { keyword: String },
}

pub async fn browse(command: EventsCommand) -> Result<()> {
    let directory = InMemoryDirectory::seeded();

    match command {
        EventsCommand::List { status, organizer } => {
            let events = if let Some(status) = status {
                directory.list_by_status(status).await?
            } else if let Some(organizer) = organizer {
                directory
                    .list_by_organizer(&Address::new(organizer))
                    .await?
            } else {
                directory.list_all().await?
            };
            print_events(&events);
        }
        EventsCommand::Show { id } => match directory.event(&id).await? {
            Some(event) => print_event(&event),
            None => bail!("Event {id} not found"),
        },
        EventsCommand::Search { keyword } => print_events(&directory.search(&keyword).await?),
    }
    Ok(())
}

pub async fn register(
    event_id: &str,
    ticket_type: TicketType,
    price: Option<String>,
    currency: Option<String>,
) -> Result<()> {
    let holder = session::active_address().await?;

    let directory = InMemoryDirectory::seeded();
    let event = match directory.event(event_id).await? {
        Some(event) => event,
        None => bail!("Event {event_id} not found"),
    };
    if event.application_required {
        bail!(
            "'{}' screens its attendees; submit an application with `greenroom apply`",
            event.title
        );
    }

    let price = price
        .or_else(|| event.ticket_price.clone())
        .unwrap_or_else(|| "0".to_string());
    let currency = currency
        .or_else(|| event.ticket_currency.clone())
        .unwrap_or_else(|| "ETH".to_string());

    let stores = Stores::open().await?;
    let ticket = stores
        .registry
        .register(event_id, &holder, ticket_type, &price, &currency)
        .await?;
    stores.commit().await?;

    println!("Registered for '{}'", event.title);
    print_ticket(&ticket);
    Ok(())
}

pub async fn apply(event_id: &str, responses: &[String]) -> Result<()> {
    let applicant = session::active_address().await?;

    let directory = InMemoryDirectory::seeded();
    let event = match directory.event(event_id).await? {
        Some(event) => event,
        None => bail!("Event {event_id} not found"),
    };
    if !event.application_required {
        bail!(
            "'{}' takes direct registrations; use `greenroom register`",
            event.title
        );
    }
    if event.application_status != EventApplicationStatus::Open {
        bail!(
            "Applications for '{}' are {}",
            event.title,
            event.application_status
        );
    }

    let responses = parse_responses(responses)?;
    let stores = Stores::open().await?;
    let application = stores.registry.apply(event_id, &applicant, responses).await?;
    stores.commit().await?;

    println!(
        "Application {} submitted ({})",
        application.id, application.status
    );
    Ok(())
}

pub async fn applications(event_id: &str) -> Result<()> {
    let stores = Stores::open().await?;
    let applications = stores.registry.applications_for_event(event_id).await?;

    if applications.is_empty() {
        println!("No applications for event {event_id}");
        return Ok(());
    }
    for application in &applications {
        println!(
            "{}\t{}\t{}\t{}",
            application.id,
            application.applicant.short(),
            application.status,
            application.submitted_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub async fn review(application_id: &str, decision: ReviewDecision) -> Result<()> {
    let stores = Stores::open().await?;
    let outcome = stores.registry.review(application_id, decision).await?;
    stores.commit().await?;

    println!(
        "Application {} is now {}",
        outcome.application.id, outcome.application.status
    );
    if let Some(ticket) = &outcome.ticket {
        print_ticket(ticket);
    }
    Ok(())
}

pub async fn tickets(event: Option<&str>) -> Result<()> {
    let holder = session::active_address().await?;
    let stores = Stores::open().await?;

    let tickets = match event {
        Some(event_id) => stores.registry.tickets_for_event(event_id, &holder).await?,
        None => stores.registry.tickets_for_holder(&holder).await?,
    };

    if tickets.is_empty() {
        println!("No tickets held");
        return Ok(());
    }
    for ticket in &tickets {
        println!(
            "{}\tevent {}\t{}\t{} {}\t{}",
            ticket.id,
            ticket.event_id,
            ticket.ticket_type,
            ticket.price,
            ticket.currency,
            ticket.issued_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

fn parse_responses(raw: &[String]) -> Result<BTreeMap<String, String>> {
    let mut responses = BTreeMap::new();
    for entry in raw {
        match entry.split_once('=') {
            Some((question, answer)) => {
                responses.insert(question.trim().to_string(), answer.trim().to_string());
            }
            None => bail!("Response '{entry}' is not of the form question=answer"),
        }
    }
    Ok(responses)
}

fn print_events(events: &[EventRecord]) {
    if events.is_empty() {
        println!("No events found");
        return;
    }
    for event in events {
        println!(
            "{}\t{}\t{}\t{}/{}\t{}\t{}",
            event.id,
            event.status,
            event.start_date,
            event.attendees,
            event.capacity,
            event.ticket_price.as_deref().unwrap_or("-"),
            event.title
        );
    }
}

fn print_event(event: &EventRecord) {
    println!("id\t\t{}", event.id);
    println!("title\t\t{}", event.title);
    println!("description\t{}", event.description);
    match event.end_date {
        Some(end_date) => println!("dates\t\t{} to {end_date}", event.start_date),
        None => println!("dates\t\t{}", event.start_date),
    }
    println!("location\t{}", event.location);
    match &event.organizer.name {
        Some(name) => println!(
            "organizer\t{name} ({})",
            event.organizer.address.short()
        ),
        None => println!("organizer\t{}", event.organizer.address),
    }
    println!("category\t{}", event.category);
    if !event.tags.is_empty() {
        println!("tags\t\t{}", event.tags.join(", "));
    }
    println!(
        "capacity\t{} ({} attending)",
        event.capacity, event.attendees
    );
    if let Some(deadline) = event.registration_deadline {
        println!("register by\t{deadline}");
    }
    if let (Some(price), Some(currency)) = (&event.ticket_price, &event.ticket_currency) {
        println!("ticket\t\t{price} {currency}");
    }
    if event.application_required {
        println!("application\trequired ({})", event.application_status);
    } else {
        println!("application\tnot required");
    }
    println!("status\t\t{}", event.status);
    if let Some(contract) = &event.contract_address {
        println!("contract\t{contract}");
    }
}

fn print_ticket(ticket: &Ticket) {
    println!("ticket\t\t{}", ticket.id);
    println!("type\t\t{}", ticket.ticket_type);
    println!("price\t\t{} {}", ticket.price, ticket.currency);
    println!("transaction\t{}", ticket.transaction_hash);
}

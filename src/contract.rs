// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Commands that talk to the ticketing contract.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use greenroom_chain::client::ContractClient;
use greenroom_core::config::Config;
use greenroom_core::types::Address;

async fn client(config_path: &PathBuf) -> Result<ContractClient> {
    let config = Config::load(config_path).await?;
    Ok(ContractClient::new(&config).await?)
}

pub async fn create_event(
    config_path: &PathBuf,
    name: &str,
    price: &str,
    total_tickets: u32,
    date: NaiveDate,
) -> Result<()> {
    let client = client(config_path).await?;
    let date = date.and_time(NaiveTime::MIN).and_utc();

    let receipt = client.create_event(name, price, total_tickets, date).await?;

    println!("Event '{name}' created");
    println!("transaction\t{:?}", receipt.transaction_hash);
    if let Some(block) = receipt.block_number {
        println!("block\t\t{block}");
    }
    Ok(())
}

pub async fn purchase(config_path: &PathBuf, event_id: u64, price: &str) -> Result<()> {
    let client = client(config_path).await?;

    let receipt = client.purchase_ticket(event_id, price).await?;

    println!("Ticket for event {event_id} purchased");
    println!("transaction\t{:?}", receipt.transaction_hash);

    match client.get_event(event_id).await {
        Ok(details) => println!("sold\t\t{}/{}", details.tickets_sold, details.total_tickets),
        Err(err) => debug!("Could not read back event {event_id}: {err}"),
    }
    Ok(())
}

pub async fn verify(config_path: &PathBuf, holder: &str, event_id: u64) -> Result<()> {
    let client = client(config_path).await?;
    let holder = Address::new(holder);

    if client.verify_ticket(&holder, event_id).await? {
        println!("{} holds a ticket for event {event_id}", holder.short());
    } else {
        println!("{} holds no ticket for event {event_id}", holder.short());
    }
    Ok(())
}

// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Greenroom command line client.
//!
//! The client talks to three surfaces: the wallet session (connect,
//! disconnect, network checks), the event directory with its registration
//! registry, and the on-chain ticketing contract. Configuration, the
//! persisted session and the registry records live under the `greenroom`
//! XDG prefix.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ethers::types::H160;
use tokio::task::spawn_blocking;
use tracing::subscriber::set_global_default;
use tracing_subscriber::filter::EnvFilter;

use greenroom_core::config::Config;
use greenroom_core::types::{Role, TicketType};
use greenroom_registry::store::ReviewDecision;

mod contract;
mod events;
mod profile;
mod session;
mod state;

#[derive(Debug, Parser)]
#[command(author, version, about = "Client for the Greenroom event platform", long_about = None)]
struct Cli {
    /// Use this config file instead of the default location.
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Logging level (off, error, warn, info, debug, trace)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(
        long_about = "Set the node RPC endpoint, and optionally the signing key and the \
                      ticketing contract address. A fresh signing key is generated when none \
                      is supplied or stored."
    )]
    Configure {
        #[arg(long)]
        endpoint: String,
        #[arg(long, value_name = "SECRET_KEY")]
        secret_key: Option<String>,
        #[arg(long, value_name = "ADDRESS")]
        contract: Option<H160>,
    },
    /// Summarize the configured account, session, network and contract
    Status,
    /// Connect the configured wallet and persist the session
    Connect {
        /// individual or organization
        #[arg(long)]
        role: Role,
    },
    /// Drop the active session
    Disconnect,
    /// Ask the wallet to move to another chain
    SwitchNetwork {
        /// Chain id, `0x…` hex or decimal
        chain_id: String,
    },
    /// Browse the event directory
    #[command(subcommand)]
    Events(events::EventsCommand),
    /// Take a ticket for an event that needs no application
    Register {
        event_id: String,
        /// standard, vip or sponsor
        #[arg(long, default_value = "standard")]
        ticket_type: TicketType,
        /// Defaults to the event's listed price
        #[arg(long)]
        price: Option<String>,
        /// Defaults to the event's listed currency
        #[arg(long)]
        currency: Option<String>,
    },
    /// Apply for an event that screens its attendees
    Apply {
        event_id: String,
        /// Answer to an application question, repeatable
        #[arg(long = "response", value_name = "QUESTION=ANSWER")]
        responses: Vec<String>,
    },
    /// List the applications submitted for an event
    Applications { event_id: String },
    /// Approve or reject a pending application
    Review {
        application_id: String,
        /// approve or reject
        decision: ReviewDecision,
    },
    /// List tickets held by the session account
    Tickets {
        /// Only tickets for this event
        #[arg(long)]
        event: Option<String>,
    },
    /// Publish an event on the ticketing contract
    CreateEvent {
        #[arg(long)]
        name: String,
        /// Ticket price in ether
        #[arg(long)]
        price: String,
        #[arg(long)]
        total_tickets: u32,
        /// Event day (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Buy a ticket on chain
    Purchase {
        event_id: u64,
        /// Price in ether, attached as the transaction value
        #[arg(long)]
        price: String,
    },
    /// Check on chain whether an address holds a ticket
    Verify { holder: String, event_id: u64 },
    /// Inspect or edit the profile attached to the session account
    #[command(subcommand)]
    Profile(profile::ProfileCommand),
}

fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    set_global_default(subscriber).expect("Failed to set subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = spawn_blocking(Cli::parse).await?;
    init_tracing(&cli.log_level);

    let config_path = match cli.config_file {
        Some(path) => path,
        None => Config::config_path().await?,
    };

    match cli.command {
        Commands::Configure {
            endpoint,
            secret_key,
            contract,
        } => configure(&config_path, endpoint, secret_key, contract).await?,
        Commands::Status => session::status(&config_path).await?,
        Commands::Connect { role } => session::connect(&config_path, role).await?,
        Commands::Disconnect => session::disconnect().await?,
        Commands::SwitchNetwork { chain_id } => {
            session::switch_network(&config_path, &chain_id).await?
        }
        Commands::Events(command) => events::browse(command).await?,
        Commands::Register {
            event_id,
            ticket_type,
            price,
            currency,
        } => events::register(&event_id, ticket_type, price, currency).await?,
        Commands::Apply {
            event_id,
            responses,
        } => events::apply(&event_id, &responses).await?,
        Commands::Applications { event_id } => events::applications(&event_id).await?,
        Commands::Review {
            application_id,
            decision,
        } => events::review(&application_id, decision).await?,
        Commands::Tickets { event } => events::tickets(event.as_deref()).await?,
        Commands::CreateEvent {
            name,
            price,
            total_tickets,
            date,
        } => contract::create_event(&config_path, &name, &price, total_tickets, date).await?,
        Commands::Purchase { event_id, price } => {
            contract::purchase(&config_path, event_id, &price).await?
        }
        Commands::Verify { holder, event_id } => {
            contract::verify(&config_path, &holder, event_id).await?
        }
        Commands::Profile(command) => profile::run(command).await?,
    };

    Ok(())
}

async fn configure(
    config_path: &PathBuf,
    endpoint: String,
    secret_key: Option<String>,
    contract: Option<H160>,
) -> Result<()> {
    Config::configure(config_path, endpoint, secret_key).await?;

    if let Some(address) = contract {
        let mut config = Config::load(config_path).await?;
        config.contract = Some(address);
        config.save(config_path).await?;
    }

    let config = Config::load(config_path).await?;
    println!("endpoint\t{}", config.endpoint());
    println!("account\t\t{:#x}", config.address());
    match config.contract {
        Some(address) => println!("contract\t{address:#x}"),
        None => println!("contract\tunbound"),
    }
    Ok(())
}

// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Wallet session commands: status, connect, disconnect, network switch.

use std::path::PathBuf;

use anyhow::{bail, Result};

use greenroom_core::config::Config;
use greenroom_core::network::{chain_id_hex, parse_chain_id, NetworkInfo};
use greenroom_core::types::{Address, Role};
use greenroom_wallet::node::NodeProvider;
use greenroom_wallet::provider::WalletProvider;
use greenroom_wallet::session::{Session, SessionManager};
use greenroom_wallet::store::SessionStore;

async fn session_store() -> Result<SessionStore> {
    Ok(SessionStore::new(SessionStore::default_path().await?))
}

async fn manager(config: &Config) -> Result<SessionManager<NodeProvider>> {
    let provider = NodeProvider::connect(config.endpoint(), config.wallet()).await?;
    Ok(SessionManager::new(provider, session_store().await?))
}

/// Address of the persisted session, for commands acting on its behalf.
pub async fn active_address() -> Result<Address> {
    match session_store().await?.load().await? {
        Some(session) => Ok(session.address),
        None => bail!("No wallet session. Connect first with `greenroom connect --role <role>`."),
    }
}

pub async fn status(config_path: &PathBuf) -> Result<()> {
    let config = Config::load(config_path).await?;
    let manager = manager(&config).await?;

    let chain_id = manager.provider()?.chain_id().await?;
    let network = NetworkInfo::from_chain_id(chain_id);

    println!("endpoint\t{}", config.endpoint());
    println!("chain_id\t{}\t({})", chain_id_hex(chain_id), network.name);
    println!("account\t\t{:#x}", config.address());
    match config.contract {
        Some(address) => println!("contract\t{address:#x}"),
        None => println!("contract\tunbound"),
    }

    match manager.restore().await {
        Some(session) => print_session(&session),
        None => println!("session\t\tnot connected"),
    }
    Ok(())
}

pub async fn connect(config_path: &PathBuf, role: Role) -> Result<()> {
    let config = Config::load(config_path).await?;
    let manager = manager(&config).await?;

    let session = manager.connect(role).await?;
    print_session(&session);
    Ok(())
}

pub async fn disconnect() -> Result<()> {
    let manager = SessionManager::<NodeProvider>::without_provider(session_store().await?);
    manager.disconnect().await;
    println!("Disconnected");
    Ok(())
}

pub async fn switch_network(config_path: &PathBuf, chain_id: &str) -> Result<()> {
    let chain_id = parse_chain_id(chain_id)?;
    let config = Config::load(config_path).await?;
    let manager = manager(&config).await?;

    if manager.switch_network(chain_id).await? {
        println!("Switched to {}", NetworkInfo::from_chain_id(chain_id).name);
    } else {
        println!(
            "The wallet does not know chain {}; switch it by hand.",
            chain_id_hex(chain_id)
        );
    }
    Ok(())
}

fn print_session(session: &Session) {
    match (&session.address, session.role) {
        (Some(address), Some(role)) => println!("session\t\tconnected as {role}: {address}"),
        (Some(address), None) => println!("session\t\tconnected: {address}"),
        _ => println!("session\t\tnot connected"),
    }
    if let Some(network) = &session.network {
        let support = if network.supported {
            "supported"
        } else {
            "unsupported"
        };
        println!(
            "network\t\t{} ({}, {support})",
            network.name,
            chain_id_hex(network.chain_id)
        );
    }
    if let Some(balance) = &session.balance {
        println!("balance\t\t{balance}\tETH");
    }
}

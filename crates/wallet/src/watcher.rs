// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Keeps the session consistent with wallet notifications.
//!
//! The watcher owns the provider event subscription for the lifetime of the
//! application: account changes update or clear the session, chain changes
//! force a full session refresh. Teardown is deterministic, [`SessionWatcher::stop`]
//! joins the background task.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::WalletError;
use crate::provider::{ProviderEvent, WalletProvider};
use crate::session::SessionManager;

pub struct SessionWatcher {
    handle: JoinHandle<()>,
    tx_shutdown: broadcast::Sender<()>,
}

impl SessionWatcher {
    /// Subscribes to the manager's provider and starts reacting to its
    /// events. Fails when the manager has no provider.
    pub fn spawn<P: WalletProvider>(manager: SessionManager<P>) -> Result<Self, WalletError> {
        let events = manager.provider()?.subscribe();
        let (tx_shutdown, rx_shutdown) = broadcast::channel(1);

        let handle = tokio::spawn(run(manager, events, rx_shutdown));

        Ok(Self {
            handle,
            tx_shutdown,
        })
    }

    /// Stops the watcher and waits for its task to finish.
    pub async fn stop(self) {
        let _ = self.tx_shutdown.send(());
        let _ = self.handle.await;
    }
}

async fn run<P: WalletProvider>(
    manager: SessionManager<P>,
    mut events: broadcast::Receiver<ProviderEvent>,
    mut rx_shutdown: broadcast::Receiver<()>,
) {
    info!("Session watcher started");
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(ProviderEvent::AccountsChanged(accounts)) => {
                    manager.handle_accounts_changed(accounts).await;
                }
                Ok(ProviderEvent::ChainChanged(chain_id)) => {
                    manager.handle_chain_changed(chain_id).await;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Session watcher lagged behind {skipped} wallet events");
                }
                Err(RecvError::Closed) => {
                    info!("Wallet event stream closed, session watcher terminated");
                    return;
                }
            },
            _ = rx_shutdown.recv() => {
                info!("Session watcher terminated");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ethers::types::U256;
    use tempfile::tempdir;

    use greenroom_core::types::{Address, Role};

    use crate::simulated::SimulatedProvider;
    use crate::store::SessionStore;

    const ACCOUNT: &str = "0x1234567890abcdef1234567890abcdef12345678";
    const OTHER: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

    async fn connected_setup() -> (
        SimulatedProvider,
        SessionManager<SimulatedProvider>,
        SessionWatcher,
        std::path::PathBuf,
        tempfile::TempDir,
    ) {
        let provider = SimulatedProvider::new(0x1).with_account(ACCOUNT, U256::exp10(18));
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let manager = SessionManager::new(provider.clone(), SessionStore::new(path.clone()));
        manager.connect(Role::Individual).await.unwrap();
        let watcher = SessionWatcher::spawn(manager.clone()).unwrap();
        (provider, manager, watcher, path, dir)
    }

    #[tokio::test]
    async fn account_change_updates_address_and_balance() {
        let (provider, manager, watcher, _path, _dir) = connected_setup().await;
        provider.set_balance(OTHER, U256::exp10(17));

        let mut rx = manager.subscribe();
        provider.emit_accounts_changed(vec![Address::new(OTHER)]);
        rx.changed().await.unwrap();

        let session = rx.borrow_and_update().clone();
        assert_eq!(session.address, Some(Address::new(OTHER)));
        assert_eq!(session.balance.as_deref(), Some("0.1000"));
        // The role chosen at connection time survives the account switch.
        assert_eq!(session.role, Some(Role::Individual));

        watcher.stop().await;
    }

    #[tokio::test]
    async fn empty_account_list_fully_disconnects() {
        let (provider, manager, watcher, path, _dir) = connected_setup().await;

        let mut rx = manager.subscribe();
        provider.emit_accounts_changed(vec![]);
        rx.changed().await.unwrap();

        let session = rx.borrow_and_update().clone();
        assert!(!session.is_connected());
        assert_eq!(session.role, None);
        assert_eq!(session.balance, None);
        assert!(!path.exists());

        watcher.stop().await;
    }

    #[tokio::test]
    async fn chain_change_refreshes_network_and_balance() {
        let (provider, manager, watcher, _path, _dir) = connected_setup().await;

        let mut rx = manager.subscribe();
        provider.emit_chain_changed(0x13881);
        rx.changed().await.unwrap();

        let network = rx.borrow_and_update().network.clone().unwrap();
        assert_eq!(network.name, "Polygon Mumbai");
        assert!(network.supported);

        watcher.stop().await;
    }

    #[tokio::test]
    async fn stop_joins_the_watcher_task() {
        let (_provider, _manager, watcher, _path, _dir) = connected_setup().await;
        watcher.stop().await;
    }
}

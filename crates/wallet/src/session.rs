// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Session lifecycle: connect, disconnect, restore, network checks.
//!
//! The manager owns the single source of truth for the session and publishes
//! every change through a watch channel. Cheap to clone; clones share state.

use std::sync::Arc;

use ethers::types::U256;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use greenroom_core::network::{self, chain_id_hex, NetworkInfo};
use greenroom_core::types::{Address, Role};

use crate::error::WalletError;
use crate::provider::WalletProvider;
use crate::store::{PersistedSession, SessionStore};

/// Snapshot of the wallet session shared with observers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub address: Option<Address>,
    pub role: Option<Role>,
    pub network: Option<NetworkInfo>,
    /// Ether balance rendered with four fractional digits.
    pub balance: Option<String>,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

struct SessionInner<P> {
    provider: Option<P>,
    store: SessionStore,
    tx: watch::Sender<Session>,
}

pub struct SessionManager<P> {
    inner: Arc<SessionInner<P>>,
}

impl<P> Clone for SessionManager<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P: WalletProvider> SessionManager<P> {
    pub fn new(provider: P, store: SessionStore) -> Self {
        Self::build(Some(provider), store)
    }

    /// A manager with no wallet behind it: every provider-backed operation
    /// fails with [`WalletError::WalletUnavailable`].
    pub fn without_provider(store: SessionStore) -> Self {
        Self::build(None, store)
    }

    fn build(provider: Option<P>, store: SessionStore) -> Self {
        let (tx, _rx) = watch::channel(Session::default());
        Self {
            inner: Arc::new(SessionInner {
                provider,
                store,
                tx,
            }),
        }
    }

    pub fn provider(&self) -> Result<&P, WalletError> {
        self.inner
            .provider
            .as_ref()
            .ok_or(WalletError::WalletUnavailable)
    }

    /// The current session snapshot.
    pub fn current(&self) -> Session {
        self.inner.tx.borrow().clone()
    }

    /// Observes every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.tx.subscribe()
    }

    /// Connects the wallet and records the chosen role.
    ///
    /// Fails with [`WalletError::WalletUnavailable`] when no provider is
    /// present and [`WalletError::WalletRejected`] when the wallet declines.
    /// Network and balance lookups are best-effort: their failure leaves the
    /// corresponding fields unset but does not fail the connection.
    pub async fn connect(&self, role: Role) -> Result<Session, WalletError> {
        let provider = self.provider()?;
        let accounts = provider.request_accounts().await?;
        let address = accounts
            .into_iter()
            .next()
            .ok_or(WalletError::WalletRejected)?;

        self.inner
            .store
            .save(&PersistedSession {
                address: address.clone(),
                role: Some(role),
            })
            .await?;

        let network = self.query_network().await;
        let balance = self.query_balance(&address).await;

        let session = Session {
            address: Some(address.clone()),
            role: Some(role),
            network,
            balance,
        };
        self.inner.tx.send_replace(session.clone());

        info!("Wallet connected as {role}: {}", address.short());
        Ok(session)
    }

    /// Clears the session, in memory and on disk. Always succeeds.
    pub async fn disconnect(&self) {
        if let Err(err) = self.inner.store.clear().await {
            warn!("Could not remove persisted session: {err}");
        }
        self.inner.tx.send_replace(Session::default());
        info!("Wallet disconnected");
    }

    /// Rehydrates a previously persisted session, refreshing network and
    /// balance from the provider. `None` when nothing was persisted.
    pub async fn restore(&self) -> Option<Session> {
        let persisted = match self.inner.store.load().await {
            Ok(Some(persisted)) => persisted,
            Ok(None) => return None,
            Err(err) => {
                warn!("Could not restore persisted session: {err}");
                return None;
            }
        };

        let network = self.query_network().await;
        let balance = self.query_balance(&persisted.address).await;

        let session = Session {
            address: Some(persisted.address.clone()),
            role: persisted.role,
            network,
            balance,
        };
        self.inner.tx.send_replace(session.clone());

        info!("Restored session for {}", persisted.address.short());
        Some(session)
    }

    /// Whether the active chain is in the supported network list. Also
    /// refreshes the session's network snapshot.
    pub async fn check_network(&self) -> Result<bool, WalletError> {
        let chain_id = self.provider()?.chain_id().await?;
        let network = NetworkInfo::from_chain_id(chain_id);
        let supported = network.supported;
        self.inner
            .tx
            .send_modify(|session| session.network = Some(network));
        Ok(supported)
    }

    /// Asks the wallet to move to `chain_id`.
    ///
    /// Targets outside the allow-list fail with
    /// [`WalletError::UnsupportedNetwork`]. A wallet that does not know the
    /// chain yields `Ok(false)`; the chain is never registered on its behalf.
    pub async fn switch_network(&self, chain_id: u64) -> Result<bool, WalletError> {
        if !network::is_supported(chain_id) {
            return Err(WalletError::UnsupportedNetwork(chain_id));
        }

        match self.provider()?.switch_chain(chain_id).await {
            Ok(()) => Ok(true),
            Err(WalletError::UnrecognizedChain(id)) => {
                warn!(
                    "Network {} is not available in the wallet",
                    chain_id_hex(id)
                );
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    pub(crate) async fn handle_accounts_changed(&self, accounts: Vec<Address>) {
        match accounts.into_iter().next() {
            Some(address) => {
                let role = self.current().role;
                let persisted = PersistedSession {
                    address: address.clone(),
                    role,
                };
                if let Err(err) = self.inner.store.save(&persisted).await {
                    warn!("Could not persist changed account: {err}");
                }

                let balance = self.query_balance(&address).await;
                self.inner.tx.send_modify(|session| {
                    session.address = Some(address.clone());
                    session.balance = balance.clone();
                });
                info!("Wallet account changed: {}", address.short());
            }
            None => self.disconnect().await,
        }
    }

    pub(crate) async fn handle_chain_changed(&self, chain_id: u64) {
        let network = NetworkInfo::from_chain_id(chain_id);
        info!("Network changed to {}, refreshing session", network.name);

        let address = self.current().address;
        let balance = match &address {
            Some(address) => self.query_balance(address).await,
            None => None,
        };
        self.inner.tx.send_modify(|session| {
            session.network = Some(network.clone());
            session.balance = balance.clone();
        });
    }

    async fn query_network(&self) -> Option<NetworkInfo> {
        let provider = self.inner.provider.as_ref()?;
        match provider.chain_id().await {
            Ok(chain_id) => Some(NetworkInfo::from_chain_id(chain_id)),
            Err(err) => {
                warn!("Could not read network info: {err}");
                None
            }
        }
    }

    async fn query_balance(&self, address: &Address) -> Option<String> {
        let provider = self.inner.provider.as_ref()?;
        match provider.balance(address).await {
            Ok(wei) => Some(format_balance(wei)),
            Err(err) => {
                warn!("Could not read balance of {}: {err}", address.short());
                None
            }
        }
    }
}

/// Renders a wei amount as ether with exactly four fractional digits,
/// rounding half up at the fifth digit.
pub fn format_balance(wei: U256) -> String {
    let half_step = U256::exp10(13) * 5u64;
    let scaled = wei.saturating_add(half_step) / U256::exp10(14);
    let whole = scaled / 10_000u64;
    let frac = (scaled % 10_000u64).as_u64();
    format!("{whole}.{frac:04}")
}

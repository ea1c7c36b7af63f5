// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Wallet provider backed by a JSON-RPC node and a locally held key.
//!
//! The configured signer is the wallet's single account, so
//! `request_accounts` never prompts. A remote node's chain is fixed, so
//! chain switch requests always surface as
//! [`WalletError::UnrecognizedChain`]. Chain changes are detected by
//! polling the node's chain id from a background task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ethers::prelude::*;
use ethers::providers::{Http, Middleware, Provider};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use greenroom_core::network::chain_id_hex;
use greenroom_core::types::Address;

use crate::error::WalletError;
use crate::provider::{ProviderEvent, WalletProvider};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const CHAIN_WATCH_INTERVAL: Duration = Duration::from_secs(2);
const EVENT_CAPACITY: usize = 16;

pub struct NodeProvider {
    client: Arc<SignerMiddleware<Provider<Http>, LocalWallet>>,
    account: Address,
    last_chain: Arc<AtomicU64>,
    tx_events: broadcast::Sender<ProviderEvent>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl NodeProvider {
    /// Connects to the node at `endpoint` with `wallet` as the signer.
    ///
    /// An unreachable node is reported as [`WalletError::WalletUnavailable`].
    pub async fn connect(endpoint: &str, wallet: LocalWallet) -> Result<Self, WalletError> {
        let provider = Provider::<Http>::try_from(endpoint)
            .map_err(WalletError::provider)?
            .interval(DEFAULT_POLL_INTERVAL);

        let chain_id = match provider.get_chainid().await {
            Ok(chain_id) => chain_id.as_u64(),
            Err(err) => {
                warn!("Node at {endpoint} is unreachable: {err}");
                return Err(WalletError::WalletUnavailable);
            }
        };

        let wallet = wallet.with_chain_id(chain_id);
        let account = Address::new(format!("{:#x}", wallet.address()));
        let client = provider.with_signer(wallet);
        let (tx_events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            client: Arc::new(client),
            account,
            last_chain: Arc::new(AtomicU64::new(chain_id)),
            tx_events,
            poll_task: Mutex::new(None),
        })
    }

    pub fn account(&self) -> &Address {
        &self.account
    }

    /// Starts polling the node for chain changes. Idempotent.
    pub fn start_chain_watch(&self, interval: Duration) {
        let mut task = self.poll_task.lock();
        if task.is_some() {
            return;
        }

        let client = self.client.clone();
        let tx_events = self.tx_events.clone();
        let last_chain = self.last_chain.clone();

        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match client.get_chainid().await {
                    Ok(chain_id) => {
                        let chain_id = chain_id.as_u64();
                        let previous = last_chain.swap(chain_id, Ordering::SeqCst);
                        if previous != chain_id {
                            info!(
                                "Node moved from chain {} to {}",
                                chain_id_hex(previous),
                                chain_id_hex(chain_id)
                            );
                            let _ = tx_events.send(ProviderEvent::ChainChanged(chain_id));
                        }
                    }
                    Err(err) => debug!("Chain id poll failed: {err}"),
                }
            }
        }));
    }

    pub fn stop_chain_watch(&self) {
        if let Some(task) = self.poll_task.lock().take() {
            task.abort();
        }
    }
}

impl Drop for NodeProvider {
    fn drop(&mut self) {
        self.stop_chain_watch();
    }
}

#[async_trait]
impl WalletProvider for NodeProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        // A local signer has nothing to prompt for.
        Ok(vec![self.account.clone()])
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let chain_id = self
            .client
            .get_chainid()
            .await
            .map_err(WalletError::provider)?;
        Ok(chain_id.as_u64())
    }

    async fn balance(&self, address: &Address) -> Result<U256, WalletError> {
        let address: H160 = address.as_str().parse().map_err(WalletError::provider)?;
        self.client
            .get_balance(address, None)
            .await
            .map_err(WalletError::provider)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        // The node's chain is whatever it was started on.
        debug!("Refusing to switch node to chain {}", chain_id_hex(chain_id));
        Err(WalletError::UnrecognizedChain(chain_id))
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.tx_events.subscribe()
    }
}

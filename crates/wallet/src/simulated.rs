// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Simulated wallet provider for testing purposes.
//!
//! Self-contained: accounts, balances and the active chain are scripted by
//! the test, and failure modes (declined prompts, broken balance lookups)
//! can be injected one call at a time. Clones share state, so a test can
//! keep a handle for scripting while the session manager owns another.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ethers::types::U256;
use parking_lot::RwLock;
use tokio::sync::broadcast;

use greenroom_core::types::Address;

use crate::error::WalletError;
use crate::provider::{ProviderEvent, WalletProvider};

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, thiserror::Error)]
#[error("simulated provider failure")]
struct SimulatedFailure;

#[derive(Debug)]
struct SimulatedState {
    accounts: RwLock<Vec<Address>>,
    balances: RwLock<HashMap<Address, U256>>,
    known_chains: RwLock<HashSet<u64>>,
    chain_id: AtomicU64,
    reject_next: AtomicBool,
    fail_next_balance: AtomicBool,
    tx_events: broadcast::Sender<ProviderEvent>,
}

#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    state: Arc<SimulatedState>,
}

impl SimulatedProvider {
    /// A provider sitting on `chain_id` with no accounts.
    pub fn new(chain_id: u64) -> Self {
        let (tx_events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(SimulatedState {
                accounts: RwLock::new(Vec::new()),
                balances: RwLock::new(HashMap::new()),
                known_chains: RwLock::new(HashSet::from([chain_id])),
                chain_id: AtomicU64::new(chain_id),
                reject_next: AtomicBool::new(false),
                fail_next_balance: AtomicBool::new(false),
                tx_events,
            }),
        }
    }

    /// Adds an account with the given balance.
    pub fn with_account(self, address: impl Into<Address>, balance: U256) -> Self {
        let address = address.into();
        self.state.accounts.write().push(address.clone());
        self.state.balances.write().insert(address, balance);
        self
    }

    pub fn set_balance(&self, address: impl Into<Address>, balance: U256) {
        self.state.balances.write().insert(address.into(), balance);
    }

    /// The next `request_accounts` call is declined.
    pub fn reject_next_request(&self) {
        self.state.reject_next.store(true, Ordering::SeqCst);
    }

    /// The next `balance` call fails with a transport error.
    pub fn fail_next_balance(&self) {
        self.state.fail_next_balance.store(true, Ordering::SeqCst);
    }

    /// Teaches the wallet a chain so `switch_chain` can reach it.
    pub fn add_known_chain(&self, chain_id: u64) {
        self.state.known_chains.write().insert(chain_id);
    }

    /// Replaces the account list and notifies subscribers.
    pub fn emit_accounts_changed(&self, accounts: Vec<Address>) {
        *self.state.accounts.write() = accounts.clone();
        let _ = self
            .state
            .tx_events
            .send(ProviderEvent::AccountsChanged(accounts));
    }

    /// Moves the wallet to `chain_id` and notifies subscribers.
    pub fn emit_chain_changed(&self, chain_id: u64) {
        self.state.chain_id.store(chain_id, Ordering::SeqCst);
        self.state.known_chains.write().insert(chain_id);
        let _ = self
            .state
            .tx_events
            .send(ProviderEvent::ChainChanged(chain_id));
    }
}

#[async_trait]
impl WalletProvider for SimulatedProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if self.state.reject_next.swap(false, Ordering::SeqCst) {
            return Err(WalletError::WalletRejected);
        }
        Ok(self.state.accounts.read().clone())
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        Ok(self.state.chain_id.load(Ordering::SeqCst))
    }

    async fn balance(&self, address: &Address) -> Result<U256, WalletError> {
        if self.state.fail_next_balance.swap(false, Ordering::SeqCst) {
            return Err(WalletError::provider(SimulatedFailure));
        }
        Ok(self
            .state
            .balances
            .read()
            .get(address)
            .copied()
            .unwrap_or_default())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        if !self.state.known_chains.read().contains(&chain_id) {
            return Err(WalletError::UnrecognizedChain(chain_id));
        }
        self.state.chain_id.store(chain_id, Ordering::SeqCst);
        let _ = self
            .state
            .tx_events
            .send(ProviderEvent::ChainChanged(chain_id));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.state.tx_events.subscribe()
    }
}

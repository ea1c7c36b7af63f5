// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Abstraction over the wallet the client talks to.
//!
//! The session manager never assumes a browser extension or any particular
//! transport: everything it needs from a wallet is captured by the
//! [`WalletProvider`] trait. Production code runs against
//! [`crate::node::NodeProvider`]; tests run against
//! [`crate::simulated::SimulatedProvider`].

use async_trait::async_trait;
use ethers::types::U256;
use tokio::sync::broadcast;

use greenroom_core::types::Address;

use crate::error::WalletError;

/// Notification pushed by a wallet provider.
#[derive(Debug, Clone)]
pub enum ProviderEvent {
    /// The wallet's account list changed. An empty list means the wallet
    /// disconnected entirely.
    AccountsChanged(Vec<Address>),
    /// The wallet moved to a different chain.
    ChainChanged(u64),
}

/// A source of accounts, balances and chain information.
#[async_trait]
pub trait WalletProvider: Send + Sync + 'static {
    /// Asks the wallet for its accounts, prompting for access if needed.
    ///
    /// Fails with [`WalletError::WalletRejected`] when the holder declines.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// EIP-155 chain id the wallet is currently on.
    async fn chain_id(&self) -> Result<u64, WalletError>;

    /// Balance of `address` in base units (wei).
    async fn balance(&self, address: &Address) -> Result<U256, WalletError>;

    /// Asks the wallet to move to `chain_id`.
    ///
    /// Fails with [`WalletError::UnrecognizedChain`] when the wallet does not
    /// know the chain; the caller decides whether to surface that as a soft
    /// failure. Providers never register new chains.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError>;

    /// Subscribes to account and chain change notifications.
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}

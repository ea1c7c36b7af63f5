// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Calling out to the `EventRegistration` contract.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ethers::prelude::*;
use ethers::providers::{Http, Middleware, Provider};
use parking_lot::RwLock;
use tracing::info;

use greenroom_core::config::Config;
use greenroom_core::types::Address as AccountAddress;

use crate::bindings::EventRegistration;
use crate::error::ChainError;
use crate::units::{format_eth, from_unix_seconds, parse_eth, to_unix_seconds};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

type NodeClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Decoded response of the contract's `getEvent` view.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub event_id: u64,
    pub name: String,
    /// Ticket price as a decimal ether string.
    pub ticket_price: String,
    pub total_tickets: u32,
    pub tickets_sold: u32,
    pub event_date: DateTime<Utc>,
    pub active: bool,
}

/// Client for the on-chain ticketing contract.
///
/// Every operation fails with [`ChainError::ContractNotBound`] until a
/// contract address is configured.
pub struct ContractClient {
    client: Arc<NodeClient>,
    contract: RwLock<Option<EventRegistration<NodeClient>>>,
}

impl ContractClient {
    /// Connects to the configured node and binds the configured contract
    /// address, if any.
    pub async fn new(config: &Config) -> Result<Self, ChainError> {
        let provider =
            Provider::<Http>::try_from(config.endpoint())?.interval(DEFAULT_POLL_INTERVAL);
        let chain_id = provider.get_chainid().await?;
        let wallet = config.wallet().with_chain_id(chain_id.as_u64());
        Ok(Self::with_signer(provider, wallet, config.contract))
    }

    /// Assembles a client from already resolved parts. No network traffic.
    pub fn with_signer(
        provider: Provider<Http>,
        wallet: LocalWallet,
        contract_address: Option<H160>,
    ) -> Self {
        let client = Arc::new(provider.with_signer(wallet));
        let contract = RwLock::new(
            contract_address.map(|address| EventRegistration::new(address, client.clone())),
        );
        Self { client, contract }
    }

    /// Binds (or rebinds) the contract at `address` to the active signer.
    pub fn set_contract_address(&self, address: H160) {
        let contract = EventRegistration::new(address, self.client.clone());
        *self.contract.write() = Some(contract);
        info!("Ticketing contract bound at {address:#x}");
    }

    pub fn contract_address(&self) -> Option<H160> {
        self.contract.read().as_ref().map(|contract| contract.address())
    }

    pub fn signer_address(&self) -> H160 {
        self.client.signer().address()
    }

    /// Publishes a new event on chain.
    pub async fn create_event(
        &self,
        name: &str,
        ticket_price: &str,
        total_tickets: u32,
        event_date: DateTime<Utc>,
    ) -> Result<TransactionReceipt, ChainError> {
        let contract = self.bound()?;
        let price = parse_eth(ticket_price)?;
        let date = to_unix_seconds(event_date);

        let call = contract.create_event(name.to_string(), price, total_tickets, date);
        let pending = call.send().await.map_err(ChainError::contract)?;
        let receipt = pending.await?.ok_or(ChainError::MissingReceipt)?;

        info!(
            "Event '{name}' created in transaction {:?}",
            receipt.transaction_hash
        );
        Ok(receipt)
    }

    /// Buys a ticket, attaching the price as the call value.
    pub async fn purchase_ticket(
        &self,
        event_id: u64,
        price: &str,
    ) -> Result<TransactionReceipt, ChainError> {
        let contract = self.bound()?;
        let value = parse_eth(price)?;

        let call = contract.purchase_ticket(U256::from(event_id)).value(value);
        let pending = call.send().await.map_err(ChainError::contract)?;
        let receipt = pending.await?.ok_or(ChainError::MissingReceipt)?;

        info!(
            "Ticket for event {event_id} purchased in transaction {:?}",
            receipt.transaction_hash
        );
        Ok(receipt)
    }

    /// Reads an event's on-chain state.
    pub async fn get_event(&self, event_id: u64) -> Result<EventDetails, ChainError> {
        let contract = self.bound()?;
        let (name, price, total_tickets, tickets_sold, date, active) = contract
            .get_event(U256::from(event_id))
            .call()
            .await
            .map_err(ChainError::contract)?;

        Ok(EventDetails {
            event_id,
            name,
            ticket_price: format_eth(price),
            total_tickets,
            tickets_sold,
            event_date: from_unix_seconds(date)?,
            active,
        })
    }

    /// Whether `holder` owns a ticket for the event.
    pub async fn verify_ticket(
        &self,
        holder: &AccountAddress,
        event_id: u64,
    ) -> Result<bool, ChainError> {
        let contract = self.bound()?;
        let holder: H160 = holder
            .as_str()
            .parse()
            .map_err(|_| ChainError::InvalidAddress(holder.to_string()))?;

        contract
            .verify_ticket(holder, U256::from(event_id))
            .call()
            .await
            .map_err(ChainError::contract)
    }

    fn bound(&self) -> Result<EventRegistration<NodeClient>, ChainError> {
        self.contract
            .read()
            .clone()
            .ok_or(ChainError::ContractNotBound)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ethers::core::rand::thread_rng;

    use super::*;

    fn unbound_client() -> ContractClient {
        let provider = Provider::<Http>::try_from("http://localhost:8545").unwrap();
        let wallet = LocalWallet::new(&mut thread_rng()).with_chain_id(1u64);
        ContractClient::with_signer(provider, wallet, None)
    }

    #[tokio::test]
    async fn every_operation_requires_a_bound_contract() {
        let client = unbound_client();
        let date = Utc.with_ymd_and_hms(2024, 8, 15, 0, 0, 0).unwrap();

        assert!(matches!(
            client.create_event("ETH Denver", "0.1", 5000, date).await,
            Err(ChainError::ContractNotBound)
        ));
        assert!(matches!(
            client.purchase_ticket(1, "0.1").await,
            Err(ChainError::ContractNotBound)
        ));
        assert!(matches!(
            client.get_event(1).await,
            Err(ChainError::ContractNotBound)
        ));
        assert!(matches!(
            client
                .verify_ticket(&AccountAddress::new("0x0"), 1)
                .await,
            Err(ChainError::ContractNotBound)
        ));
    }

    #[test]
    fn binding_records_the_contract_address() {
        let client = unbound_client();
        assert_eq!(client.contract_address(), None);

        let address: H160 = "0xabcdef1234567890abcdef1234567890abcdef12"
            .parse()
            .unwrap();
        client.set_contract_address(address);
        assert_eq!(client.contract_address(), Some(address));
    }

    #[tokio::test]
    async fn invalid_amounts_surface_before_any_network_traffic() {
        let client = unbound_client();
        let address: H160 = "0xabcdef1234567890abcdef1234567890abcdef12"
            .parse()
            .unwrap();
        client.set_contract_address(address);

        // The price is parsed before the call is dispatched.
        let err = client.purchase_ticket(1, "not-a-price").await.unwrap_err();
        assert!(matches!(err, ChainError::InvalidAmount { .. }));

        let err = client.purchase_ticket(1, "-0.1").await.unwrap_err();
        assert!(matches!(err, ChainError::NegativeAmount(_)));
    }
}

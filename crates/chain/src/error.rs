// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

use ethers::providers::ProviderError;
use ethers::utils::ConversionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Contract address has not been configured")]
    ContractNotBound,

    #[error("Transaction was mined but no receipt was returned")]
    MissingReceipt,

    #[error("Invalid amount '{value}': {source}")]
    InvalidAmount {
        value: String,
        #[source]
        source: ConversionError,
    },

    #[error("Amount '{0}' must not be negative")]
    NegativeAmount(String),

    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    #[error("Timestamp {0} does not fit a calendar date")]
    InvalidTimestamp(String),

    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Contract call failed: {0}")]
    Contract(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ChainError {
    /// Wraps a failure bubbled from a contract call.
    pub fn contract(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        ChainError::Contract(Box::new(err))
    }
}

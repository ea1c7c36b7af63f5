// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("No wallet provider is available")]
    WalletUnavailable,

    #[error("Wallet request was rejected")]
    WalletRejected,

    #[error("Chain id {0:#x} is not in the supported network list")]
    UnsupportedNetwork(u64),

    #[error("Wallet does not recognize chain id {0:#x}")]
    UnrecognizedChain(u64),

    #[error("Failed to access persisted session: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed persisted session: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Could not resolve session directory: {0}")]
    BaseDirectories(#[from] xdg::BaseDirectoriesError),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    #[error("Wallet provider error: {0}")]
    Provider(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl WalletError {
    /// Wraps a transport-level failure bubbled from the underlying provider.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        WalletError::Provider(Box::new(err))
    }
}

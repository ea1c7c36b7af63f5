// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! A simulated wallet wired to a session manager, persisting to a
//! temporary directory.

use std::path::PathBuf;

use ethers::types::U256;
use tempfile::TempDir;

use greenroom_wallet::session::SessionManager;
use greenroom_wallet::simulated::SimulatedProvider;
use greenroom_wallet::store::SessionStore;

/// Account the simulated wallet starts with.
pub const ACCOUNT: &str = "0x1234567890abcdef1234567890abcdef12345678";

/// A second account the tests can switch to.
pub const OTHER_ACCOUNT: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

pub struct WalletHarness {
    pub provider: SimulatedProvider,
    pub manager: SessionManager<SimulatedProvider>,
    pub session_file: PathBuf,
    _dir: TempDir,
}

impl WalletHarness {
    /// A wallet on Ethereum mainnet where [`ACCOUNT`] holds one ether.
    pub fn mainnet() -> Self {
        Self::on_chain(0x1)
    }

    pub fn on_chain(chain_id: u64) -> Self {
        let provider = SimulatedProvider::new(chain_id).with_account(ACCOUNT, U256::exp10(18));
        Self::with_provider(provider)
    }

    pub fn with_provider(provider: SimulatedProvider) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let session_file = dir.path().join("session.json");
        let manager =
            SessionManager::new(provider.clone(), SessionStore::new(session_file.clone()));
        Self {
            provider,
            manager,
            session_file,
            _dir: dir,
        }
    }

    /// A second manager over the same wallet and session file, the way a
    /// fresh process would build it.
    pub fn reopened(&self) -> SessionManager<SimulatedProvider> {
        SessionManager::new(
            self.provider.clone(),
            SessionStore::new(self.session_file.clone()),
        )
    }
}

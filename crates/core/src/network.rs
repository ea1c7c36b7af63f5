// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Chain id allow-list and helpers for rendering network names.

use std::num::ParseIntError;

use serde::{Deserialize, Serialize};

/// Name reported for a chain id outside the allow-list.
pub const UNSUPPORTED_NETWORK: &str = "Unsupported Network";

/// Networks the client knows how to talk to, as `(chain id, name)` pairs.
pub const SUPPORTED_NETWORKS: [(u64, &str); 3] = [
    (0x1, "Ethereum Mainnet"),
    (0x5, "Goerli Testnet"),
    (0x13881, "Polygon Mumbai"),
];

/// Snapshot of the chain a session is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub chain_id: u64,
    pub name: String,
    pub supported: bool,
}

impl NetworkInfo {
    /// Resolves a raw chain id against the allow-list. Unknown ids yield
    /// [`UNSUPPORTED_NETWORK`] with `supported` unset.
    pub fn from_chain_id(chain_id: u64) -> Self {
        match network_name(chain_id) {
            Some(name) => Self {
                chain_id,
                name: name.to_string(),
                supported: true,
            },
            None => Self {
                chain_id,
                name: UNSUPPORTED_NETWORK.to_string(),
                supported: false,
            },
        }
    }

    /// The `0x`-prefixed hexadecimal chain id used on the wallet RPC.
    pub fn chain_id_hex(&self) -> String {
        chain_id_hex(self.chain_id)
    }
}

/// Allow-list name for a chain id, `None` when unknown.
pub fn network_name(chain_id: u64) -> Option<&'static str> {
    SUPPORTED_NETWORKS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, name)| *name)
}

pub fn is_supported(chain_id: u64) -> bool {
    network_name(chain_id).is_some()
}

/// Renders a chain id the way wallets quote it, e.g. `0x13881`.
pub fn chain_id_hex(chain_id: u64) -> String {
    format!("{chain_id:#x}")
}

/// Failed to parse a chain id given on the command line or the wire.
#[derive(Debug, thiserror::Error)]
#[error("invalid chain id '{value}'")]
pub struct ParseChainIdError {
    value: String,
    #[source]
    source: ParseIntError,
}

/// Parses a chain id from either its `0x`-prefixed hexadecimal form or a
/// plain decimal integer.
pub fn parse_chain_id(raw: &str) -> Result<u64, ParseChainIdError> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse::<u64>(),
    };
    parsed.map_err(|source| ParseChainIdError {
        value: raw.to_string(),
        source,
    })
}

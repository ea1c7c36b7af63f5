// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Setup & maintenance of the Greenroom client configuration.
//!
//! The following is maintained in the config:
//! - node RPC URL the client connects through
//! - signing account used when purchasing tickets on chain
//! - address of the ticketing contract, once bound
//!
//! The config lives at `$XDG_CONFIG_DIR/greenroom/config.json` by default.

use ethers::core::k256::elliptic_curve::SecretKey;
use ethers::core::k256::Secp256k1;
use ethers::core::rand::thread_rng;
use ethers::prelude::*;
use serde::{Deserialize, Serialize};
use tokio::fs::{read, write};
use tokio::task::spawn_blocking;

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("expected hex for secret key: {0}")]
    InvalidSecretKey(String),
    #[error("could not resolve config directory: {0}")]
    BaseDirectories(#[from] xdg::BaseDirectoriesError),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    endpoint: String,
    account: Account,
    pub contract: Option<H160>,
}

impl Config {
    pub async fn configure(
        path: &(impl AsRef<Path> + std::fmt::Debug),
        endpoint: String,
        secret_key: Option<String>,
    ) -> Result<(), ConfigError> {
        let config = Self::load(path).await;

        let config = match (config, secret_key) {
            (Err(_), None) => {
                let sk = SecretKey::random(&mut thread_rng());
                Config {
                    endpoint,
                    account: Account { sk },
                    contract: None,
                }
            }
            (Ok(mut config), None) => {
                config.endpoint = endpoint;
                config
            }
            (Ok(mut config), Some(sk)) => {
                config.account.sk = secret_key_from_hex(sk)?;
                config.endpoint = endpoint;
                config
            }
            (_, Some(sk)) => {
                let sk = secret_key_from_hex(sk)?;
                Config {
                    endpoint,
                    account: Account { sk },
                    contract: None,
                }
            }
        };

        config.save(path).await?;
        Ok(())
    }

    pub async fn load(path: &impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = read(path).await?;
        let config = serde_json::from_slice(config.as_ref())?;
        Ok(config)
    }

    pub async fn save(&self, path: &impl AsRef<Path>) -> Result<(), ConfigError> {
        let config = serde_json::to_vec_pretty(self)?;
        write(path, config).await?;
        Ok(())
    }

    /// `$XDG_CONFIG_DIR/greenroom/config.json`
    pub async fn config_path() -> Result<PathBuf, ConfigError> {
        let path = spawn_blocking(move || {
            xdg::BaseDirectories::with_prefix("greenroom")
                .map(|dirs| dirs.place_config_file("config.json"))
        })
        .await???;

        Ok(path)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Signing wallet derived from the configured account.
    pub fn wallet(&self) -> LocalWallet {
        self.account.clone().into()
    }

    /// On-chain address of the configured account.
    pub fn address(&self) -> H160 {
        self.wallet().address()
    }
}

/// An account, formed of a secp256k1 secret key.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(into = "AccountRepr", try_from = "AccountRepr")]
pub struct Account {
    sk: SecretKey<Secp256k1>,
}

impl From<Account> for LocalWallet {
    fn from(val: Account) -> Self {
        LocalWallet::from(val.sk.clone())
    }
}

// Account representation used when serializing/deserializing
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AccountRepr {
    sk: String,
}

impl From<Account> for AccountRepr {
    fn from(a: Account) -> Self {
        Self {
            sk: hex::encode(a.sk.to_bytes()),
        }
    }
}

impl TryFrom<AccountRepr> for Account {
    type Error = ConfigError;

    fn try_from(a: AccountRepr) -> Result<Self, ConfigError> {
        let sk = secret_key_from_hex(a.sk)?;
        Ok(Self { sk })
    }
}

fn secret_key_from_hex(sk: impl AsRef<str>) -> Result<SecretKey<Secp256k1>, ConfigError> {
    let raw = sk.as_ref().trim_start_matches("0x");
    let bytes =
        hex::decode(raw).map_err(|err| ConfigError::InvalidSecretKey(err.to_string()))?;
    SecretKey::from_slice(bytes.as_ref())
        .map_err(|err| ConfigError::InvalidSecretKey(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    // Address derived from the secret key 0x...01.
    const SK_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";
    const SK_ONE_ADDRESS: &str = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf";

    #[tokio::test]
    async fn configure_creates_config_with_fresh_account() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::configure(&path, "http://localhost:8545".to_string(), None)
            .await
            .unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.endpoint(), "http://localhost:8545");
        assert!(config.contract.is_none());
    }

    #[tokio::test]
    async fn configure_with_explicit_key_derives_known_address() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::configure(
            &path,
            "http://localhost:8545".to_string(),
            Some(SK_ONE.to_string()),
        )
        .await
        .unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(format!("{:#x}", config.address()), SK_ONE_ADDRESS);
    }

    #[tokio::test]
    async fn reconfigure_preserves_account() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::configure(
            &path,
            "http://localhost:8545".to_string(),
            Some(SK_ONE.to_string()),
        )
        .await
        .unwrap();
        Config::configure(&path, "http://node.example:8545".to_string(), None)
            .await
            .unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.endpoint(), "http://node.example:8545");
        assert_eq!(format!("{:#x}", config.address()), SK_ONE_ADDRESS);
    }

    #[tokio::test]
    async fn rejects_non_hex_secret_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let result = Config::configure(
            &path,
            "http://localhost:8545".to_string(),
            Some("not-a-key".to_string()),
        )
        .await;

        assert!(matches!(result, Err(ConfigError::InvalidSecretKey(_))));
    }
}

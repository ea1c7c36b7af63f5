// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Wallet session management for the Greenroom client.
//!
//! A [`session::SessionManager`] drives the connect/disconnect lifecycle over
//! a pluggable [`provider::WalletProvider`], persists the connected account
//! across restarts, and publishes session snapshots through a watch channel.
//! A [`watcher::SessionWatcher`] keeps the session consistent with account
//! and chain change notifications pushed by the provider.

pub mod error;
pub mod node;
pub mod provider;
pub mod session;
pub mod simulated;
pub mod store;
pub mod watcher;

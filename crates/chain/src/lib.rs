// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! On-chain ticketing for the Greenroom client.
//!
//! [`client::ContractClient`] is a thin pass-through to the external
//! `EventRegistration` contract: its only real work is the unit conversions
//! at the boundary (decimal ether to wei, calendar dates to Unix seconds),
//! which must be exact and reversible. Transport failures propagate
//! unmodified; there is no retry or backoff.

pub mod bindings;
pub mod client;
pub mod error;
pub mod units;

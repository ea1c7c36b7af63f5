// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Shared domain model and configuration for the Greenroom client.

pub mod config;
pub mod network;
pub mod types;

// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Shared fixtures for the cross-crate scenario tests.

pub mod harness;

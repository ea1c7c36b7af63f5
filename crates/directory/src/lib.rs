// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Read side of the event platform.
//!
//! The [`store::EventDirectory`] trait is the seam between callers and
//! whatever backs the listing. [`memory::InMemoryDirectory`] is the bundled
//! backend, seeded from [`catalog`]; an indexer-backed implementation can
//! replace it without touching call sites.

pub mod catalog;
pub mod error;
pub mod memory;
pub mod store;

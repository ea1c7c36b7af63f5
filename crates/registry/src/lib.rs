// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Registrations, applications and attendee profiles.
//!
//! [`store::RegistrationStore`] is the write side counterpart to the event
//! directory: tickets and applications flow through it. The bundled
//! [`memory::InMemoryRegistry`] keeps everything in process memory;
//! [`profiles::ProfileStore`] does the same for per-account profile data.

pub mod error;
pub mod memory;
pub mod profiles;
pub mod store;

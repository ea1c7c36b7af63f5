// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Generated bindings to the `EventRegistration` contract.
//!
//! The contract is deployed externally; only its interface is known to the
//! client, so the bindings are generated from the human-readable ABI rather
//! than a compiled artifact.

use ethers::prelude::abigen;

abigen!(
    EventRegistration,
    r#"[
        function createEvent(string name, uint256 ticketPrice, uint32 totalTickets, uint256 eventDate)
        function purchaseTicket(uint256 eventId) payable
        function getEvent(uint256 eventId) view returns (string, uint256, uint32, uint32, uint256, bool)
        function verifyTicket(address holder, uint256 eventId) view returns (bool)
    ]"#
);

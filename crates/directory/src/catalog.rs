// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! The launch catalog: events published before the directory went live.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use greenroom_core::types::{
    EventApplicationStatus, EventRecord, EventStatus, Organizer,
};

fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).expect("Catalog dates are valid calendar dates")
}

fn midnight(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    day(year, month, date).and_time(NaiveTime::MIN).and_utc()
}

fn tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

/// The four events the platform launched with.
pub fn seed_events() -> Vec<EventRecord> {
    vec![
        EventRecord {
            id: "1".to_string(),
            title: "ETH Denver 2023".to_string(),
            description: "The premier Ethereum hackathon and conference bringing together \
                          developers, entrepreneurs, and enthusiasts."
                .to_string(),
            start_date: day(2023, 3, 1),
            end_date: Some(day(2023, 3, 5)),
            location: "Denver, CO".to_string(),
            image_url: "https://images.unsplash.com/photo-1616046229478-9901c5536a45?q=80&w=3280&auto=format&fit=crop".to_string(),
            organizer: Organizer::new("0x1234567890abcdef1234567890abcdef12345678", "ETH Global"),
            capacity: 5000,
            attendees: 3500,
            category: "Hackathon".to_string(),
            tags: tags(&["Ethereum", "Web3", "DeFi"]),
            registration_deadline: Some(day(2023, 2, 15)),
            ticket_price: Some("0.1".to_string()),
            ticket_currency: Some("ETH".to_string()),
            application_required: true,
            application_status: EventApplicationStatus::Open,
            status: EventStatus::Past,
            contract_address: Some("0xabcdef1234567890abcdef1234567890abcdef12".into()),
            created_at: midnight(2022, 12, 1),
            updated_at: midnight(2023, 2, 28),
        },
        EventRecord {
            id: "2".to_string(),
            title: "Web3 Barcelona Summit".to_string(),
            description: "A gathering of web3 innovators discussing the latest trends and \
                          technologies reshaping the digital landscape."
                .to_string(),
            start_date: day(2023, 6, 15),
            end_date: Some(day(2023, 6, 17)),
            location: "Barcelona, Spain".to_string(),
            image_url: "https://images.unsplash.com/photo-1599946347371-68eb71b16afc?q=80&w=3273&auto=format&fit=crop".to_string(),
            organizer: Organizer::new(
                "0x2345678901abcdef2345678901abcdef23456789",
                "Web3 Foundation",
            ),
            capacity: 2000,
            attendees: 1200,
            category: "Conference".to_string(),
            tags: tags(&["NFTs", "DAOs", "Metaverse"]),
            registration_deadline: Some(day(2023, 6, 1)),
            ticket_price: Some("0.2".to_string()),
            ticket_currency: Some("ETH".to_string()),
            application_required: false,
            application_status: EventApplicationStatus::Closed,
            status: EventStatus::Past,
            contract_address: Some("0xbcdef1234567890abcdef1234567890abcdef123".into()),
            created_at: midnight(2023, 3, 15),
            updated_at: midnight(2023, 6, 14),
        },
        EventRecord {
            id: "3".to_string(),
            title: "ETH Global Singapore".to_string(),
            description: "Explore the cutting edge of Ethereum development with industry \
                          leaders and pioneers."
                .to_string(),
            start_date: day(2023, 12, 8),
            end_date: Some(day(2023, 12, 10)),
            location: "Singapore".to_string(),
            image_url: "https://images.unsplash.com/photo-1569025743873-ea3a9ade89f9?q=80&w=3270&auto=format&fit=crop".to_string(),
            organizer: Organizer::new("0x3456789012abcdef3456789012abcdef34567890", "ETH Global"),
            capacity: 1000,
            attendees: 850,
            category: "Hackathon".to_string(),
            tags: tags(&["Ethereum", "Layer2", "Scaling"]),
            registration_deadline: Some(day(2023, 11, 15)),
            ticket_price: Some("0.15".to_string()),
            ticket_currency: Some("ETH".to_string()),
            application_required: true,
            application_status: EventApplicationStatus::Closed,
            status: EventStatus::Past,
            contract_address: Some("0xcdef1234567890abcdef1234567890abcdef1234".into()),
            created_at: midnight(2023, 9, 1),
            updated_at: midnight(2023, 12, 7),
        },
        EventRecord {
            id: "4".to_string(),
            title: "Greenroom Launch Event".to_string(),
            description: "Join us for the official launch of Greenroom - the web3 native \
                          event platform revolutionizing how we connect."
                .to_string(),
            start_date: day(2024, 8, 15),
            end_date: Some(day(2024, 8, 17)),
            location: "Virtual".to_string(),
            image_url: "https://images.unsplash.com/photo-1560439514-4e9645039924?q=80&w=3270&auto=format&fit=crop".to_string(),
            organizer: Organizer::new("0x4567890123abcdef4567890123abcdef45678901", "Greenroom Team"),
            capacity: 10000,
            attendees: 0,
            category: "Launch".to_string(),
            tags: tags(&["Web3", "Events", "Networking"]),
            registration_deadline: Some(day(2024, 8, 10)),
            ticket_price: Some("0.05".to_string()),
            ticket_currency: Some("ETH".to_string()),
            application_required: false,
            application_status: EventApplicationStatus::Open,
            status: EventStatus::Upcoming,
            contract_address: Some("0xdef1234567890abcdef1234567890abcdef12345".into()),
            created_at: midnight(2024, 6, 1),
            updated_at: midnight(2024, 6, 1),
        },
    ]
}

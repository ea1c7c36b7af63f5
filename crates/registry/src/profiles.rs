// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::info;

use greenroom_core::types::{Address, PastEvent, UserProfile};

use crate::error::RegistryError;

/// Patch applied to a profile. Fields left as `None` are untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Per-account profile data, keyed case-insensitively by address.
///
/// Profiles come into existence on first access. The address and join date
/// recorded at creation survive every later update.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: Arc<RwLock<HashMap<Address, UserProfile>>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates a store from previously dumped profiles.
    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        let store = Self::default();
        store.profiles.write().extend(
            profiles
                .into_iter()
                .map(|profile| (profile.address.clone(), profile)),
        );
        store
    }

    /// Every profile on record.
    pub fn profiles(&self) -> Vec<UserProfile> {
        self.profiles.read().values().cloned().collect()
    }

    /// The profile for `address`, created empty if this is its first visit.
    pub fn profile(&self, address: &Address) -> Result<UserProfile, RegistryError> {
        let mut profiles = self.profiles.write();
        Ok(Self::entry(&mut profiles, address).clone())
    }

    pub fn update_profile(
        &self,
        address: &Address,
        update: ProfileUpdate,
    ) -> Result<UserProfile, RegistryError> {
        let mut profiles = self.profiles.write();
        let profile = Self::entry(&mut profiles, address);

        if let Some(name) = update.name {
            profile.name = Some(name);
        }
        if let Some(bio) = update.bio {
            profile.bio = Some(bio);
        }
        if let Some(avatar) = update.avatar {
            profile.avatar = Some(avatar);
        }

        info!("Profile updated for {}", address.short());
        Ok(profile.clone())
    }

    pub fn add_skill(
        &self,
        address: &Address,
        skill: impl Into<String>,
    ) -> Result<UserProfile, RegistryError> {
        let skill = skill.into();
        let mut profiles = self.profiles.write();
        let profile = Self::entry(&mut profiles, address);

        if profile.skills.contains(&skill) {
            return Err(RegistryError::DuplicateSkill(skill));
        }
        profile.skills.push(skill);
        Ok(profile.clone())
    }

    pub fn remove_skill(
        &self,
        address: &Address,
        skill: &str,
    ) -> Result<UserProfile, RegistryError> {
        let mut profiles = self.profiles.write();
        let profile = Self::entry(&mut profiles, address);

        profile.skills.retain(|listed| listed != skill);
        Ok(profile.clone())
    }

    pub fn add_past_event(
        &self,
        address: &Address,
        event: PastEvent,
    ) -> Result<UserProfile, RegistryError> {
        let mut profiles = self.profiles.write();
        let profile = Self::entry(&mut profiles, address);

        profile.past_events.push(event);
        Ok(profile.clone())
    }

    pub fn remove_past_event(
        &self,
        address: &Address,
        event_id: &str,
    ) -> Result<UserProfile, RegistryError> {
        let mut profiles = self.profiles.write();
        let profile = Self::entry(&mut profiles, address);

        profile.past_events.retain(|event| event.id != event_id);
        Ok(profile.clone())
    }

    fn entry<'a>(
        profiles: &'a mut HashMap<Address, UserProfile>,
        address: &Address,
    ) -> &'a mut UserProfile {
        profiles
            .entry(address.clone())
            .or_insert_with(|| UserProfile {
                address: address.clone(),
                name: None,
                bio: None,
                skills: Vec::new(),
                past_events: Vec::new(),
                avatar: None,
                joined_date: Utc::now(),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const ACCOUNT: &str = "0xAbC4567890123456789012345678901234567890";

    #[test]
    fn first_access_creates_an_empty_profile() {
        let store = ProfileStore::new();
        let profile = store.profile(&Address::new(ACCOUNT)).unwrap();

        // The address keeps the caller's casing.
        assert_eq!(profile.address.as_str(), ACCOUNT);
        assert_eq!(profile.name, None);
        assert!(profile.skills.is_empty());
        assert!(profile.past_events.is_empty());
    }

    #[test]
    fn lookups_ignore_address_case() {
        let store = ProfileStore::new();
        let address = Address::new(ACCOUNT);

        store
            .update_profile(
                &address,
                ProfileUpdate {
                    name: Some("Ada".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let lowercased = Address::new(ACCOUNT.to_lowercase());
        let profile = store.profile(&lowercased).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn updates_never_touch_address_or_join_date() {
        let store = ProfileStore::new();
        let address = Address::new(ACCOUNT);
        let created = store.profile(&address).unwrap();

        let updated = store
            .update_profile(
                &address,
                ProfileUpdate {
                    name: Some("Ada".to_string()),
                    bio: Some("Protocol engineer".to_string()),
                    avatar: None,
                },
            )
            .unwrap();

        assert_eq!(updated.address, created.address);
        assert_eq!(updated.joined_date, created.joined_date);
        assert_eq!(updated.bio.as_deref(), Some("Protocol engineer"));

        // A partial update leaves the other fields alone.
        let patched = store
            .update_profile(
                &address,
                ProfileUpdate {
                    bio: Some("Event organizer".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(patched.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn skills_cannot_be_listed_twice() {
        let store = ProfileStore::new();
        let address = Address::new(ACCOUNT);

        store.add_skill(&address, "Solidity").unwrap();
        let err = store.add_skill(&address, "Solidity").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateSkill(skill) if skill == "Solidity"));

        store.remove_skill(&address, "Solidity").unwrap();
        let profile = store.add_skill(&address, "Solidity").unwrap();
        assert_eq!(profile.skills, ["Solidity"]);
    }

    #[test]
    fn past_events_can_be_added_and_removed() {
        let store = ProfileStore::new();
        let address = Address::new(ACCOUNT);

        let event = PastEvent {
            id: "1".to_string(),
            name: "ETH Denver 2023".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            role: "Attendee".to_string(),
            achievement: Some("Finalist".to_string()),
        };
        let profile = store.add_past_event(&address, event).unwrap();
        assert_eq!(profile.past_events.len(), 1);

        let profile = store.remove_past_event(&address, "1").unwrap();
        assert!(profile.past_events.is_empty());
    }
}

// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Profile commands.

use anyhow::Result;
use clap::Subcommand;

use greenroom_core::types::{Address, UserProfile};
use greenroom_registry::profiles::ProfileUpdate;

use crate::session;
use crate::state::Stores;

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show a profile (the session account by default)
    Show { address: Option<String> },
    /// Update name, bio or avatar
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// List a new skill on the profile
    AddSkill { skill: String },
    /// Drop a listed skill
    RemoveSkill { skill: String },
}

pub async fn run(command: ProfileCommand) -> Result<()> {
    let stores = Stores::open().await?;

    let profile = match command {
        ProfileCommand::Show { address } => {
            let address = match address {
                Some(address) => Address::new(address),
                None => session::active_address().await?,
            };
            stores.profiles.profile(&address)?
        }
        ProfileCommand::Set { name, bio, avatar } => {
            let address = session::active_address().await?;
            stores
                .profiles
                .update_profile(&address, ProfileUpdate { name, bio, avatar })?
        }
        ProfileCommand::AddSkill { skill } => {
            let address = session::active_address().await?;
            stores.profiles.add_skill(&address, skill)?
        }
        ProfileCommand::RemoveSkill { skill } => {
            let address = session::active_address().await?;
            stores.profiles.remove_skill(&address, &skill)?
        }
    };

    // Even a plain lookup may have created the profile.
    stores.commit().await?;
    print_profile(&profile);
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("address\t\t{}", profile.address);
    if let Some(name) = &profile.name {
        println!("name\t\t{name}");
    }
    if let Some(bio) = &profile.bio {
        println!("bio\t\t{bio}");
    }
    if !profile.skills.is_empty() {
        println!("skills\t\t{}", profile.skills.join(", "));
    }
    if let Some(avatar) = &profile.avatar {
        println!("avatar\t\t{avatar}");
    }
    println!("joined\t\t{}", profile.joined_date.format("%Y-%m-%d"));
    for event in &profile.past_events {
        match &event.achievement {
            Some(achievement) => {
                println!("past event\t{} ({}, {achievement})", event.name, event.date)
            }
            None => println!("past event\t{} ({})", event.name, event.date),
        }
    }
}

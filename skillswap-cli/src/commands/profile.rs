//! Profile commands - edit the logged-in member's profile

use anyhow::Result;
use clap::Subcommand;
use skillswap_core::ProfileUpdate;

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Change name, location or photo
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Profile photo URL
        #[arg(long)]
        photo: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch between a public and a private profile
    TogglePublic {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl ProfileCommands {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileCommands::Update { .. } => "profile update",
            ProfileCommands::TogglePublic { .. } => "profile toggle-public",
        }
    }
}

pub fn run(command: ProfileCommands) -> Result<()> {
    let ctx = get_context()?;
    match command {
        ProfileCommands::Update {
            name,
            location,
            photo,
            json,
        } => {
            let update = ProfileUpdate {
                name,
                location,
                profile_photo: photo,
                is_public: None,
            };
            let user = ctx.session.update_profile(&update)?;
            if json {
                return output::print_json(&user);
            }
            output::success("Profile updated");
            output::print_user(&user);
        }
        ProfileCommands::TogglePublic { json } => {
            let user = ctx.session.toggle_public_profile()?;
            if json {
                return output::print_json(&user);
            }
            if user.is_public {
                output::success("Your profile is now public");
            } else {
                output::success("Your profile is now private; you won't appear in browse results");
            }
        }
    }
    Ok(())
}

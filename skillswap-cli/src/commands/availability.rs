//! Availability commands - when you can meet

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use skillswap_core::{Day, TimeSlot};

use super::{get_context, require_user};
use crate::output;

#[derive(Subcommand)]
pub enum AvailabilityCommands {
    /// Add a day and time slot
    Add {
        /// Monday..Sunday (or mon..sun)
        day: Day,
        /// morning, afternoon, evening or night
        slot: TimeSlot,
    },
    /// Remove an entry by id
    Remove { id: String },
    /// List your availability
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl AvailabilityCommands {
    pub fn name(&self) -> &'static str {
        match self {
            AvailabilityCommands::Add { .. } => "availability add",
            AvailabilityCommands::Remove { .. } => "availability remove",
            AvailabilityCommands::List { .. } => "availability list",
        }
    }
}

pub fn run(command: AvailabilityCommands) -> Result<()> {
    let ctx = get_context()?;
    match command {
        AvailabilityCommands::Add { day, slot } => {
            if ctx.session.add_availability(day, slot)? {
                output::success(&format!("Available {} {}", day, slot.label()));
            } else {
                output::warning(&format!("Already available {} {}", day, slot.label()));
            }
        }
        AvailabilityCommands::Remove { id } => {
            if ctx.session.remove_availability(&id)? {
                output::success("Availability removed");
            } else {
                output::warning(&format!("No availability entry with id {}", id));
            }
        }
        AvailabilityCommands::List { json } => {
            let user = require_user(&ctx)?;
            if json {
                return output::print_json(&user.availability);
            }
            if user.availability.is_empty() {
                println!("{}", "No availability set.".dimmed());
                return Ok(());
            }
            let mut table = output::create_table();
            table.set_header(vec!["ID", "Day", "Time"]);
            for entry in &user.availability {
                table.add_row(vec![
                    entry.id.clone(),
                    entry.day.to_string(),
                    entry.time_slot.label().to_string(),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

//! Swap commands - request, answer and finish skill swaps

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{Confirm, Select};
use skillswap_core::services::SwapOutcome;
use skillswap_core::{Error, RequestDirection, Skill, SkillSwapContext, SwapRequest};

use super::{get_context, require_user};
use crate::output;

#[derive(Subcommand)]
pub enum SwapCommands {
    /// Ask another member for a swap
    Request {
        /// Member to ask
        user_id: String,
        /// One of your offered skills (id or name)
        #[arg(long)]
        offer: Option<String>,
        /// One of their offered skills (id or name)
        #[arg(long)]
        want: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List your swap requests
    List {
        /// Only requests you sent
        #[arg(long, conflicts_with = "received")]
        sent: bool,
        /// Only requests you received
        #[arg(long)]
        received: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Accept a request you received
    Accept { id: String },
    /// Reject a request you received
    Reject { id: String },
    /// Mark an accepted swap as done
    Complete { id: String },
    /// Withdraw a pending request you sent
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

impl SwapCommands {
    pub fn name(&self) -> &'static str {
        match self {
            SwapCommands::Request { .. } => "swap request",
            SwapCommands::List { .. } => "swap list",
            SwapCommands::Accept { .. } => "swap accept",
            SwapCommands::Reject { .. } => "swap reject",
            SwapCommands::Complete { .. } => "swap complete",
            SwapCommands::Delete { .. } => "swap delete",
        }
    }
}

pub fn run(command: SwapCommands) -> Result<()> {
    let ctx = get_context()?;
    match command {
        SwapCommands::Request {
            user_id,
            offer,
            want,
            json,
        } => run_request(&ctx, &user_id, offer, want, json),
        SwapCommands::List {
            sent,
            received,
            json,
        } => run_list(&ctx, sent, received, json),
        SwapCommands::Accept { id } => {
            let me = require_user(&ctx)?;
            report(ctx.swaps.accept(&id, &me.id)?, "accepted");
            Ok(())
        }
        SwapCommands::Reject { id } => {
            let me = require_user(&ctx)?;
            report(ctx.swaps.reject(&id, &me.id)?, "rejected");
            Ok(())
        }
        SwapCommands::Complete { id } => {
            let me = require_user(&ctx)?;
            let outcome = ctx.swaps.complete(&id, &me.id)?;
            let changed = outcome.changed();
            report(outcome, "completed");
            if changed {
                println!(
                    "{}",
                    format!("Leave feedback with 'swap feedback add {} --rating 1-5'.", id).dimmed()
                );
            }
            Ok(())
        }
        SwapCommands::Delete { id, force } => {
            let me = require_user(&ctx)?;
            if !force {
                if let Some(request) = ctx.swaps.get(&id) {
                    let prompt = format!(
                        "Withdraw your request for {}?",
                        request.skill_requested.name
                    );
                    if !Confirm::new().with_prompt(prompt).default(false).interact()? {
                        println!("Cancelled.");
                        return Ok(());
                    }
                }
            }
            if ctx.swaps.delete(&id, &me.id)? {
                output::success("Swap request withdrawn");
            } else {
                output::warning(&format!("No swap request with id {}", id));
            }
            Ok(())
        }
    }
}

fn report(outcome: SwapOutcome, verb: &str) {
    let id = &outcome.request().id;
    if outcome.changed() {
        output::success(&format!("Swap request {} {}", id, verb));
    } else {
        output::warning(&format!("Swap request {} was already {}", id, verb));
    }
}

/// Find a skill by id or (case-insensitive) name, or let the user pick one
fn pick_skill(skills: &[Skill], wanted: Option<String>, prompt: &str) -> Result<Skill> {
    if skills.is_empty() {
        bail!("{}: no skills to choose from", prompt);
    }
    match wanted {
        Some(key) => {
            let lower = key.to_lowercase();
            skills
                .iter()
                .find(|s| s.id == key || s.name.to_lowercase() == lower)
                .cloned()
                .ok_or_else(|| Error::not_found(format!("skill '{}'", key)).into())
        }
        None => {
            let labels: Vec<String> = skills.iter().map(output::skill_label).collect();
            let index = Select::new()
                .with_prompt(prompt)
                .items(&labels)
                .default(0)
                .interact()?;
            Ok(skills[index].clone())
        }
    }
}

fn run_request(
    ctx: &SkillSwapContext,
    user_id: &str,
    offer: Option<String>,
    want: Option<String>,
    json: bool,
) -> Result<()> {
    let me = require_user(ctx)?;
    let other = ctx
        .directory
        .get_user_by_id(user_id)
        .ok_or_else(|| Error::not_found(format!("user {}", user_id)))?;

    let offered = pick_skill(&me.skills_offered, offer, "Skill you offer")?;
    let requested = pick_skill(
        &other.skills_offered,
        want,
        &format!("Skill you want from {}", other.name),
    )?;

    let request = ctx.swaps.create(&me.id, &other.id, offered, requested)?;

    if json {
        return output::print_json(&request);
    }
    output::success(&format!(
        "Requested {} from {} in exchange for {}",
        request.skill_requested.name, other.name, request.skill_offered.name
    ));
    println!("  Request id: {}", request.id);
    Ok(())
}

fn run_list(ctx: &SkillSwapContext, sent: bool, received: bool, json: bool) -> Result<()> {
    let me = require_user(ctx)?;
    let mut requests: Vec<(RequestDirection, SwapRequest)> = Vec::new();
    if !received {
        requests.extend(
            ctx.swaps
                .requests_for_user(&me.id, RequestDirection::Sent)
                .into_iter()
                .map(|r| (RequestDirection::Sent, r)),
        );
    }
    if !sent {
        requests.extend(
            ctx.swaps
                .requests_for_user(&me.id, RequestDirection::Received)
                .into_iter()
                .map(|r| (RequestDirection::Received, r)),
        );
    }

    if json {
        let items: Vec<_> = requests
            .iter()
            .map(|(direction, r)| serde_json::json!({ "direction": direction, "request": r }))
            .collect();
        return output::print_json(&items);
    }

    if requests.is_empty() {
        println!("{}", "No swap requests.".dimmed());
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "", "With", "You give", "You get", "Status", "Updated"]);
    for (direction, r) in &requests {
        let other_id = r.counterpart(&me.id);
        let other = ctx
            .directory
            .get_user_by_id(other_id)
            .map(|u| u.name)
            .unwrap_or_else(|| other_id.to_string());
        // From the receiver's side the skills swap roles
        let (give, get, arrow) = match direction {
            RequestDirection::Sent => (&r.skill_offered, &r.skill_requested, "->"),
            RequestDirection::Received => (&r.skill_requested, &r.skill_offered, "<-"),
        };
        table.add_row(vec![
            r.id.clone(),
            arrow.to_string(),
            other,
            give.name.clone(),
            get.name.clone(),
            output::status_label(r.status),
            output::format_datetime(&r.updated_at),
        ]);
    }
    println!("{}", table);
    Ok(())
}

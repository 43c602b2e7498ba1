//! Status command - summary of local state

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::get_context;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "SkillSwap Status".bold());
    println!();

    match &status.current_user {
        Some(me) => println!(
            "Logged in as {} ({}, {} profile)",
            me.name.bold(),
            me.id,
            if me.is_public { "public" } else { "private" }
        ),
        None if status.authenticated => {
            println!("{}", "Logged in, profile not cached. Run 'swap sync'.".yellow())
        }
        None => println!("{}", "Not logged in".yellow()),
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if let Some(me) = &status.current_user {
        table.add_row(vec!["Skills offered", &me.skills_offered.to_string()]);
        table.add_row(vec!["Skills wanted", &me.skills_wanted.to_string()]);
        table.add_row(vec!["Feedback received", &me.received_feedback.to_string()]);
    }
    table.add_row(vec![
        "Known members",
        &format!("{} ({} public)", status.total_users, status.public_users),
    ]);
    let swaps = &status.swap_requests;
    table.add_row(vec![
        "Swap requests",
        &format!(
            "{} ({} pending, {} accepted, {} rejected, {} completed)",
            swaps.total, swaps.pending, swaps.accepted, swaps.rejected, swaps.completed
        ),
    ]);
    table.add_row(vec!["Feedback stored", &status.total_feedback.to_string()]);

    println!("{}", table);
    println!();
    println!(
        "{}",
        format!("Server: {}", ctx.config.api_base_url).dimmed()
    );
    if let Some(path) = ctx.db_path() {
        println!("{}", format!("Database: {}", path.display()).dimmed());
    }

    Ok(())
}

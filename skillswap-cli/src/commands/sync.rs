//! Sync command - refresh profile and directory from the server

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let result = ctx.sync()?;

    if json {
        return output::print_json(&result);
    }

    output::success("Synced with the SkillSwap server");
    println!("  Members fetched: {}", result.directory.fetched);
    println!("    New:     {}", result.directory.added);
    println!("    Updated: {}", result.directory.updated);
    println!(
        "{}",
        format!("Server: {}", ctx.config.api_base_url).dimmed()
    );
    Ok(())
}

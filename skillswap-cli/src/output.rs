//! Output formatting utilities

use chrono::{DateTime, TimeZone, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

use skillswap_core::{Skill, SwapStatus, User};

pub fn success(msg: &str) {
    println!("{}", msg.green());
}

pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Dimmed follow-up line on stderr
pub fn hint(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

pub fn format_timestamp_ms(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| format_datetime(&dt))
        .unwrap_or_else(|| timestamp_ms.to_string())
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// "Guitar (advanced)" or just "Guitar"
pub fn skill_label(skill: &Skill) -> String {
    match &skill.level {
        Some(level) => format!("{} ({})", skill.name, level),
        None => skill.name.clone(),
    }
}

pub fn skill_list(skills: &[Skill]) -> String {
    skills.iter().map(skill_label).collect::<Vec<_>>().join(", ")
}

pub fn status_label(status: SwapStatus) -> String {
    match status {
        SwapStatus::Pending => status.as_str().yellow().to_string(),
        SwapStatus::Accepted => status.as_str().cyan().to_string(),
        SwapStatus::Rejected => status.as_str().red().to_string(),
        SwapStatus::Completed => status.as_str().green().to_string(),
    }
}

/// Multi-line profile view
pub fn print_user(user: &User) {
    println!("{} {}", user.name.bold(), format!("({})", user.id).dimmed());
    if let Some(location) = &user.location {
        println!("  Location: {}", location);
    }
    println!(
        "  Profile:  {}",
        if user.is_public { "public" } else { "private" }
    );
    println!("  Offers:   {}", or_none(&skill_list(&user.skills_offered)));
    println!("  Wants:    {}", or_none(&skill_list(&user.skills_wanted)));
    let slots = user
        .availability
        .iter()
        .map(|a| format!("{} {}", a.day, a.time_slot.label()))
        .collect::<Vec<_>>()
        .join(", ");
    println!("  Available: {}", or_none(&slots));
}

fn or_none(s: &str) -> String {
    if s.is_empty() {
        "-".dimmed().to_string()
    } else {
        s.to_string()
    }
}

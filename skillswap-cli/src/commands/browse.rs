//! Browse commands - find members and view profiles

use anyhow::Result;
use colored::Colorize;
use skillswap_core::Error;

use super::get_context;
use crate::output;

pub fn run_browse(skill: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let me = ctx.session.current_user_id();

    let users: Vec<_> = ctx
        .directory
        .search_users_by_skill(skill.unwrap_or(""))
        .into_iter()
        .filter(|u| Some(&u.id) != me.as_ref())
        .collect();

    if json {
        return output::print_json(&users);
    }

    if users.is_empty() {
        match skill {
            Some(q) => println!("No members offer or want '{}'.", q),
            None => println!("No other public members yet."),
        }
        println!("{}", "Run 'swap sync' to refresh the directory.".dimmed());
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Location", "Offers", "Wants", "Rating"]);
    for user in &users {
        let summary = ctx.feedback.rating_summary(&user.id);
        table.add_row(vec![
            user.id.clone(),
            user.name.clone(),
            user.location.clone().unwrap_or_default(),
            output::skill_list(&user.skills_offered),
            output::skill_list(&user.skills_wanted),
            summary
                .average
                .map(|avg| format!("{:.1} ({})", avg, summary.count))
                .unwrap_or_default(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

pub fn run_user(id: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = ctx
        .directory
        .get_user_by_id(id)
        .ok_or_else(|| Error::not_found(format!("user {}", id)))?;
    let feedback = ctx.feedback.get_user_feedbacks(&user.id);

    if json {
        return output::print_json(&serde_json::json!({
            "user": user,
            "rating": ctx.feedback.rating_summary(&user.id),
            "feedback": feedback,
        }));
    }

    output::print_user(&user);
    if feedback.is_empty() {
        return Ok(());
    }

    println!();
    println!("{}", "Feedback".bold());
    for f in &feedback {
        let stars = "*".repeat(f.rating as usize);
        println!(
            "  {} {} {}",
            stars.yellow(),
            f.comment,
            output::format_datetime(&f.created_at).dimmed()
        );
    }
    Ok(())
}

//! Auth commands - register, login, logout, whoami

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};
use skillswap_core::RegisterRequest;

use super::{get_context, require_user};
use crate::output;

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

fn password_if_missing(value: Option<String>, confirm: bool) -> Result<String> {
    if let Some(p) = value {
        return Ok(p);
    }
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Repeat password", "Passwords don't match");
    }
    Ok(prompt.interact()?)
}

pub fn run_register(
    email: Option<String>,
    name: Option<String>,
    location: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let mut request = RegisterRequest::new(
        prompt_if_missing(email, "Email")?,
        password_if_missing(password, true)?,
        prompt_if_missing(name, "Name")?,
    );
    request.location = location;

    let user = ctx.session.register(&request)?;

    if json {
        return output::print_json(&user);
    }
    output::success(&format!("Welcome to SkillSwap, {}!", user.name));
    println!(
        "{}",
        "Add what you can teach with 'swap skill add offered <name>'.".dimmed()
    );
    Ok(())
}

pub fn run_login(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let email = prompt_if_missing(email, "Email")?;
    let password = password_if_missing(password, false)?;
    let user = ctx.session.login(&email, &password)?;

    if json {
        return output::print_json(&user);
    }
    output::success(&format!("Logged in as {}", user.name));
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context()?;
    if !ctx.session.is_authenticated() {
        output::warning("Not logged in.");
        return Ok(());
    }
    ctx.session.logout()?;
    output::success("Logged out");
    Ok(())
}

pub fn run_whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = require_user(&ctx)?;

    if json {
        return output::print_json(&user);
    }
    output::print_user(&user);
    let summary = ctx.feedback.rating_summary(&user.id);
    if let Some(avg) = summary.average {
        println!("  Rating:   {:.1} from {} review(s)", avg, summary.count);
    }
    Ok(())
}

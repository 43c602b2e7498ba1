//! Feedback commands - rate a swap partner and read reviews

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Input;
use skillswap_core::services::NewFeedback;

use super::{get_context, require_user};
use crate::output;

#[derive(Subcommand)]
pub enum FeedbackCommands {
    /// Rate the other party of a swap
    Add {
        /// Swap request id
        swap_id: String,
        /// 1 to 5 stars
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: Option<String>,
        /// Member being rated; defaults to the other party of the swap
        #[arg(long)]
        to: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Feedback a member has received (default: you)
    List {
        #[arg(long)]
        user: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl FeedbackCommands {
    pub fn name(&self) -> &'static str {
        match self {
            FeedbackCommands::Add { .. } => "feedback add",
            FeedbackCommands::List { .. } => "feedback list",
        }
    }
}

pub fn run(command: FeedbackCommands) -> Result<()> {
    let ctx = get_context()?;
    match command {
        FeedbackCommands::Add {
            swap_id,
            rating,
            comment,
            to,
            json,
        } => {
            let me = require_user(&ctx)?;
            let to_user_id = match to {
                Some(id) => id,
                None => ctx
                    .swaps
                    .get(&swap_id)
                    .map(|s| s.counterpart(&me.id).to_string())
                    .with_context(|| {
                        format!("Swap request {} is not known here; pass --to <user id>", swap_id)
                    })?,
            };
            let comment = match comment {
                Some(c) => c,
                None => Input::new()
                    .with_prompt("Comment")
                    .allow_empty(true)
                    .interact_text()?,
            };

            let feedback = ctx.feedback.add_feedback(NewFeedback {
                swap_request_id: swap_id,
                from_user_id: me.id,
                to_user_id,
                rating,
                comment,
            })?;

            if json {
                return output::print_json(&feedback);
            }
            output::success(&format!("Thanks! Left {} star(s)", feedback.rating));
        }
        FeedbackCommands::List { user, json } => {
            let user_id = match user {
                Some(id) => id,
                None => require_user(&ctx)?.id,
            };
            let feedback = ctx.feedback.get_user_feedbacks(&user_id);
            let summary = ctx.feedback.rating_summary(&user_id);

            if json {
                return output::print_json(&serde_json::json!({
                    "summary": summary,
                    "feedback": feedback,
                }));
            }

            match summary.average {
                Some(avg) => println!(
                    "{} {:.1} from {} review(s)",
                    "Rating:".bold(),
                    avg,
                    summary.count
                ),
                None => {
                    println!("{}", "No feedback yet.".dimmed());
                    return Ok(());
                }
            }

            let mut table = output::create_table();
            table.set_header(vec!["Rating", "From", "Swap", "Comment", "Date"]);
            for f in &feedback {
                let from = ctx
                    .directory
                    .get_user_by_id(&f.from_user_id)
                    .map(|u| u.name)
                    .unwrap_or_else(|| f.from_user_id.clone());
                table.add_row(vec![
                    "*".repeat(f.rating as usize),
                    from,
                    f.swap_request_id.clone(),
                    f.comment.clone(),
                    output::format_datetime(&f.created_at),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

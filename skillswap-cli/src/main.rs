//! SkillSwap CLI - trade skills with other members from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use skillswap_core::services::LogEvent;
use skillswap_core::Error;

mod commands;
mod output;

use commands::{
    auth, availability, browse, config, feedback, logs, profile, skill, status, swap, sync,
};

/// SkillSwap - trade skills with other members
#[derive(Parser)]
#[command(name = "swap", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long, env = "SKILLSWAP_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in to an existing account
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long, env = "SKILLSWAP_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the local session
    Logout,

    /// Show the logged-in member
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit your profile
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommands,
    },

    /// Manage the skills you offer or want
    Skill {
        #[command(subcommand)]
        command: skill::SkillCommands,
    },

    /// Manage when you are available
    Availability {
        #[command(subcommand)]
        command: availability::AvailabilityCommands,
    },

    /// List public members, optionally filtered by skill
    Browse {
        /// Case-insensitive skill name fragment
        #[arg(long)]
        skill: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one member's profile
    User {
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Request and manage skill swaps
    Swap {
        #[command(subcommand)]
        command: swap::SwapCommands,
    },

    /// Leave and read feedback
    Feedback {
        #[command(subcommand)]
        command: feedback::FeedbackCommands,
    },

    /// Refresh your profile and the member directory from the server
    Sync {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a summary of local state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or change client settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    /// Command name for the event log; never includes arguments
    fn name(&self) -> &'static str {
        match self {
            Commands::Register { .. } => "register",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Whoami { .. } => "whoami",
            Commands::Profile { command } => command.name(),
            Commands::Skill { command } => command.name(),
            Commands::Availability { command } => command.name(),
            Commands::Browse { .. } => "browse",
            Commands::User { .. } => "user",
            Commands::Swap { command } => command.name(),
            Commands::Feedback { command } => command.name(),
            Commands::Sync { .. } => "sync",
            Commands::Status { .. } => "status",
            Commands::Config { command } => command.name(),
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command_name = cli.command.name();
    // Reading the log itself shouldn't add entries to it
    let logger = match cli.command {
        Commands::Logs { .. } => None,
        _ => commands::get_logger(),
    };

    match run(cli) {
        Ok(()) => {
            commands::log_event(
                &logger,
                LogEvent::new("command_executed").with_command(command_name),
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            let event = LogEvent::new("command_failed").with_command(command_name);
            let event = match e.downcast_ref::<Error>() {
                Some(core) => event.with_core_error(core),
                None => event.with_error(e.to_string()),
            };
            commands::log_event(&logger, event);

            output::error(&format!("Error: {:#}", e));
            if let Some(Error::NotAuthenticated) = e.downcast_ref::<Error>() {
                output::hint("Run 'swap login' or 'swap register' first.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register {
            email,
            name,
            location,
            password,
            json,
        } => auth::run_register(email, name, location, password, json),
        Commands::Login {
            email,
            password,
            json,
        } => auth::run_login(email, password, json),
        Commands::Logout => auth::run_logout(),
        Commands::Whoami { json } => auth::run_whoami(json),
        Commands::Profile { command } => profile::run(command),
        Commands::Skill { command } => skill::run(command),
        Commands::Availability { command } => availability::run(command),
        Commands::Browse { skill, json } => browse::run_browse(skill.as_deref(), json),
        Commands::User { id, json } => browse::run_user(&id, json),
        Commands::Swap { command } => swap::run(command),
        Commands::Feedback { command } => feedback::run(command),
        Commands::Sync { json } => sync::run(json),
        Commands::Status { json } => status::run(json),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}

//! CLI command implementations

pub mod auth;
pub mod availability;
pub mod browse;
pub mod config;
pub mod feedback;
pub mod logs;
pub mod profile;
pub mod skill;
pub mod status;
pub mod swap;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use skillswap_core::services::{EntryPoint, LogEvent, LoggingService};
use skillswap_core::{Error, SkillSwapContext, User};

/// Environment override for the data directory
const DATA_DIR_ENV: &str = "SKILLSWAP_DIR";

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Data directory from SKILLSWAP_DIR, or ~/.skillswap
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".skillswap"))
        .context("Could not find home directory; set SKILLSWAP_DIR")
}

pub fn get_context() -> Result<SkillSwapContext> {
    let data_dir = get_data_dir()?;
    SkillSwapContext::new(&data_dir).context("Failed to initialize SkillSwap")
}

/// The logged-in member, or NotAuthenticated
pub fn require_user(ctx: &SkillSwapContext) -> Result<User> {
    Ok(ctx.session.current_user().ok_or(Error::NotAuthenticated)?)
}

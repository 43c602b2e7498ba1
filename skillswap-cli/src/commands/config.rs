//! Config commands - view and change client settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use skillswap_core::config::{Config, API_URL_ENV};

use super::get_data_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Point the client at another API server
    SetApi {
        /// Base URL including the /api prefix, e.g. https://swap.example.com/api
        url: String,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

impl ConfigCommands {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigCommands::Show { .. } => "config show",
            ConfigCommands::SetApi { .. } => "config set-api",
        }
    }
}

pub fn run(command: ConfigCommands) -> Result<()> {
    // Works without opening the database
    let data_dir = get_data_dir()?;
    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&data_dir)?;
            if json {
                return output::print_json(&serde_json::json!({
                    "dataDir": data_dir,
                    "apiBaseUrl": config.api_base_url,
                    "apiUrlFromEnv": config.api_url_from_env,
                    "timeoutSecs": config.timeout_secs,
                }));
            }
            println!("Data directory: {}", data_dir.display());
            let source = if config.api_url_from_env {
                format!(" (from {})", API_URL_ENV).dimmed().to_string()
            } else {
                String::new()
            };
            println!("API server:     {}{}", config.api_base_url, source);
            println!("Timeout:        {}s", config.timeout_secs);
        }
        ConfigCommands::SetApi { url, timeout } => {
            let mut config = Config::load(&data_dir)?;
            config.set_api_base_url(&url)?;
            if let Some(secs) = timeout {
                config.timeout_secs = secs;
            }
            config.save(&data_dir)?;
            output::success(&format!("API server set to {}", config.api_base_url));
            if std::env::var(API_URL_ENV).is_ok() {
                output::warning(&format!(
                    "{} is set and will take precedence over this setting",
                    API_URL_ENV
                ));
            }
        }
    }
    Ok(())
}

//! SkillSwap Core - client state for a peer-to-peer skill-exchange platform
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (User, Skill, SwapRequest, Feedback, ...)
//! - **ports**: Traits for external collaborators (PartitionStore, RemoteApi)
//! - **services**: Business logic over the persisted stores
//! - **adapters**: Concrete implementations (DuckDB, HTTP)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;
pub mod store;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use adapters::duckdb::DuckDbPartitionStore;
use adapters::http::HttpApiClient;
use config::Config;
use ports::{PartitionStore, RemoteApi};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    Availability, Day, Feedback, NewSkill, ProfileUpdate, RatingSummary, RegisterRequest,
    RequestDirection, Skill, SkillKind, SwapRequest, SwapStatus, TimeSlot, User,
};

pub const DB_FILE: &str = "skillswap.duckdb";

/// Main context for SkillSwap operations
///
/// Owns the persisted stores and wires each service to the one store it is
/// responsible for. Front-ends hold one of these for their lifetime.
pub struct SkillSwapContext {
    pub config: Config,
    pub directory: Arc<DirectoryService>,
    pub session: Arc<SessionService>,
    pub swaps: Arc<SwapService>,
    pub feedback: Arc<FeedbackService>,
    pub status_service: StatusService,
    db_path: Option<std::path::PathBuf>,
}

impl SkillSwapContext {
    /// Open the local database in `data_dir` and connect to the configured API
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let config = Config::load(data_dir)?;

        let db_path = data_dir.join(DB_FILE);
        let store = DuckDbPartitionStore::new(&db_path)?;
        store.ensure_schema()?;

        let api = HttpApiClient::with_timeout(
            &config.api_base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        let mut context = Self::with_parts(config, Arc::new(store), Arc::new(api))?;
        context.db_path = Some(db_path);
        Ok(context)
    }

    /// Build a context from explicit collaborators
    pub fn with_parts(
        config: Config,
        store: Arc<dyn PartitionStore>,
        api: Arc<dyn RemoteApi>,
    ) -> Result<Self> {
        let directory = Arc::new(DirectoryService::new(store.clone(), api.clone())?);
        let session = Arc::new(SessionService::new(
            store.clone(),
            directory.clone(),
            api,
        )?);
        let swaps = Arc::new(SwapService::new(store.clone())?);
        let feedback = Arc::new(FeedbackService::new(store, swaps.clone())?);
        let status_service = StatusService::new(
            directory.clone(),
            session.clone(),
            swaps.clone(),
            feedback.clone(),
        );

        Ok(Self {
            config,
            directory,
            session,
            swaps,
            feedback,
            status_service,
            db_path: None,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Re-read the member's own record and the public directory from the server
    pub fn sync(&self) -> std::result::Result<SyncSummary, Error> {
        let token = self.session.token().ok_or(Error::NotAuthenticated)?;
        let me = self.session.refresh_current_user()?;
        let directory = self.directory.refresh(&token)?;
        Ok(SyncSummary {
            user_id: me.id,
            directory,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SyncSummary {
    pub user_id: String,
    pub directory: RefreshSummary,
}

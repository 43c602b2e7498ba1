//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on one store or feature area.

pub mod directory;
pub mod feedback;
pub mod logging;
pub mod migration;
pub mod session;
mod status;
pub mod swap;

#[cfg(test)]
pub(crate) mod testing;

pub use directory::{DirectoryService, RefreshSummary};
pub use feedback::{FeedbackService, NewFeedback};
pub use logging::{EntryPoint, LogEntry, LogEvent, LogStats, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use session::SessionService;
pub use status::{CurrentUserSummary, StatusService, StatusSummary, SwapCounts};
pub use swap::{SwapOutcome, SwapService};

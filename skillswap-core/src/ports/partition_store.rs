//! Partition store port - local persistence abstraction

use serde_json::Value as JsonValue;

use crate::domain::result::Result;

/// Partition holding the session (user id and bearer token)
pub const AUTH_PARTITION: &str = "auth-storage";
/// Partition holding the user directory
pub const USERS_PARTITION: &str = "users-storage";
/// Partition holding swap requests
pub const SWAP_REQUESTS_PARTITION: &str = "swap-requests-storage";
/// Partition holding feedback records
pub const FEEDBACKS_PARTITION: &str = "feedbacks-storage";

/// Local key-value persistence, one JSON document per named partition
///
/// Each save replaces the whole document; there are no partial writes.
pub trait PartitionStore: Send + Sync {
    /// Read a partition, `None` if it was never written
    fn load(&self, partition: &str) -> Result<Option<JsonValue>>;

    /// Replace a partition's document
    fn save(&self, partition: &str, value: &JsonValue) -> Result<()>;

    /// Remove a partition entirely
    fn clear(&self, partition: &str) -> Result<()>;
}

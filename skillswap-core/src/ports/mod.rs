//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod partition_store;
mod remote_api;

pub use partition_store::{
    PartitionStore, AUTH_PARTITION, FEEDBACKS_PARTITION, SWAP_REQUESTS_PARTITION, USERS_PARTITION,
};
pub use remote_api::RemoteApi;

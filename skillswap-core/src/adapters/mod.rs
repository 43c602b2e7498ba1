//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the PartitionStore port
//! - Blocking reqwest client for the RemoteApi port

pub mod duckdb;
pub mod http;

#[cfg(test)]
pub mod api_mock;

//! DuckDB partition store implementation

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use duckdb::{params, Connection};
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::ports::PartitionStore;
use crate::services::{MigrationResult, MigrationService};

impl From<duckdb::Error> for Error {
    fn from(err: duckdb::Error) -> Self {
        Error::Database(err.to_string())
    }
}

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
pub(crate) fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
        || lower.contains("could not set lock on file")
}

/// Row metadata for a stored partition
#[derive(Debug, Clone)]
pub struct PartitionInfo {
    pub name: String,
    pub revision: i64,
    pub size_bytes: usize,
}

/// Partition store backed by a single DuckDB file
pub struct DuckDbPartitionStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl DuckDbPartitionStore {
    /// Open (or create) the database file
    ///
    /// Retries with exponential backoff on file locking errors, which happen
    /// when two CLI invocations start at the same moment.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                        db_path: Some(db_path.to_path_buf()),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[skillswap] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::database(format!("Failed to open database after {} retries", MAX_RETRIES))
        }))
    }

    /// In-memory store, used by tests and dry runs
    pub fn in_memory() -> Result<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory_with_flags(config)?),
            db_path: None,
        })
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Extension autoloading stays off; nothing here needs extensions
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Ok(Connection::open_with_flags(db_path, config)?)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::database(format!("Lock poisoned: {}", e)))
    }

    /// Run pending schema migrations
    pub fn run_migrations(&self) -> Result<MigrationResult> {
        let conn = self.lock()?;
        MigrationService::new(&conn).run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    pub fn ensure_schema(&self) -> Result<()> {
        self.run_migrations()?;
        Ok(())
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Names, revisions and sizes of every stored partition
    pub fn list_partitions(&self) -> Result<Vec<PartitionInfo>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT partition_name, revision, length(document)
             FROM sys_partitions ORDER BY partition_name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PartitionInfo {
                name: row.get(0)?,
                revision: row.get(1)?,
                size_bytes: row.get::<_, i64>(2)? as usize,
            })
        })?;

        let mut partitions = Vec::new();
        for row in rows {
            partitions.push(row?);
        }
        Ok(partitions)
    }
}

impl PartitionStore for DuckDbPartitionStore {
    fn load(&self, partition: &str) -> Result<Option<JsonValue>> {
        let conn = self.lock()?;
        let document: Option<String> = match conn.query_row(
            "SELECT document FROM sys_partitions WHERE partition_name = ?",
            [partition],
            |row| row.get(0),
        ) {
            Ok(text) => Some(text),
            Err(duckdb::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        match document {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn save(&self, partition: &str, value: &JsonValue) -> Result<()> {
        let document = serde_json::to_string(value)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO sys_partitions (partition_name, document, revision, updated_at)
             VALUES (?, ?, 1, current_timestamp)
             ON CONFLICT (partition_name) DO UPDATE SET
                 document = excluded.document,
                 revision = revision + 1,
                 updated_at = current_timestamp",
            params![partition, document],
        )?;
        Ok(())
    }

    fn clear(&self, partition: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM sys_partitions WHERE partition_name = ?",
            [partition],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn memory_store() -> DuckDbPartitionStore {
        let store = DuckDbPartitionStore::in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn test_missing_partition_loads_as_none() {
        let store = memory_store();
        assert!(store.load("users-storage").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_whole_document() {
        let store = memory_store();
        store.save("users-storage", &json!([{"id": "u1"}])).unwrap();
        store.save("users-storage", &json!([{"id": "u2"}, {"id": "u3"}])).unwrap();

        let loaded = store.load("users-storage").unwrap().unwrap();
        assert_eq!(loaded, json!([{"id": "u2"}, {"id": "u3"}]));

        let partitions = store.list_partitions().unwrap();
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0].name, "users-storage");
        assert_eq!(partitions[0].revision, 2);
    }

    #[test]
    fn test_clear_removes_partition() {
        let store = memory_store();
        store.save("auth-storage", &json!({"userId": "u1"})).unwrap();
        store.clear("auth-storage").unwrap();
        assert!(store.load("auth-storage").unwrap().is_none());
        // clearing twice is fine
        store.clear("auth-storage").unwrap();
    }

    #[test]
    fn test_partitions_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skillswap.duckdb");
        {
            let store = DuckDbPartitionStore::new(&path).unwrap();
            store.ensure_schema().unwrap();
            store.save("feedbacks-storage", &json!([{"rating": 5}])).unwrap();
        }
        let store = DuckDbPartitionStore::new(&path).unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(
            store.load("feedbacks-storage").unwrap(),
            Some(json!([{"rating": 5}]))
        );
        assert_eq!(store.db_path(), Some(path.as_path()));
    }

    #[test]
    fn test_retryable_error_detection() {
        assert!(is_retryable_error("IO Error: Could not set lock on file \"x.duckdb\""));
        assert!(is_retryable_error("database is locked"));
        assert!(!is_retryable_error("Permission denied"));
    }
}

//! Persisted snapshots
//!
//! Each client-side store is one value of type `T` held behind an `Arc` and
//! written to a named partition on every change. Mutations build a new value
//! from a clone of the current one and swap it in only after it has been
//! persisted, so readers either see the old snapshot or the new one.

use std::sync::{Arc, Mutex, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::ports::PartitionStore;

pub struct PersistedSnapshot<T> {
    partition: &'static str,
    store: Arc<dyn PartitionStore>,
    current: RwLock<Arc<T>>,
    /// Serializes writers so two read-modify-write cycles cannot interleave
    write_lock: Mutex<()>,
}

impl<T> PersistedSnapshot<T>
where
    T: Clone + Default + Serialize + DeserializeOwned,
{
    /// Load `partition` from the store, or start from `T::default()`
    pub fn load(store: Arc<dyn PartitionStore>, partition: &'static str) -> Result<Self> {
        let initial = match store.load(partition)? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                Error::database(format!("partition {} is corrupt: {}", partition, e))
            })?,
            None => T::default(),
        };

        Ok(Self {
            partition,
            store,
            current: RwLock::new(Arc::new(initial)),
            write_lock: Mutex::new(()),
        })
    }

    pub fn partition(&self) -> &'static str {
        self.partition
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<T> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Build the next snapshot from the current one, persist it, then publish it.
    ///
    /// `f` may return an error to abort; nothing is written in that case.
    /// The closure's extra output `R` is handed back to the caller.
    pub fn replace<R>(&self, f: impl FnOnce(&T) -> Result<(T, R)>) -> Result<R> {
        let _writer = self
            .write_lock
            .lock()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;

        let current = self.snapshot();
        let (next, output) = f(&*current)?;

        let value = serde_json::to_value(&next)?;
        self.store.save(self.partition, &value)?;

        let mut guard = self
            .current
            .write()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;
        *guard = Arc::new(next);

        Ok(output)
    }

    /// Replace the snapshot with `value` unconditionally
    pub fn set(&self, value: T) -> Result<()> {
        self.replace(|_| Ok((value, ())))
    }

    /// Drop the partition and go back to `T::default()`
    pub fn reset(&self) -> Result<()> {
        let _writer = self
            .write_lock
            .lock()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;

        self.store.clear(self.partition)?;

        let mut guard = self
            .current
            .write()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;
        *guard = Arc::new(T::default());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory partition store for unit tests

    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde_json::Value as JsonValue;

    use crate::domain::result::{Error, Result};
    use crate::ports::PartitionStore;

    #[derive(Default)]
    pub struct MemoryPartitionStore {
        partitions: Mutex<HashMap<String, JsonValue>>,
        pub fail_writes: std::sync::atomic::AtomicBool,
    }

    impl PartitionStore for MemoryPartitionStore {
        fn load(&self, partition: &str) -> Result<Option<JsonValue>> {
            Ok(self.partitions.lock().unwrap().get(partition).cloned())
        }

        fn save(&self, partition: &str, value: &JsonValue) -> Result<()> {
            if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(Error::database("disk full"));
            }
            self.partitions
                .lock()
                .unwrap()
                .insert(partition.to_string(), value.clone());
            Ok(())
        }

        fn clear(&self, partition: &str) -> Result<()> {
            self.partitions.lock().unwrap().remove(partition);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::testing::MemoryPartitionStore;
    use super::*;

    fn numbers(store: &Arc<MemoryPartitionStore>) -> PersistedSnapshot<Vec<u32>> {
        let store: Arc<dyn PartitionStore> = store.clone();
        PersistedSnapshot::load(store, "numbers").unwrap()
    }

    #[test]
    fn test_starts_from_default() {
        let store = Arc::new(MemoryPartitionStore::default());
        let snap = numbers(&store);
        assert!(snap.snapshot().is_empty());
        assert_eq!(snap.partition(), "numbers");
    }

    #[test]
    fn test_replace_persists_and_reloads() {
        let store = Arc::new(MemoryPartitionStore::default());
        let snap = numbers(&store);
        let len = snap
            .replace(|cur| {
                let mut next = cur.clone();
                next.push(7);
                let len = next.len();
                Ok((next, len))
            })
            .unwrap();
        assert_eq!(len, 1);

        let reloaded = numbers(&store);
        assert_eq!(*reloaded.snapshot(), vec![7]);
    }

    #[test]
    fn test_old_snapshot_survives_replace() {
        let store = Arc::new(MemoryPartitionStore::default());
        let snap = numbers(&store);
        snap.set(vec![1, 2]).unwrap();

        let before = snap.snapshot();
        snap.set(vec![3]).unwrap();
        assert_eq!(*before, vec![1, 2]);
        assert_eq!(*snap.snapshot(), vec![3]);
    }

    #[test]
    fn test_failed_closure_changes_nothing() {
        let store = Arc::new(MemoryPartitionStore::default());
        let snap = numbers(&store);
        snap.set(vec![1]).unwrap();

        let result: Result<()> = snap.replace(|_| Err(Error::validation("nope")));
        assert!(result.is_err());
        assert_eq!(*snap.snapshot(), vec![1]);
    }

    #[test]
    fn test_failed_write_keeps_previous_snapshot() {
        let store = Arc::new(MemoryPartitionStore::default());
        let snap = numbers(&store);
        snap.set(vec![1]).unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        assert!(snap.set(vec![2]).is_err());
        assert_eq!(*snap.snapshot(), vec![1]);
    }

    #[test]
    fn test_reset_removes_partition() {
        let store = Arc::new(MemoryPartitionStore::default());
        let snap = numbers(&store);
        snap.set(vec![4, 2]).unwrap();

        snap.reset().unwrap();
        assert!(snap.snapshot().is_empty());
        assert_eq!(store.load("numbers").unwrap(), None);
        assert!(numbers(&store).snapshot().is_empty());
    }

    #[test]
    fn test_corrupt_partition_is_reported() {
        let store = Arc::new(MemoryPartitionStore::default());
        store
            .save("numbers", &serde_json::json!({"not": "a list"}))
            .unwrap();
        let dyn_store: Arc<dyn PartitionStore> = store.clone();
        let result = PersistedSnapshot::<Vec<u32>>::load(dyn_store, "numbers");
        assert!(matches!(result, Err(Error::Database(_))));
    }
}

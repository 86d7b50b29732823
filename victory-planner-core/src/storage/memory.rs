use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{KeyValueStorage, StorageError};

/// In-memory key/value storage for tests and throwaway sessions.
///
/// Clones share the same map, so a store and an identity provider built from
/// clones of one `MemoryStorage` see each other's writes.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_values() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set("key", "value").unwrap();
        assert_eq!(other.get("key").unwrap(), Some("value".to_string()));

        other.set("key", "changed").unwrap();
        assert_eq!(storage.get("key").unwrap(), Some("changed".to_string()));
    }
}

//! Device identity.
//!
//! Every record the planner writes is tagged with the identity of the device
//! that created it. The identity is generated once, stored under
//! `victory_planner_user_id`, and reused until a sync code from another device
//! replaces it.
//!
//! # Lifecycle
//!
//! 1. **Unset** - nothing stored (or an empty string); the next
//!    [`IdentityProvider::get_identity`] generates and stores a new value.
//! 2. **Set** - the stored value is returned unchanged on every call.
//! 3. **Overwritten** - [`IdentityProvider::set_identity`] stores the identity
//!    carried by an imported snapshot.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::storage::{namespaced, KeyValueStorage};

/// Storage key (without namespace) holding the identity.
const IDENTITY_KEY: &str = "user_id";

/// Length of the random suffix of a generated identity.
const RANDOM_SUFFIX_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque per-device owner tag.
///
/// Serializes as a bare string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh identity of the form `user_<unix-millis>_<base36>`.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let mut rng = rand::rng();
        let suffix: String = (0..RANDOM_SUFFIX_LEN)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect();

        Self(format!("user_{}_{}", millis, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Identity> for serde_json::Value {
    fn from(identity: Identity) -> Self {
        serde_json::Value::String(identity.0)
    }
}

impl From<&Identity> for serde_json::Value {
    fn from(identity: &Identity) -> Self {
        serde_json::Value::String(identity.0.clone())
    }
}

/// Produces and persists the device identity.
///
/// Storage failures never surface: a failed read yields the empty identity for
/// that call, and a failed write still returns the freshly generated value.
#[derive(Debug, Clone)]
pub struct IdentityProvider<S> {
    storage: S,
}

impl<S: KeyValueStorage> IdentityProvider<S> {
    /// Create a new identity provider over the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the stored identity, generating and storing one on first use.
    pub fn get_identity(&self) -> Identity {
        let key = namespaced(IDENTITY_KEY);

        match self.storage.get(&key) {
            Ok(Some(value)) if !value.is_empty() => return Identity(value),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to read identity: {}", e);
                return Identity::default();
            }
        }

        let identity = Identity::generate();
        if let Err(e) = self.storage.set(&key, identity.as_str()) {
            tracing::warn!("Failed to persist new identity: {}", e);
        } else {
            tracing::info!("Created identity {}", identity);
        }

        identity
    }

    /// Overwrites the stored identity.
    pub fn set_identity(&self, identity: &Identity) {
        if let Err(e) = self
            .storage
            .set(&namespaced(IDENTITY_KEY), identity.as_str())
        {
            tracing::warn!("Failed to persist identity {}: {}", identity, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FailingStorage;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    #[test]
    fn test_generate_format() {
        let identity = Identity::generate();
        let parts: Vec<&str> = identity.as_str().splitn(3, '_').collect();

        assert_eq!(parts[0], "user");
        assert!(parts[1].parse::<u128>().is_ok());
        assert_eq!(parts[2].len(), RANDOM_SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_unique() {
        assert_ne!(Identity::generate(), Identity::generate());
    }

    #[test]
    fn test_get_identity_is_stable() {
        let provider = IdentityProvider::new(MemoryStorage::new());

        let first = provider.get_identity();
        let second = provider.get_identity();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_identity_persists_across_instances() {
        let temp = TempDir::new().unwrap();

        let first = IdentityProvider::new(FileStorage::new(temp.path().to_path_buf()))
            .get_identity();
        let second = IdentityProvider::new(FileStorage::new(temp.path().to_path_buf()))
            .get_identity();

        assert_eq!(first, second);
    }

    #[test]
    fn test_set_identity_overwrites() {
        let provider = IdentityProvider::new(MemoryStorage::new());
        provider.get_identity();

        provider.set_identity(&Identity::new("user_imported"));

        assert_eq!(provider.get_identity().as_str(), "user_imported");
    }

    #[test]
    fn test_empty_stored_value_is_replaced() {
        let storage = MemoryStorage::new();
        storage.set("victory_planner_user_id", "").unwrap();

        let identity = IdentityProvider::new(storage.clone()).get_identity();

        assert!(!identity.is_empty());
        assert_eq!(
            storage.get("victory_planner_user_id").unwrap(),
            Some(identity.as_str().to_string())
        );
    }

    #[test]
    fn test_read_failure_yields_empty_identity() {
        let provider = IdentityProvider::new(FailingStorage);
        assert!(provider.get_identity().is_empty());

        // Does not panic.
        provider.set_identity(&Identity::new("user_x"));
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let json = serde_json::to_string(&Identity::new("user_1")).unwrap();
        assert_eq!(json, "\"user_1\"");
    }
}

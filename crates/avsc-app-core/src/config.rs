// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port for avsc tools.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

/// Key under which the transform's [`avsc_graph::StylePolicy`] is stored.
pub const STYLE_KEY: &str = "style";
/// Key under which [`crate::render_options::RenderOptions`] are stored.
pub const RENDER_OPTIONS_KEY: &str = "render";

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The platform has no usable config directory (e.g. no home dir).
    #[error("could not resolve a config directory")]
    NoConfigDir,
}

/// In-memory store, for tests and `--no-config` runs.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

/// Serializes config values as JSON and delegates storage to a `ConfigStore`.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Load `key`, falling back to `T::default()` when it is missing or unreadable.
    pub fn load_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(err) => {
                warn!(key, error = %err, "config unreadable; using defaults");
                T::default()
            }
        }
    }

    /// Serialize and persist a config value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avsc_graph::StylePolicy;

    #[test]
    fn missing_key_is_none_and_defaults() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        assert!(matches!(svc.load::<StylePolicy>(STYLE_KEY), Ok(None)));
        assert_eq!(svc.load_or_default::<StylePolicy>(STYLE_KEY), StylePolicy::default());
    }

    #[test]
    fn save_then_load() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        let mut style = StylePolicy::default();
        style.min_font_size = 12;
        assert!(svc.save(STYLE_KEY, &style).is_ok());
        assert_eq!(svc.load_or_default::<StylePolicy>(STYLE_KEY), style);
    }

    #[test]
    fn corrupt_blob_errors_but_defaults_on_request() {
        let store = MemoryConfigStore::new();
        assert!(store.save_raw(STYLE_KEY, b"{oops").is_ok());
        let svc = ConfigService::new(store);
        assert!(matches!(svc.load::<StylePolicy>(STYLE_KEY), Err(ConfigError::Serde(_))));
        assert_eq!(svc.load_or_default::<StylePolicy>(STYLE_KEY), StylePolicy::default());
    }

    #[test]
    fn empty_blob_reads_as_missing() {
        let store = MemoryConfigStore::new();
        assert!(store.save_raw(STYLE_KEY, b"").is_ok());
        let svc = ConfigService::new(store);
        assert!(matches!(svc.load::<StylePolicy>(STYLE_KEY), Ok(None)));
    }
}

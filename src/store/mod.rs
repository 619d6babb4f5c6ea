use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("store contents are not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage that survives restarts.
///
/// Every manager in this crate writes its whole state under one fixed key, so
/// implementations only need whole-value reads and overwrites.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Reads and parses the value under `key`.
///
/// Missing keys, store failures and malformed json all come back as `None`;
/// the failures are logged.
pub(crate) fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("failed to read {} from store: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(data) => Some(data),
        Err(e) => {
            log::warn!("discarding malformed {} data: {}", key, e);
            None
        }
    }
}

/// Serializes `data` and writes it under `key`, logging instead of returning
/// any failure.
pub(crate) fn save_json<T, S>(store: &mut S, key: &str, data: &T)
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let result = serde_json::to_string(data)
        .map_err(StoreError::from)
        .and_then(|serialized| store.set(key, &serialized));
    if let Err(e) = result {
        log::warn!("failed to save {} to store: {}", key, e);
    }
}

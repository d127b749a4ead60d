use std::collections::HashMap;

use crate::error::StorageError;
use crate::history::HistoryLog;

/// Durable client-side key/value slots (browser localStorage in the wasm
/// build, memory elsewhere).
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn read_history(storage: &dyn Storage, key: &str, capacity: usize) -> Result<HistoryLog, StorageError> {
    let raw = match storage.get(key)? {
        Some(raw) => raw,
        None => return Ok(HistoryLog::new(capacity)),
    };
    let entries: Vec<String> = serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })?;
    Ok(HistoryLog::from_entries(entries, capacity))
}

/// Load the persisted history. Unreadable or corrupt slots give an empty
/// log - storage trouble never reaches the user.
pub fn load_history(storage: &dyn Storage, key: &str, capacity: usize) -> HistoryLog {
    read_history(storage, key, capacity).unwrap_or_else(|e| {
        tracing::warn!("failed to load history: {}", e);
        HistoryLog::new(capacity)
    })
}

pub fn save_history(storage: &mut dyn Storage, key: &str, log: &HistoryLog) {
    let json = match serde_json::to_string(&log.to_vec()) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("failed to encode history: {}", e);
            return;
        }
    };
    if let Err(e) = storage.set(key, &json) {
        tracing::warn!("failed to save history: {}", e);
    }
}

/// First visit if the flag is missing or storage can't be read.
pub fn has_visited(storage: &dyn Storage, key: &str) -> bool {
    match storage.get(key) {
        Ok(flag) => flag.is_some(),
        Err(e) => {
            tracing::warn!("failed to read visit flag: {}", e);
            false
        }
    }
}

pub fn mark_visited(storage: &mut dyn Storage, key: &str) {
    if let Err(e) = storage.set(key, "true") {
        tracing::warn!("failed to store visit flag: {}", e);
    }
}

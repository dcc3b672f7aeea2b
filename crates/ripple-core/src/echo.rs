//! Local Echo: a per-browser list of strings that resets to a seed message
//! once the stored reset stamp is a full day old. The check runs only when
//! the board is loaded; there is no timer.

use crate::constants::{
    ECHO_MESSAGE, ECHO_RESET_INTERVAL_MS, ECHO_STORAGE_KEY, ECHO_TIMESTAMP_KEY,
};
use crate::error::StorageError;
use crate::outcome::Outcome;
use fnv::FnvHashMap;

/// String key/value persistence (browser `localStorage` in production).
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: FnvHashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

/// Compare the stored stamp against the reset window. A missing or
/// unreadable stamp is stale; a stamp from the future is fresh.
pub fn freshness(last_reset: Option<&str>, now_ms: i64) -> Freshness {
    match last_reset.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(last) if now_ms.saturating_sub(last) < ECHO_RESET_INTERVAL_MS => Freshness::Fresh,
        _ => Freshness::Stale,
    }
}

pub struct EchoBoard<S: KeyValueStorage> {
    storage: S,
    entries: Vec<String>,
}

impl<S: KeyValueStorage> EchoBoard<S> {
    /// Load at application start, resetting to the seed when stale.
    pub fn load(storage: S, now_ms: i64) -> (Self, Freshness) {
        let state = freshness(storage.get(ECHO_TIMESTAMP_KEY).as_deref(), now_ms);
        let entries = match state {
            Freshness::Stale => {
                log::info!("[echo] window elapsed, reset to seed");
                vec![ECHO_MESSAGE.to_string()]
            }
            Freshness::Fresh => storage
                .get(ECHO_STORAGE_KEY)
                .and_then(|raw| match serde_json::from_str::<Vec<String>>(&raw) {
                    Ok(list) => Some(list),
                    Err(e) => {
                        log::warn!("[echo] stored list unreadable: {}", e);
                        None
                    }
                })
                .unwrap_or_default(),
        };
        let mut board = Self { storage, entries };
        // Stamp only once the seed list is stored, so a failed write is
        // retried on the next load instead of reviving the old list.
        if state == Freshness::Stale && board.persist() {
            if let Err(e) = board.storage.set(ECHO_TIMESTAMP_KEY, &now_ms.to_string()) {
                log::warn!("[echo] could not stamp reset: {}", e);
            }
        }
        (board, state)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append as typed; whitespace-only input is ignored.
    pub fn submit(&mut self, text: &str) -> Outcome {
        if text.trim().is_empty() {
            return Outcome::RejectedEmptyInput;
        }
        self.entries.push(text.to_string());
        self.persist();
        Outcome::Ok(None)
    }

    /// Remove by position; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        self.persist();
        true
    }

    fn persist(&mut self) -> bool {
        match serde_json::to_string(&self.entries) {
            Ok(raw) => match self.storage.set(ECHO_STORAGE_KEY, &raw) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("[echo] could not persist list: {}", e);
                    false
                }
            },
            Err(e) => {
                log::warn!("[echo] could not encode list: {}", e);
                false
            }
        }
    }
}

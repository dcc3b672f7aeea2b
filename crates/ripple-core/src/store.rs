//! Realtime store abstraction.
//!
//! The store owns persistence, fan-out and id assignment. Clients append
//! records, delete by key, and receive a full snapshot of the watched
//! collection whenever it changes. There is no ordering guarantee between
//! writers; the last snapshot received is the truth.

use crate::error::StoreError;
use crate::ripple::{Ripple, RippleId, RippleRecord};
use serde_json::Value;

/// Scope of a live subscription: the last `limit_to_last` keys under `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub path: String,
    pub limit_to_last: u32,
}

impl Query {
    pub fn last(path: &str, limit_to_last: u32) -> Self {
        Self {
            path: path.to_string(),
            limit_to_last,
        }
    }
}

/// Full contents of a watched collection at one instant, in key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub entries: Vec<(RippleId, Value)>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &RippleId) -> bool {
        self.entries.iter().any(|(k, _)| k == id)
    }

    /// Decode every child, keeping its id. Never drops an entry.
    pub fn decode(&self) -> Vec<Ripple> {
        self.entries
            .iter()
            .map(|(id, value)| Ripple::from_value(id.clone(), value))
            .collect()
    }
}

pub type SnapshotCallback = Box<dyn FnMut(Snapshot)>;
pub type LostCallback = Box<dyn FnMut(StoreError)>;

/// Live subscription handle. Dropping it unsubscribes synchronously.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to tear down.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

pub trait RealtimeStore {
    /// Append a record under `path`; returns the key the record will live at.
    fn push(&self, path: &str, record: &RippleRecord) -> Result<RippleId, StoreError>;

    /// Delete one child by key. Deleting a missing key is not an error.
    fn remove(&self, path: &str, id: &RippleId) -> Result<(), StoreError>;

    /// Watch a collection. `on_snapshot` receives the current contents once
    /// the subscription is established and again after every change.
    fn subscribe(
        &self,
        query: Query,
        on_snapshot: SnapshotCallback,
        on_lost: LostCallback,
    ) -> Result<Subscription, StoreError>;
}

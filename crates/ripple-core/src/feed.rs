//! In-memory view of the shared collection, replaced wholesale on every
//! snapshot. Never diffed, never patched locally.

use crate::error::StoreError;
use crate::outcome::Outcome;
use crate::ripple::{Ripple, RippleId};
use crate::store::{Query, RealtimeStore, Snapshot, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SyncStatus {
    #[default]
    Connecting,
    Live,
    Lost(StoreError),
}

#[derive(Clone, Debug, Default)]
pub struct RippleFeed {
    ripples: Vec<Ripple>,
    status: SyncStatus,
    snapshots: u64,
}

impl RippleFeed {
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        self.ripples = snapshot.decode();
        self.status = SyncStatus::Live;
        self.snapshots += 1;
    }

    pub fn mark_lost(&mut self, err: StoreError) -> Outcome {
        log::warn!("[feed] subscription lost: {}", err);
        self.status = SyncStatus::Lost(err);
        Outcome::SubscriptionLost
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn get(&self, id: &RippleId) -> Option<&Ripple> {
        self.ripples.iter().find(|r| &r.id == id)
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn snapshots_received(&self) -> u64 {
        self.snapshots
    }
}

/// Shared handle to the feed. Store callbacks write through it, so no
/// borrow is ever held across a store call.
#[derive(Clone, Debug, Default)]
pub struct SharedFeed {
    inner: Rc<RefCell<RippleFeed>>,
}

impl SharedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching `query`. Keep the returned handle for as long as the
    /// scene is mounted.
    pub fn connect(
        &self,
        store: &dyn RealtimeStore,
        query: Query,
    ) -> Result<Subscription, StoreError> {
        let on_snapshot = {
            let feed = self.inner.clone();
            Box::new(move |snapshot: Snapshot| {
                feed.borrow_mut().apply_snapshot(&snapshot);
            })
        };
        let on_lost = {
            let feed = self.inner.clone();
            Box::new(move |err: StoreError| {
                feed.borrow_mut().mark_lost(err);
            })
        };
        log::info!(
            "[feed] subscribing to {} (last {})",
            query.path,
            query.limit_to_last
        );
        store.subscribe(query, on_snapshot, on_lost)
    }

    /// Fire-and-forget delete. The ripple stays visible until a snapshot
    /// without it arrives; ids not in the current list are ignored.
    pub fn delete(&self, store: &dyn RealtimeStore, path: &str, id: &RippleId) -> Outcome {
        let known = self.inner.borrow().get(id).is_some();
        if !known {
            log::debug!("[feed] delete of unknown ripple {} ignored", id);
            return Outcome::Ok(None);
        }
        match store.remove(path, id) {
            Ok(()) => Outcome::Ok(Some(id.clone())),
            Err(e) => {
                log::warn!("[feed] delete {} failed: {}", id, e);
                Outcome::StoreWriteFailed
            }
        }
    }

    pub fn with<T>(&self, f: impl FnOnce(&RippleFeed) -> T) -> T {
        f(&self.inner.borrow())
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn ids(&self) -> Vec<RippleId> {
        self.inner
            .borrow()
            .ripples()
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }

    pub fn status(&self) -> SyncStatus {
        self.inner.borrow().status().clone()
    }
}

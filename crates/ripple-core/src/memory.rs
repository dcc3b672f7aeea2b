//! In-process [`RealtimeStore`]: used by tests and as the offline sandbox
//! when no database URL is configured. Single-threaded by construction.

use crate::error::StoreError;
use crate::push_id::PushIdGenerator;
use crate::ripple::{RippleId, RippleRecord};
use crate::store::{LostCallback, Query, RealtimeStore, Snapshot, SnapshotCallback, Subscription};
use fnv::FnvHashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

struct Subscriber {
    query: Query,
    on_snapshot: Rc<RefCell<SnapshotCallback>>,
    on_lost: Rc<RefCell<LostCallback>>,
}

struct Inner {
    collections: FnvHashMap<String, BTreeMap<RippleId, Value>>,
    subscribers: FnvHashMap<u64, Subscriber>,
    next_subscriber: u64,
    ids: PushIdGenerator<StdRng>,
    clock_ms: i64,
    dispatching: bool,
    pending: VecDeque<String>,
    reject_writes: Option<StoreError>,
}

impl Inner {
    fn snapshot(&self, query: &Query) -> Snapshot {
        let Some(children) = self.collections.get(&query.path) else {
            return Snapshot::default();
        };
        let skip = children.len().saturating_sub(query.limit_to_last as usize);
        Snapshot {
            entries: children
                .iter()
                .skip(skip)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

#[derive(Clone)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(0)
    }
}

impl MemoryStore {
    /// `seed` drives the random half of generated keys.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                collections: FnvHashMap::default(),
                subscribers: FnvHashMap::default(),
                next_subscriber: 0,
                ids: PushIdGenerator::new(StdRng::seed_from_u64(seed)),
                clock_ms: 0,
                dispatching: false,
                pending: VecDeque::new(),
                reject_writes: None,
            })),
        }
    }

    /// Wall clock used for generated keys. Advances by one per push otherwise.
    pub fn set_clock(&self, now_ms: i64) {
        self.inner.borrow_mut().clock_ms = now_ms;
    }

    /// Make every subsequent push/remove fail with `err` (or succeed again with `None`).
    pub fn reject_writes(&self, err: Option<StoreError>) {
        self.inner.borrow_mut().reject_writes = err;
    }

    pub fn len(&self, path: &str) -> usize {
        self.inner
            .borrow()
            .collections
            .get(path)
            .map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, path: &str) -> bool {
        self.len(path) == 0
    }

    pub fn get(&self, path: &str, id: &RippleId) -> Option<Value> {
        self.inner
            .borrow()
            .collections
            .get(path)
            .and_then(|c| c.get(id).cloned())
    }

    /// Write a raw child, bypassing id generation. Mirrors another client's
    /// write or a hand-edited record.
    pub fn insert_raw(&self, path: &str, id: &RippleId, value: Value) {
        self.inner
            .borrow_mut()
            .collections
            .entry(path.to_string())
            .or_default()
            .insert(id.clone(), value);
        self.notify(path);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Drop every live subscription as if the connection went away.
    pub fn disconnect(&self) {
        let lost: Vec<Rc<RefCell<LostCallback>>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.drain().map(|(_, s)| s.on_lost).collect()
        };
        for cb in lost {
            if let Ok(mut cb) = cb.try_borrow_mut() {
                (cb)(StoreError::Closed);
            }
        }
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        match &self.inner.borrow().reject_writes {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    // Notifications raised from inside a callback are queued and drained by
    // the outermost dispatch so callbacks never re-enter.
    fn notify(&self, path: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.pending.push_back(path.to_string());
            if inner.dispatching {
                return;
            }
            inner.dispatching = true;
        }
        self.drain();
    }

    // Runs with `dispatching` set; clears it once the queue is empty.
    fn drain(&self) {
        loop {
            let next = self.inner.borrow_mut().pending.pop_front();
            let Some(path) = next else { break };
            let targets: Vec<(u64, Rc<RefCell<SnapshotCallback>>, Snapshot)> = {
                let inner = self.inner.borrow();
                inner
                    .subscribers
                    .iter()
                    .filter(|(_, s)| s.query.path == path)
                    .map(|(id, s)| (*id, s.on_snapshot.clone(), inner.snapshot(&s.query)))
                    .collect()
            };
            for (id, cb, snapshot) in targets {
                if !self.inner.borrow().subscribers.contains_key(&id) {
                    continue;
                }
                if let Ok(mut cb) = cb.try_borrow_mut() {
                    (cb)(snapshot);
                }
            }
        }
        self.inner.borrow_mut().dispatching = false;
    }
}

impl RealtimeStore for MemoryStore {
    fn push(&self, path: &str, record: &RippleRecord) -> Result<RippleId, StoreError> {
        self.check_writable()?;
        let value = serde_json::to_value(record)?;
        let id = {
            let mut inner = self.inner.borrow_mut();
            let now = inner.clock_ms;
            inner.clock_ms += 1;
            let id = inner.ids.next_id(now);
            inner
                .collections
                .entry(path.to_string())
                .or_default()
                .insert(id.clone(), value);
            id
        };
        log::debug!("[memory] push {}/{}", path, id);
        self.notify(path);
        Ok(id)
    }

    fn remove(&self, path: &str, id: &RippleId) -> Result<(), StoreError> {
        self.check_writable()?;
        let removed = self
            .inner
            .borrow_mut()
            .collections
            .get_mut(path)
            .and_then(|c| c.remove(id))
            .is_some();
        if removed {
            log::debug!("[memory] remove {}/{}", path, id);
            self.notify(path);
        }
        Ok(())
    }

    fn subscribe(
        &self,
        query: Query,
        on_snapshot: SnapshotCallback,
        on_lost: LostCallback,
    ) -> Result<Subscription, StoreError> {
        let on_snapshot = Rc::new(RefCell::new(on_snapshot));
        let (id, initial) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_subscriber;
            inner.next_subscriber += 1;
            let initial = inner.snapshot(&query);
            inner.subscribers.insert(
                id,
                Subscriber {
                    query,
                    on_snapshot: on_snapshot.clone(),
                    on_lost: Rc::new(RefCell::new(on_lost)),
                },
            );
            (id, initial)
        };
        // The initial snapshot counts as a dispatch: writes made from it
        // are queued and delivered once it returns.
        let nested = std::mem::replace(&mut self.inner.borrow_mut().dispatching, true);
        if let Ok(mut cb) = on_snapshot.try_borrow_mut() {
            (cb)(initial);
        }
        if !nested {
            self.drain();
        }
        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().subscribers.remove(&id);
            }
        }))
    }
}

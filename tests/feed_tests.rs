// Tests for the live feed against the in-memory realtime store.

use ripple_core::{
    MemoryStore, Outcome, Query, RealtimeStore, RippleId, RippleRecord, SharedFeed, StoreError,
    Snapshot, SyncStatus,
};
use serde_json::json;

const PATH: &str = "ripples";

fn push_text(store: &MemoryStore, text: &str) -> RippleId {
    store
        .push(
            PATH,
            &RippleRecord::text(text, glam::Vec3::ZERO, glam::Vec3::ZERO, 0),
        )
        .unwrap()
}

#[test]
fn initial_snapshot_marks_the_feed_live() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    assert_eq!(feed.status(), SyncStatus::Connecting);
    let _sub = feed.connect(&store, Query::last(PATH, 10)).unwrap();
    assert_eq!(feed.status(), SyncStatus::Live);
    assert!(feed.is_empty());
}

#[test]
fn every_write_replaces_the_whole_list() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    let _sub = feed.connect(&store, Query::last(PATH, 10)).unwrap();
    let a = push_text(&store, "a");
    let b = push_text(&store, "b");
    assert_eq!(feed.ids(), vec![a.clone(), b]);
    assert_eq!(feed.with(|f| f.snapshots_received()), 3);
    assert_eq!(
        feed.with(|f| f.get(&a).and_then(|r| r.text().map(str::to_string))),
        Some("a".to_string())
    );
}

#[test]
fn only_the_last_n_keys_are_visible() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    let _sub = feed.connect(&store, Query::last(PATH, 3)).unwrap();
    let ids: Vec<RippleId> = (0..5).map(|i| push_text(&store, &i.to_string())).collect();
    assert_eq!(feed.ids(), ids[2..].to_vec());
    assert_eq!(store.len(PATH), 5);
}

#[test]
fn delete_is_visible_after_the_next_snapshot() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    let _sub = feed.connect(&store, Query::last(PATH, 10)).unwrap();
    let a = push_text(&store, "a");
    let b = push_text(&store, "b");
    assert_eq!(feed.delete(&store, PATH, &a), Outcome::Ok(Some(a.clone())));
    assert_eq!(feed.ids(), vec![b]);
    assert!(store.get(PATH, &a).is_none());
}

#[test]
fn deleting_an_unknown_id_skips_the_store() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    let _sub = feed.connect(&store, Query::last(PATH, 10)).unwrap();
    push_text(&store, "a");
    store.reject_writes(Some(StoreError::Http(500)));
    assert_eq!(
        feed.delete(&store, PATH, &RippleId::new("nope")),
        Outcome::Ok(None)
    );
    assert_eq!(feed.len(), 1);
}

#[test]
fn failed_delete_keeps_the_ripple() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    let _sub = feed.connect(&store, Query::last(PATH, 10)).unwrap();
    let a = push_text(&store, "a");
    store.reject_writes(Some(StoreError::Http(401)));
    assert_eq!(feed.delete(&store, PATH, &a), Outcome::StoreWriteFailed);
    assert_eq!(feed.ids(), vec![a]);
}

#[test]
fn dropping_the_subscription_stops_updates() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    let sub = feed.connect(&store, Query::last(PATH, 10)).unwrap();
    assert_eq!(store.subscriber_count(), 1);
    drop(sub);
    assert_eq!(store.subscriber_count(), 0);
    push_text(&store, "after");
    assert!(feed.is_empty());
}

#[test]
fn explicit_unsubscribe_matches_drop() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    feed.connect(&store, Query::last(PATH, 10))
        .unwrap()
        .unsubscribe();
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn malformed_children_keep_their_ids() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    let _sub = feed.connect(&store, Query::last(PATH, 10)).unwrap();
    store.insert_raw(PATH, &RippleId::new("a-bad"), json!("just a string"));
    store.insert_raw(PATH, &RippleId::new("b-num"), json!(42));
    store.insert_raw(PATH, &RippleId::new("c-good"), json!({"text": "ok"}));
    assert_eq!(
        feed.ids(),
        vec![
            RippleId::new("a-bad"),
            RippleId::new("b-num"),
            RippleId::new("c-good")
        ]
    );
    feed.with(|f| {
        assert_eq!(f.ripples()[0].text(), Some(""));
        assert_eq!(f.ripples()[2].text(), Some("ok"));
    });
}

#[test]
fn other_collections_do_not_notify() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    let _sub = feed.connect(&store, Query::last(PATH, 10)).unwrap();
    store.insert_raw("elsewhere", &RippleId::new("x"), json!({"text": "hidden"}));
    assert!(feed.is_empty());
    assert_eq!(feed.with(|f| f.snapshots_received()), 1);
}

#[test]
fn lost_connection_is_reported() {
    let store = MemoryStore::new(1);
    let feed = SharedFeed::new();
    let _sub = feed.connect(&store, Query::last(PATH, 10)).unwrap();
    push_text(&store, "kept");
    store.disconnect();
    assert_eq!(feed.status(), SyncStatus::Lost(StoreError::Closed));
    // Last known list stays on screen.
    assert_eq!(feed.len(), 1);
}

#[test]
fn two_clients_converge() {
    let store = MemoryStore::new(1);
    let left = SharedFeed::new();
    let right = SharedFeed::new();
    let _l = left.connect(&store, Query::last(PATH, 10)).unwrap();
    let _r = right.connect(&store, Query::last(PATH, 10)).unwrap();
    let a = push_text(&store, "from left");
    right.delete(&store, PATH, &a);
    push_text(&store, "from right");
    assert_eq!(left.ids(), right.ids());
    assert_eq!(left.len(), 1);
}

#[test]
fn write_from_the_first_snapshot_is_delivered() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let store = MemoryStore::new(1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let writer = store.clone();
    let seen_cb = seen.clone();
    let _sub = store
        .subscribe(
            Query::last(PATH, 10),
            Box::new(move |snap: Snapshot| {
                let first = seen_cb.borrow().is_empty();
                seen_cb.borrow_mut().push(snap.len());
                if first {
                    push_text(&writer, "from callback");
                }
            }),
            Box::new(|_: StoreError| {}),
        )
        .unwrap();
    assert_eq!(store.len(PATH), 1);
    assert_eq!(*seen.borrow(), vec![0, 1]);
}

#[test]
fn writes_from_a_callback_are_queued_until_it_returns() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let store = MemoryStore::new(1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let writer = store.clone();
    let seen_cb = seen.clone();
    let _sub = store
        .subscribe(
            Query::last(PATH, 10),
            Box::new(move |snap: Snapshot| {
                seen_cb.borrow_mut().push(snap.len());
                if snap.len() == 1 {
                    push_text(&writer, "echo");
                }
            }),
            Box::new(|_: StoreError| {}),
        )
        .unwrap();
    push_text(&store, "first");
    assert_eq!(store.len(PATH), 2);
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
}

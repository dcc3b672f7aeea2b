// Tests for folding REST streaming events into whole-collection snapshots.

use ripple_core::stream::{EVENT_CANCEL, EVENT_KEEP_ALIVE, EVENT_PATCH, EVENT_PUT};
use ripple_core::{Query, RestEndpoint, RippleId, StoreError, StreamCache, StreamEvent};
use serde_json::json;

fn apply(cache: &mut StreamCache, event: &str, data: &str) -> Option<Vec<String>> {
    let event = StreamEvent::parse(event, data).unwrap();
    cache.apply(event).unwrap().map(|snap| {
        snap.entries
            .iter()
            .map(|(k, _)| k.as_str().to_string())
            .collect()
    })
}

#[test]
fn root_put_replaces_everything() {
    let mut cache = StreamCache::new(10);
    let keys = apply(
        &mut cache,
        EVENT_PUT,
        r#"{"path":"/","data":{"b":{"text":"y"},"a":{"text":"x"}}}"#,
    );
    assert_eq!(keys, Some(vec!["a".into(), "b".into()]));

    let keys = apply(&mut cache, EVENT_PUT, r#"{"path":"/","data":{"c":{"text":"z"}}}"#);
    assert_eq!(keys, Some(vec!["c".into()]));
}

#[test]
fn empty_collection_arrives_as_null() {
    let mut cache = StreamCache::new(10);
    let keys = apply(&mut cache, EVENT_PUT, r#"{"path":"/","data":null}"#);
    assert_eq!(keys, Some(vec![]));
    assert!(cache.is_empty());
}

#[test]
fn child_put_adds_and_null_removes() {
    let mut cache = StreamCache::new(10);
    apply(&mut cache, EVENT_PUT, r#"{"path":"/","data":{"a":{"text":"x"}}}"#);
    let keys = apply(&mut cache, EVENT_PUT, r#"{"path":"/b","data":{"text":"y"}}"#);
    assert_eq!(keys, Some(vec!["a".into(), "b".into()]));
    let keys = apply(&mut cache, EVENT_PUT, r#"{"path":"/a","data":null}"#);
    assert_eq!(keys, Some(vec!["b".into()]));
}

#[test]
fn nested_put_updates_one_field() {
    let mut cache = StreamCache::new(10);
    apply(&mut cache, EVENT_PUT, r#"{"path":"/a","data":{"text":"x","type":"text"}}"#);
    apply(&mut cache, EVENT_PUT, r#"{"path":"/a/text","data":"changed"}"#);
    let snap = cache.snapshot();
    assert_eq!(snap.entries[0].1, json!({"text": "changed", "type": "text"}));
}

#[test]
fn patch_merges_children() {
    let mut cache = StreamCache::new(10);
    apply(&mut cache, EVENT_PUT, r#"{"path":"/","data":{"a":{"text":"x"},"b":{"text":"y"}}}"#);
    let keys = apply(
        &mut cache,
        EVENT_PATCH,
        r#"{"path":"/","data":{"a":null,"c":{"text":"z"}}}"#,
    );
    assert_eq!(keys, Some(vec!["b".into(), "c".into()]));
}

#[test]
fn patch_with_non_object_data_is_rejected() {
    let mut cache = StreamCache::new(10);
    let event = StreamEvent::parse(EVENT_PATCH, r#"{"path":"/","data":5}"#).unwrap();
    assert!(matches!(cache.apply(event), Err(StoreError::Decode(_))));
}

#[test]
fn cache_keeps_only_the_last_keys() {
    let mut cache = StreamCache::new(2);
    let keys = apply(
        &mut cache,
        EVENT_PUT,
        r#"{"path":"/","data":{"k1":{},"k3":{"text":"c"},"k2":{"text":"b"}}}"#,
    );
    assert_eq!(keys, Some(vec!["k2".into(), "k3".into()]));
    let keys = apply(&mut cache, EVENT_PUT, r#"{"path":"/k4","data":{"text":"d"}}"#);
    assert_eq!(keys, Some(vec!["k3".into(), "k4".into()]));
}

#[test]
fn keep_alive_changes_nothing() {
    let mut cache = StreamCache::new(10);
    assert_eq!(apply(&mut cache, EVENT_KEEP_ALIVE, "null"), None);
}

#[test]
fn cancel_and_revoke_end_the_stream() {
    let mut cache = StreamCache::new(10);
    let cancel = StreamEvent::parse(EVENT_CANCEL, "null").unwrap();
    assert_eq!(cache.apply(cancel), Err(StoreError::Cancelled));
    let revoked = StreamEvent::parse("auth_revoked", "null").unwrap();
    assert_eq!(cache.apply(revoked), Err(StoreError::Unauthorized));
}

#[test]
fn unknown_events_and_bad_payloads_fail_to_parse() {
    assert!(matches!(
        StreamEvent::parse("rumble", "{}"),
        Err(StoreError::Decode(_))
    ));
    assert!(matches!(
        StreamEvent::parse(EVENT_PUT, "not json"),
        Err(StoreError::Decode(_))
    ));
}

#[test]
fn endpoint_urls() {
    let endpoint = RestEndpoint::new("https://demo.firebaseio.com/");
    assert!(endpoint.is_configured());
    assert_eq!(
        endpoint.child_url("ripples", &RippleId::new("abc")),
        "https://demo.firebaseio.com/ripples/abc.json"
    );
    assert_eq!(
        endpoint.stream_url(&Query::last("/ripples/", 100)),
        "https://demo.firebaseio.com/ripples.json?orderBy=%22%24key%22&limitToLast=100"
    );

    let authed = endpoint.with_auth(Some("tok".into()));
    assert_eq!(
        authed.child_url("ripples", &RippleId::new("abc")),
        "https://demo.firebaseio.com/ripples/abc.json?auth=tok"
    );
    assert!(authed
        .stream_url(&Query::last("ripples", 5))
        .ends_with("limitToLast=5&auth=tok"));

    assert!(!RestEndpoint::new("").is_configured());
    assert!(!RestEndpoint::new("ftp://x").is_configured());
}

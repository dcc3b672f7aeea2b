//! Client-side half of the Firebase REST streaming protocol.
//!
//! The server sends Server-Sent Events named `put` / `patch` whose payload
//! is `{"path": "/a/b", "data": ...}` relative to the watched location.
//! [`StreamCache`] folds those events into a local copy of the watched
//! collection and hands back a full [`Snapshot`] after every change, so the
//! rest of the app only ever sees whole-collection replacements.

use crate::error::StoreError;
use crate::ripple::RippleId;
use crate::store::{Query, Snapshot};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const EVENT_PUT: &str = "put";
pub const EVENT_PATCH: &str = "patch";
pub const EVENT_KEEP_ALIVE: &str = "keep-alive";
pub const EVENT_CANCEL: &str = "cancel";
pub const EVENT_AUTH_REVOKED: &str = "auth_revoked";

#[derive(Deserialize)]
struct StreamPayload {
    path: String,
    #[serde(default)]
    data: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Value },
    KeepAlive,
    Cancel,
    AuthRevoked,
}

impl StreamEvent {
    pub fn parse(event: &str, data: &str) -> Result<StreamEvent, StoreError> {
        match event {
            EVENT_PUT | EVENT_PATCH => {
                let payload: StreamPayload = serde_json::from_str(data)?;
                Ok(if event == EVENT_PUT {
                    StreamEvent::Put {
                        path: payload.path,
                        data: payload.data,
                    }
                } else {
                    StreamEvent::Patch {
                        path: payload.path,
                        data: payload.data,
                    }
                })
            }
            EVENT_KEEP_ALIVE => Ok(StreamEvent::KeepAlive),
            EVENT_CANCEL => Ok(StreamEvent::Cancel),
            EVENT_AUTH_REVOKED => Ok(StreamEvent::AuthRevoked),
            other => Err(StoreError::Decode(format!("unknown stream event {other:?}"))),
        }
    }
}

/// Local mirror of a watched collection, trimmed to the last N keys.
#[derive(Clone, Debug)]
pub struct StreamCache {
    limit: usize,
    children: BTreeMap<RippleId, Value>,
}

impl StreamCache {
    pub fn new(limit_to_last: u32) -> Self {
        Self {
            limit: limit_to_last as usize,
            children: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Fold one event in. `Ok(Some(_))` carries the new full snapshot,
    /// `Ok(None)` means nothing changed, `Err` means the stream is over.
    pub fn apply(&mut self, event: StreamEvent) -> Result<Option<Snapshot>, StoreError> {
        match event {
            StreamEvent::Put { path, data } => self.put(&segments(&path), data),
            StreamEvent::Patch { path, data } => {
                let base = segments(&path);
                let Value::Object(map) = data else {
                    return Err(StoreError::Decode("patch data is not an object".into()));
                };
                for (key, value) in map {
                    let mut full = base.clone();
                    full.extend(segments(&key));
                    self.put(&full, value);
                }
            }
            StreamEvent::KeepAlive => return Ok(None),
            StreamEvent::Cancel => return Err(StoreError::Cancelled),
            StreamEvent::AuthRevoked => return Err(StoreError::Unauthorized),
        }
        self.trim();
        Ok(Some(self.snapshot()))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self
                .children
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    fn put(&mut self, segs: &[String], data: Value) {
        match segs {
            [] => {
                self.children.clear();
                if let Value::Object(map) = data {
                    for (k, v) in map {
                        if !v.is_null() {
                            self.children.insert(RippleId::new(k), v);
                        }
                    }
                }
            }
            [key] => {
                let id = RippleId::new(key.as_str());
                if data.is_null() {
                    self.children.remove(&id);
                } else {
                    self.children.insert(id, data);
                }
            }
            [key, rest @ ..] => {
                let id = RippleId::new(key.as_str());
                if data.is_null() && !self.children.contains_key(&id) {
                    return;
                }
                let child = self
                    .children
                    .entry(id.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                set_nested(child, rest, data);
                if child.as_object().is_some_and(Map::is_empty) {
                    self.children.remove(&id);
                }
            }
        }
    }

    fn trim(&mut self) {
        while self.children.len() > self.limit {
            self.children.pop_first();
        }
    }
}

fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn set_nested(target: &mut Value, segs: &[String], data: Value) {
    let Some((head, rest)) = segs.split_first() else {
        *target = data;
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(map) = target else { return };
    if rest.is_empty() {
        if data.is_null() {
            map.remove(head);
        } else {
            map.insert(head.clone(), data);
        }
        return;
    }
    let child = map
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    set_nested(child, rest, data);
    if child.as_object().is_some_and(Map::is_empty) {
        map.remove(head);
    }
}

/// URLs of the Firebase Realtime Database REST interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestEndpoint {
    base: String,
    auth: Option<String>,
}

impl RestEndpoint {
    pub fn new(database_url: &str) -> Self {
        Self {
            base: database_url.trim().trim_end_matches('/').to_string(),
            auth: None,
        }
    }

    pub fn with_auth(mut self, token: Option<String>) -> Self {
        self.auth = token.filter(|t| !t.is_empty());
        self
    }

    pub fn is_configured(&self) -> bool {
        self.base.starts_with("https://") || self.base.starts_with("http://")
    }

    /// Location of one child record.
    pub fn child_url(&self, path: &str, id: &RippleId) -> String {
        let url = format!("{}/{}/{}.json", self.base, path.trim_matches('/'), id);
        self.append_auth(url, false)
    }

    /// Streaming location for a last-N query ordered by key.
    pub fn stream_url(&self, query: &Query) -> String {
        let url = format!(
            "{}/{}.json?orderBy=%22%24key%22&limitToLast={}",
            self.base,
            query.path.trim_matches('/'),
            query.limit_to_last
        );
        self.append_auth(url, true)
    }

    fn append_auth(&self, url: String, has_query: bool) -> String {
        match &self.auth {
            Some(token) => format!("{}{}auth={}", url, if has_query { '&' } else { '?' }, token),
            None => url,
        }
    }
}

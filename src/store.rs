//! Firebase Realtime Database over its REST interface: writes with
//! `gloo-net`, live updates through an `EventSource` stream.

use crate::dom::Listeners;
use gloo_net::http::Request;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ripple_core::store::{LostCallback, SnapshotCallback};
use ripple_core::stream::{
    EVENT_AUTH_REVOKED, EVENT_CANCEL, EVENT_KEEP_ALIVE, EVENT_PATCH, EVENT_PUT,
};
use ripple_core::{
    PushIdGenerator, Query, RealtimeStore, RestEndpoint, RippleId, RippleRecord, StoreError,
    StreamCache, StreamEvent, Subscription,
};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const STREAM_EVENTS: [&str; 5] = [
    EVENT_PUT,
    EVENT_PATCH,
    EVENT_KEEP_ALIVE,
    EVENT_CANCEL,
    EVENT_AUTH_REVOKED,
];

#[inline]
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

pub struct FirebaseStore {
    endpoint: RestEndpoint,
    ids: RefCell<PushIdGenerator<StdRng>>,
}

impl FirebaseStore {
    pub fn new(endpoint: RestEndpoint) -> Self {
        Self {
            endpoint,
            ids: RefCell::new(PushIdGenerator::new(StdRng::from_entropy())),
        }
    }

    fn ensure_configured(&self) -> Result<(), StoreError> {
        if self.endpoint.is_configured() {
            Ok(())
        } else {
            Err(StoreError::Network("database url is not http(s)".into()))
        }
    }
}

fn network(e: gloo_net::Error) -> StoreError {
    StoreError::Network(e.to_string())
}

async fn put_json(url: &str, body: &Value) -> Result<(), StoreError> {
    let resp = Request::put(url)
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    if resp.ok() {
        Ok(())
    } else {
        Err(StoreError::Http(resp.status()))
    }
}

async fn delete(url: &str) -> Result<(), StoreError> {
    let resp = Request::delete(url).send().await.map_err(network)?;
    if resp.ok() {
        Ok(())
    } else {
        Err(StoreError::Http(resp.status()))
    }
}

impl RealtimeStore for FirebaseStore {
    /// The key is generated locally, so it is known before the write lands.
    fn push(&self, path: &str, record: &RippleRecord) -> Result<RippleId, StoreError> {
        self.ensure_configured()?;
        let id = self.ids.borrow_mut().next_id(now_ms());
        let url = self.endpoint.child_url(path, &id);
        let body = record.to_value();
        let key = id.clone();
        spawn_local(async move {
            match put_json(&url, &body).await {
                Ok(()) => log::debug!("[store] wrote {}", key),
                Err(e) => log::warn!("[store] write {} failed: {}", key, e),
            }
        });
        Ok(id)
    }

    fn remove(&self, path: &str, id: &RippleId) -> Result<(), StoreError> {
        self.ensure_configured()?;
        let url = self.endpoint.child_url(path, id);
        let key = id.clone();
        spawn_local(async move {
            if let Err(e) = delete(&url).await {
                log::warn!("[store] delete {} failed: {}", key, e);
            }
        });
        Ok(())
    }

    fn subscribe(
        &self,
        query: Query,
        on_snapshot: SnapshotCallback,
        on_lost: LostCallback,
    ) -> Result<Subscription, StoreError> {
        self.ensure_configured()?;
        let source = web::EventSource::new(&self.endpoint.stream_url(&query))
            .map_err(|e| StoreError::Network(format!("{:?}", e)))?;
        let cache = Rc::new(RefCell::new(StreamCache::new(query.limit_to_last)));
        let on_snapshot = Rc::new(RefCell::new(on_snapshot));
        let on_lost = Rc::new(RefCell::new(on_lost));
        let target: &web::EventTarget = source.as_ref();
        let mut listeners = Listeners::default();

        for name in STREAM_EVENTS {
            let cache = cache.clone();
            let on_snapshot = on_snapshot.clone();
            let on_lost = on_lost.clone();
            let source = source.clone();
            listeners.on(target, name, move |ev: web::Event| {
                let data = ev
                    .dyn_ref::<web::MessageEvent>()
                    .and_then(|m| m.data().as_string())
                    .unwrap_or_default();
                let applied = StreamEvent::parse(name, &data)
                    .and_then(|event| cache.borrow_mut().apply(event));
                match applied {
                    Ok(Some(snapshot)) => (&mut *on_snapshot.borrow_mut())(snapshot),
                    Ok(None) => {}
                    Err(StoreError::Decode(msg)) => {
                        log::warn!("[store] dropping malformed {} event: {}", name, msg)
                    }
                    Err(err) => {
                        source.close();
                        (&mut *on_lost.borrow_mut())(err);
                    }
                }
            });
        }

        {
            let source = source.clone();
            let on_lost = on_lost.clone();
            listeners.on(target, "error", move |_ev: web::Event| {
                if source.ready_state() == web::EventSource::CLOSED {
                    (&mut *on_lost.borrow_mut())(StoreError::Closed);
                } else {
                    log::debug!("[store] stream interrupted, browser is reconnecting");
                }
            });
        }

        log::info!("[store] streaming {} (last {})", query.path, query.limit_to_last);
        Ok(Subscription::new(move || {
            drop(listeners);
            source.close();
            log::info!("[store] stream closed");
        }))
    }
}

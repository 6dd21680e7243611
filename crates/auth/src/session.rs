//! Client-side session store
//!
//! A process-local cache of the caller's own most recently decoded token
//! claims, owned and constructed by the composing application rather than
//! living as ambient module state. The snapshot is created on sign-in,
//! replaced on every forced token refresh, and discarded on sign-out.
//!
//! This is a read cache for display logic only. It is never an input to
//! server-side authorization: the server decides from the claims of the
//! token presented with each request. After a role mutation the client
//! forces a token refresh and calls [`SessionStore::apply_refresh`] with
//! the newly decoded claims; until then the cached role is stale.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::types::Actor;

/// The decoded claims of the most recently fetched token.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub actor: Actor,
    pub refreshed_at: DateTime<Utc>,
}

/// Handle returned by [`SessionStore::subscribe`]; pass it back to
/// [`SessionStore::unsubscribe`] to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionHandle(u64);

type Subscriber = Arc<dyn Fn(Option<&SessionSnapshot>) + Send + Sync>;

struct SessionInner {
    snapshot: Option<SessionSnapshot>,
    subscribers: BTreeMap<u64, Subscriber>,
    next_id: u64,
}

/// Observable store of the current session's claims snapshot.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionInner>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                snapshot: None,
                subscribers: BTreeMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Pull accessor for the current snapshot.
    pub fn current(&self) -> Option<SessionSnapshot> {
        self.inner
            .lock()
            .expect("session lock poisoned — prior subscriber panicked")
            .snapshot
            .clone()
    }

    /// Replace the snapshot with freshly decoded claims and notify
    /// subscribers. Called after every forced token refresh.
    pub fn apply_refresh(&self, actor: Actor) {
        let snapshot = SessionSnapshot {
            actor,
            refreshed_at: Utc::now(),
        };
        let subscribers = {
            let mut inner = self
                .inner
                .lock()
                .expect("session lock poisoned — prior subscriber panicked");
            inner.snapshot = Some(snapshot.clone());
            inner.subscribers.values().cloned().collect::<Vec<_>>()
        };
        // Invoke outside the lock so a subscriber may call back into the store
        for subscriber in subscribers {
            subscriber(Some(&snapshot));
        }
    }

    /// Discard the snapshot on sign-out and notify subscribers.
    pub fn clear(&self) {
        let subscribers = {
            let mut inner = self
                .inner
                .lock()
                .expect("session lock poisoned — prior subscriber panicked");
            inner.snapshot = None;
            inner.subscribers.values().cloned().collect::<Vec<_>>()
        };
        for subscriber in subscribers {
            subscriber(None);
        }
    }

    /// Register a change listener. The listener fires on every refresh and
    /// on sign-out, with the new snapshot (or `None`).
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(Option<&SessionSnapshot>) + Send + Sync + 'static,
    {
        let mut inner = self
            .inner
            .lock()
            .expect("session lock poisoned — prior subscriber panicked");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, Arc::new(listener));
        SubscriptionHandle(id)
    }

    /// Deregister a listener. Unknown handles are ignored.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.inner
            .lock()
            .expect("session lock poisoned — prior subscriber panicked")
            .subscribers
            .remove(&handle.0);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

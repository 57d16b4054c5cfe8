//! Session-change fan-out.
//!
//! [`SessionHub`] holds the last known session and the registered listeners.
//! Listeners are called in registration order, outside the lock, and a
//! [`Subscription`] that is dropped or unsubscribed stops receiving events
//! even if an emission is already in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::Session;

type Callback = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

struct Entry {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Callback,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    /// `None` until the first emission.
    current: Option<Option<Session>>,
    entries: Vec<Entry>,
}

#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Arc<Mutex<HubInner>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. If a session value is already known it is
    /// delivered before this returns.
    pub fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let callback: Callback = Arc::new(on_change);

        let (id, replay) = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push(Entry {
                id,
                active: active.clone(),
                callback: callback.clone(),
            });
            (id, inner.current.clone())
        };

        if let Some(current) = replay {
            callback(current.as_ref());
        }

        Subscription {
            hub: Arc::downgrade(&self.inner),
            id,
            active,
        }
    }

    pub fn emit(&self, session: Option<Session>) {
        let listeners: Vec<(Arc<AtomicBool>, Callback)> = {
            let mut inner = self.inner.lock();
            inner.current = Some(session.clone());
            inner
                .entries
                .iter()
                .map(|e| (e.active.clone(), e.callback.clone()))
                .collect()
        };

        for (active, callback) in listeners {
            if active.load(Ordering::Acquire) {
                callback(session.as_ref());
            }
        }
    }

    /// Last emitted value; `None` before the first emission.
    pub fn current(&self) -> Option<Option<Session>> {
        self.inner.lock().current.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

/// Handle returned by [`SessionHub::subscribe`]. Dropping it unsubscribes.
pub struct Subscription {
    hub: Weak<Mutex<HubInner>>,
    id: u64,
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(inner) = self.hub.upgrade() {
            inner.lock().entries.retain(|e| e.id != self.id);
        }
    }
}

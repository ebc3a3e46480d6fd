//! Callback registry with explicit unsubscribe handles.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store publishes auth changes through a `Listeners` registry,
//! and the auth context republishes its derived state through another one.
//! Callbacks are snapshotted before they run, so a callback may drop its own
//! `Subscription` (or register a new one) without deadlocking.

#[cfg(test)]
#[path = "listeners_test.rs"]
mod listeners_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Handle returned by a subscribe call. Unsubscribes when dropped or when
/// [`Subscription::unsubscribe`] is called, whichever comes first.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Stop receiving notifications.
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

type Entries<F> = Arc<Mutex<Vec<(u64, Arc<F>)>>>;

/// Ordered set of callbacks of type `F` (usually a `dyn Fn(..)`).
pub struct Listeners<F: ?Sized> {
    next_id: AtomicU64,
    entries: Entries<F>,
}

impl<F: ?Sized + Send + Sync + 'static> Listeners<F> {
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: AtomicU64::new(0), entries: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Register `callback`; it stays registered until the returned handle goes away.
    pub fn add(&self, callback: Arc<F>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.entries).push((id, callback));

        let entries = Arc::clone(&self.entries);
        Subscription::new(move || lock(&entries).retain(|(entry_id, _)| *entry_id != id))
    }

    /// Callbacks registered right now, in registration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<F>> {
        lock(&self.entries)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: ?Sized + Send + Sync + 'static> Default for Listeners<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

use super::*;
use std::sync::atomic::AtomicUsize;

type Callback = dyn Fn(usize) + Send + Sync;

fn counter() -> (Arc<AtomicUsize>, Arc<Callback>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&hits);
    let cb: Arc<Callback> = Arc::new(move |n| {
        seen.fetch_add(n, Ordering::SeqCst);
    });
    (hits, cb)
}

fn notify(listeners: &Listeners<Callback>, n: usize) {
    for cb in listeners.snapshot() {
        cb(n);
    }
}

#[test]
fn registered_callback_receives_notifications() {
    let listeners = Listeners::<Callback>::new();
    let (hits, cb) = counter();
    let _sub = listeners.add(cb);
    notify(&listeners, 2);
    notify(&listeners, 3);
    assert_eq!(hits.load(Ordering::SeqCst), 5);
}

#[test]
fn dropping_subscription_unsubscribes() {
    let listeners = Listeners::<Callback>::new();
    let (hits, cb) = counter();
    let sub = listeners.add(cb);
    assert_eq!(listeners.len(), 1);
    drop(sub);
    assert!(listeners.is_empty());
    notify(&listeners, 1);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn explicit_unsubscribe_removes_only_that_callback() {
    let listeners = Listeners::<Callback>::new();
    let (first_hits, first) = counter();
    let (second_hits, second) = counter();
    let first_sub = listeners.add(first);
    let _second_sub = listeners.add(second);

    first_sub.unsubscribe();
    notify(&listeners, 1);

    assert_eq!(first_hits.load(Ordering::SeqCst), 0);
    assert_eq!(second_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn cancel_runs_exactly_once() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&runs);
    let sub = Subscription::new(move || {
        counted.fetch_add(1, Ordering::SeqCst);
    });
    sub.unsubscribe();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn callback_may_drop_its_own_subscription() {
    let listeners = Arc::new(Listeners::<Callback>::new());
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let slot_in_cb = Arc::clone(&slot);
    let cb: Arc<Callback> = Arc::new(move |_| {
        slot_in_cb.lock().unwrap().take();
    });
    *slot.lock().unwrap() = Some(listeners.add(cb));

    notify(&listeners, 1);
    assert!(listeners.is_empty());
}

#[test]
fn debug_reports_active_state() {
    let sub = Subscription::new(|| {});
    assert_eq!(format!("{sub:?}"), "Subscription { active: true }");
}

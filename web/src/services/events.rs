//! Account lifecycle event bus
//!
//! Views register connect/disconnect callbacks with [`AccountEvents::subscribe`]
//! and hold the returned [`Subscription`] for as long as they are mounted.
//! Dropping the guard removes the callbacks, so a view that is torn down can
//! never be called back.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use shared::dto::wallet::ConnectData;

type ConnectHandler = Box<dyn Fn(&ConnectData) + Send + Sync>;
type DisconnectHandler = Box<dyn Fn() + Send + Sync>;

/// Callbacks for one subscriber. Either side may be left unset.
#[derive(Default)]
pub struct AccountHandlers {
    on_connect: Option<ConnectHandler>,
    on_disconnect: Option<DisconnectHandler>,
}

impl AccountHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_connect(mut self, handler: impl Fn(&ConnectData) + Send + Sync + 'static) -> Self {
        self.on_connect = Some(Box::new(handler));
        self
    }

    pub fn on_disconnect(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_disconnect = Some(Box::new(handler));
        self
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(u64, Arc<AccountHandlers>)>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable handle to the account event registry.
#[derive(Clone, Default)]
pub struct AccountEvents {
    registry: Arc<Mutex<Registry>>,
}

impl AccountEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register callbacks until the returned guard is dropped.
    pub fn subscribe(&self, handlers: AccountHandlers) -> Subscription {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.push((id, Arc::new(handlers)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn emit_connect(&self, data: &ConnectData) {
        for handlers in self.snapshot() {
            if let Some(on_connect) = &handlers.on_connect {
                on_connect(data);
            }
        }
    }

    pub fn emit_disconnect(&self) {
        for handlers in self.snapshot() {
            if let Some(on_disconnect) = &handlers.on_disconnect {
                on_disconnect();
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry).subscribers.len()
    }

    // Handlers run without the lock held so they can subscribe or unsubscribe.
    fn snapshot(&self) -> Vec<Arc<AccountHandlers>> {
        lock(&self.registry)
            .subscribers
            .iter()
            .map(|(_, handlers)| Arc::clone(handlers))
            .collect()
    }
}

/// Registration guard returned by [`AccountEvents::subscribe`].
#[must_use = "dropping a Subscription immediately unregisters its handlers"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Unregister now instead of at scope end.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::dto::wallet::Connector;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn data(address: &str) -> ConnectData {
        ConnectData::new(address, 8453, Connector::Injected)
    }

    #[test]
    fn test_emit_reaches_subscriber() {
        let events = AccountEvents::new();
        let connects = Arc::new(AtomicUsize::new(0));
        let disconnects = Arc::new(AtomicUsize::new(0));

        let _sub = events.subscribe(
            AccountHandlers::new()
                .on_connect({
                    let connects = Arc::clone(&connects);
                    move |_| {
                        connects.fetch_add(1, Ordering::SeqCst);
                    }
                })
                .on_disconnect({
                    let disconnects = Arc::clone(&disconnects);
                    move || {
                        disconnects.fetch_add(1, Ordering::SeqCst);
                    }
                }),
        );

        events.emit_connect(&data("0xABC"));
        events.emit_disconnect();
        events.emit_disconnect();

        assert_eq!(connects.load(Ordering::SeqCst), 1);
        assert_eq!(disconnects.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drop_unregisters() {
        let events = AccountEvents::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let sub = events.subscribe(AccountHandlers::new().on_connect({
            let hits = Arc::clone(&hits);
            move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            }
        }));
        assert_eq!(events.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(events.subscriber_count(), 0);

        events.emit_connect(&data("0xABC"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_only_removes_own_handlers() {
        let events = AccountEvents::new();
        let first = events.subscribe(AccountHandlers::new());
        let _second = events.subscribe(AccountHandlers::new());

        drop(first);
        assert_eq!(events.subscriber_count(), 1);
    }

    #[test]
    fn test_subscription_outlives_bus() {
        let events = AccountEvents::new();
        let sub = events.subscribe(AccountHandlers::new());
        drop(events);
        drop(sub);
    }

    #[test]
    fn test_missing_handlers_are_skipped() {
        let events = AccountEvents::new();
        let _sub = events.subscribe(AccountHandlers::new());
        events.emit_connect(&data("0xABC"));
        events.emit_disconnect();
    }

    #[test]
    fn test_handler_may_unsubscribe_during_emit() {
        let events = AccountEvents::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let sub = events.subscribe(AccountHandlers::new().on_disconnect({
            let slot = Arc::clone(&slot);
            move || {
                slot.lock().unwrap().take();
            }
        }));
        *slot.lock().unwrap() = Some(sub);

        events.emit_disconnect();
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let events = AccountEvents::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = Arc::clone(&order);
                events.subscribe(AccountHandlers::new().on_connect(move |_| {
                    order.lock().unwrap().push(i);
                }))
            })
            .collect();

        events.emit_connect(&data("0xABC"));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        drop(subs);
    }
}

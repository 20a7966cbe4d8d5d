//! Shared UI-state stores
//!
//! Two small pieces of state are read all over the front end: the current
//! user/credential and the deck selected in the library view. Each is an
//! observable value holder; writes go through the designated setter and
//! notify every subscriber synchronously.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::Deck;

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Handle to a registered subscriber, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct StoreInner<T> {
    value: RwLock<T>,
    subscribers: RwLock<HashMap<u64, Subscriber<T>>>,
    next_id: RwLock<u64>,
}

/// A minimal observable value holder
pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                value: RwLock::new(initial),
                subscribers: RwLock::new(HashMap::new()),
                next_id: RwLock::new(0),
            }),
        }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Replace the value and notify every subscriber before returning.
    /// Subscribers must not write to the store from their callback.
    pub fn set(&self, value: T) {
        *self.inner.value.write() = value.clone();
        for subscriber in self.inner.subscribers.read().values() {
            subscriber(&value);
        }
    }

    /// Register a subscriber, invoked on every subsequent `set`
    pub fn subscribe(&self, subscriber: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let mut next_id = self.inner.next_id.write();
        let id = *next_id;
        *next_id += 1;
        self.inner
            .subscribers
            .write()
            .insert(id, Box::new(subscriber));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.subscribers.write().remove(&id.0);
    }
}

/// Current user and credential; an empty username means logged out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub username: String,
    pub token: String,
}

impl UserState {
    pub fn is_authenticated(&self) -> bool {
        !self.username.is_empty()
    }
}

/// Store holding the authenticated user
#[derive(Clone)]
pub struct UserStore {
    store: Store<UserState>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            store: Store::new(UserState::default()),
        }
    }

    pub fn get(&self) -> UserState {
        self.store.get()
    }

    /// Current credential, empty when logged out
    pub fn token(&self) -> String {
        self.store.get().token
    }

    pub fn set_user(&self, username: impl Into<String>, token: impl Into<String>) {
        self.store.set(UserState {
            username: username.into(),
            token: token.into(),
        });
    }

    pub fn clear(&self) {
        self.store.set(UserState::default());
    }

    pub fn subscribe(
        &self,
        subscriber: impl Fn(&UserState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.store.unsubscribe(id);
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Store holding the deck currently focused in the library view
#[derive(Clone)]
pub struct DeckStore {
    store: Store<Option<Deck>>,
}

impl DeckStore {
    pub fn new() -> Self {
        Self {
            store: Store::new(None),
        }
    }

    pub fn selected(&self) -> Option<Deck> {
        self.store.get()
    }

    pub fn select(&self, deck: Deck) {
        self.store.set(Some(deck));
    }

    pub fn clear(&self) {
        self.store.set(None);
    }

    pub fn subscribe(
        &self,
        subscriber: impl Fn(&Option<Deck>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.store.unsubscribe(id);
    }
}

impl Default for DeckStore {
    fn default() -> Self {
        Self::new()
    }
}

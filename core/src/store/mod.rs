//! Typed, persisted client state.
//!
//! # Design
//! A `Store<T>` owns one value of `T`, mirrored as JSON under a single key of
//! a `KeyValueStorage`. Clones share the same value, so a store can be handed
//! to every part of a host that needs it. Writes persist first and only then
//! replace the in-memory value and notify subscribers; a failed write leaves
//! the store unchanged.
//!
//! Subscribers are called synchronously on the writing thread once the value
//! lock is released. A listener may read the store but must not write to it.

mod preferences;
mod storage;
mod user;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use preferences::{Preferences, PreferencesStore, Theme, ThemeMode, PREFERENCES_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use user::{UserStore, USER_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("failed to encode stored value: {0}")]
    Serialization(String),
}

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct StoreInner<T> {
    key: String,
    storage: Arc<dyn KeyValueStorage>,
    value: RwLock<T>,
    listeners: Mutex<Listeners<T>>,
    // Serializes writers so persisted and in-memory values never diverge.
    write_lock: Mutex<()>,
}

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A shared value of `T` persisted under one storage key.
pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Store<T>
where
    T: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Open the store at `key`, loading any saved value.
    ///
    /// A missing or unreadable snapshot starts the store at `T::default()`.
    pub fn open(storage: Arc<dyn KeyValueStorage>, key: &str) -> Self {
        let value = match storage.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("discarding unreadable snapshot for {key}: {e}");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!("could not load {key}: {e}");
                T::default()
            }
        };

        Self {
            inner: Arc::new(StoreInner {
                key: key.to_string(),
                storage,
                value: RwLock::new(value),
                listeners: Mutex::new(Listeners {
                    next_id: 0,
                    entries: Vec::new(),
                }),
                write_lock: Mutex::new(()),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    pub fn get(&self) -> T {
        self.inner
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, value: T) -> Result<(), StoreError> {
        let _guard = self.inner.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.commit(value)
    }

    /// Modify the current value in place and persist the result.
    pub fn update<F: FnOnce(&mut T)>(&self, f: F) -> Result<(), StoreError> {
        let _guard = self.inner.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut value = self.get();
        f(&mut value);
        self.commit(value)
    }

    /// Call `listener` with the new value after every successful write.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut listeners = self.inner.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Arc::new(listener)));
            id
        };

        let inner: Weak<StoreInner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    let mut listeners = inner.listeners.lock().unwrap_or_else(PoisonError::into_inner);
                    listeners.entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    fn commit(&self, value: T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.inner.storage.set(&self.inner.key, &raw)?;

        *self.inner.value.write().unwrap_or_else(PoisonError::into_inner) = value.clone();

        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&value);
        }
        Ok(())
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        hits: u32,
    }

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::InvalidKey(key.to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn starts_from_default_and_persists_writes() {
        let storage = Arc::new(MemoryStorage::new());
        let store: Store<Counter> = Store::open(storage.clone(), "counter");
        assert_eq!(store.get(), Counter::default());

        store.update(|c| c.hits += 2).unwrap();
        assert_eq!(storage.get("counter").unwrap().as_deref(), Some(r#"{"hits":2}"#));

        let reopened: Store<Counter> = Store::open(storage, "counter");
        assert_eq!(reopened.get().hits, 2);
    }

    #[test]
    fn unreadable_snapshot_falls_back_to_default() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("counter", "{not json").unwrap();
        let store: Store<Counter> = Store::open(storage, "counter");
        assert_eq!(store.get(), Counter::default());
    }

    #[test]
    fn clones_share_state() {
        let store: Store<Counter> = Store::open(Arc::new(MemoryStorage::new()), "counter");
        let other = store.clone();
        other.set(Counter { hits: 9 }).unwrap();
        assert_eq!(store.get().hits, 9);
    }

    #[test]
    fn subscribers_see_new_values_until_dropped() {
        let store: Store<Counter> = Store::open(Arc::new(MemoryStorage::new()), "counter");
        let seen = Arc::new(AtomicUsize::new(0));

        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |c| {
            sink.store(c.hits as usize, Ordering::SeqCst);
        });
        store.set(Counter { hits: 3 }).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 3);

        drop(subscription);
        store.set(Counter { hits: 7 }).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn listener_may_read_the_store() {
        let store: Store<Counter> = Store::open(Arc::new(MemoryStorage::new()), "counter");
        let reader = store.clone();
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |_| {
            sink.store(reader.get().hits as usize, Ordering::SeqCst);
        });
        store.set(Counter { hits: 4 }).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let store: Store<Counter> = Store::open(Arc::new(BrokenStorage), "counter");
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&calls);
        let _subscription = store.subscribe(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.set(Counter { hits: 1 }).is_err());
        assert_eq!(store.get(), Counter::default());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

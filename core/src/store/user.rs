//! The logged-in user, persisted across restarts.

use std::sync::Arc;

use super::{KeyValueStorage, Store, StoreError, Subscription};
use crate::types::User;

pub const USER_KEY: &str = "bdapp-user";

/// The logged-in user, or `None` when signed out.
#[derive(Clone)]
pub struct UserStore {
    store: Store<Option<User>>,
}

impl UserStore {
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            store: Store::open(storage, USER_KEY),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.store.get()
    }

    pub fn set_user(&self, user: Option<User>) -> Result<(), StoreError> {
        self.store.set(user)
    }

    pub fn is_logged_in(&self) -> bool {
        self.user().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.is_admin())
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Option<User>) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }
}

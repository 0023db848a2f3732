//! Login and logout that keep the user store in sync with the server.

use log::info;
use thiserror::Error;

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::navigation::{AppRoute, Navigator};
use crate::store::{FileStorage, StoreError, UserStore};
use crate::types::{AuthForm, User};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct Session {
    client: ApiClient,
    users: UserStore,
}

impl Session {
    pub fn new(client: ApiClient, users: UserStore) -> Self {
        Self { client, users }
    }

    /// A ureq-backed client plus a user store persisted under `storage_dir`.
    pub fn from_config(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self, SessionError> {
        let client = ApiClient::from_config(config, navigator)?;
        let storage = FileStorage::from_config(config)?;
        Ok(Self::new(client, UserStore::open(Arc::new(storage))))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Log in and remember who the server says we are.
    pub fn login(&self, form: &AuthForm) -> Result<User, SessionError> {
        self.client.auth().login(form)?;
        let user = self.client.auth().current_user()?;
        self.users.set_user(Some(user.clone()))?;
        info!("logged in as {}", user.login);
        Ok(user)
    }

    /// Log out, forget the user and go back to the landing page.
    ///
    /// The stored user is cleared only when the server accepted the logout.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.client.auth().logout()?;
        self.users.set_user(None)?;
        self.client.navigator().navigate(&AppRoute::Root.path());
        info!("logged out");
        Ok(())
    }

    /// Re-read the logged-in user from the server and store it.
    pub fn current_user(&self) -> Result<User, SessionError> {
        let user = self.client.auth().current_user()?;
        self.users.set_user(Some(user.clone()))?;
        Ok(user)
    }
}

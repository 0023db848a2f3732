//! Client-side routes and the navigation seam.
//!
//! The access layer never renders anything, but an unrecoverable session
//! failure has to send the user back to the landing page. `Navigator` is the
//! narrow interface the recovery layer uses for that; hosts plug in their own
//! router, headless hosts and tests use `MemoryNavigator`.

use std::sync::{Mutex, PoisonError};

/// Application routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Root,
    NotFound,
    Login,
    Register,
    Profile(String),
    Requests,
    Catalog,
    Book(String),
}

impl AppRoute {
    pub fn path(&self) -> String {
        match self {
            AppRoute::Root => "/".to_string(),
            AppRoute::NotFound => "/*".to_string(),
            AppRoute::Login => "/login".to_string(),
            AppRoute::Register => "/register".to_string(),
            AppRoute::Profile(id) => format!("/profile/{id}"),
            AppRoute::Requests => "/requests".to_string(),
            AppRoute::Catalog => "/catalog".to_string(),
            AppRoute::Book(id) => format!("/book/{id}"),
        }
    }
}

/// Reads and changes the host's current location.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// In-memory navigator that records every navigation.
#[derive(Debug)]
pub struct MemoryNavigator {
    state: Mutex<NavigationState>,
}

#[derive(Debug)]
struct NavigationState {
    current: String,
    history: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(initial_path: &str) -> Self {
        Self {
            state: Mutex::new(NavigationState {
                current: initial_path.to_string(),
                history: Vec::new(),
            }),
        }
    }

    /// Every path navigated to, oldest first. The initial path is not included.
    pub fn history(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .history
            .clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new(&AppRoute::Root.path())
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    fn navigate(&self, path: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.current = path.to_string();
        state.history.push(path.to_string());
    }
}

//! UI preferences, currently just the colour theme.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{KeyValueStorage, Store, StoreError, Subscription};

pub const PREFERENCES_KEY: &str = "bdapp-preferences";

/// Colour theme chosen by the user. `Auto` follows the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

/// The theme actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl Theme {
    /// light, dark, auto, then light again.
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
            Theme::Auto => Theme::Light,
        }
    }

    pub fn resolve(self, prefers_dark: bool) -> ThemeMode {
        match self {
            Theme::Light => ThemeMode::Light,
            Theme::Dark => ThemeMode::Dark,
            Theme::Auto if prefers_dark => ThemeMode::Dark,
            Theme::Auto => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
}

#[derive(Clone)]
pub struct PreferencesStore {
    store: Store<Preferences>,
}

impl PreferencesStore {
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            store: Store::open(storage, PREFERENCES_KEY),
        }
    }

    pub fn preferences(&self) -> Preferences {
        self.store.get()
    }

    pub fn theme(&self) -> Theme {
        self.store.get().theme
    }

    pub fn change_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.store.update(|prefs| prefs.theme = theme)
    }

    /// Advance to the next theme and return it.
    pub fn cycle_theme(&self) -> Result<Theme, StoreError> {
        let next = self.theme().next();
        self.change_theme(next)?;
        Ok(next)
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Preferences) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }
}

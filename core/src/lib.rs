//! Blocking client for the book catalog API.
//!
//! # Overview
//! Resource clients describe every call as a plain `HttpRequest`, a
//! `Transport` performs it, and the recovery layer turns failures into one
//! normalized `ApiError`. An expired session is refreshed once and the
//! original request replayed; if the refresh fails the host is sent back to
//! the landing route through its `Navigator`.
//!
//! # Design
//! - `ApiClient` is cheap to clone and safe to share across threads.
//! - Each operation is split into `build_*` (pure, produces the descriptor)
//!   and a calling method that sends it, so request shapes are testable
//!   without a server.
//! - Session credentials live in the transport's cookie jar.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod navigation;
pub mod recovery;
pub mod session;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use navigation::{AppRoute, MemoryNavigator, Navigator};
pub use session::{Session, SessionError};
pub use store::{
    FileStorage, KeyValueStorage, MemoryStorage, Preferences, PreferencesStore, Store, StoreError,
    Subscription, Theme, ThemeMode, UserStore,
};
pub use transport::{Transport, UreqTransport};

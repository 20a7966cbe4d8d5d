//! Client library for the Flashy Cards API
//!
//! This crate provides everything a front end needs to talk to the Flashy
//! Cards server: data models, an authenticated HTTP client, per-resource
//! access functions, a query/mutation layer with cache invalidation, the
//! shared UI-state stores, and session bootstrap from a persisted
//! credential.

pub mod api;
pub mod cache;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod models;
pub mod query;
pub mod session;
pub mod stores;
pub mod token;
pub mod validation;

// Re-export the types most callers need
pub use cache::{CacheKey, QueryCache};
pub use config::ClientConfig;
pub use credentials::CredentialStore;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use models::{Card, Category, Deck, NewCard, UserCredentials};
pub use query::QueryClient;
pub use session::{SessionManager, SessionState};
pub use stores::{DeckStore, UserState, UserStore};

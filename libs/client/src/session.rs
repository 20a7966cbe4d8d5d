//! Session management
//!
//! Drives the session state machine: `Unknown` while the bootstrap is in
//! flight, then `Anonymous` or `Authenticated`. The username always comes
//! from the credential itself, either via the who-am-i endpoint during
//! bootstrap or from the token claims after a fresh sign-in.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::api;
use crate::cache::QueryCache;
use crate::credentials::CredentialStore;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::models::UserCredentials;
use crate::stores::{DeckStore, UserStore};
use crate::token;

/// Where the session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Initial state, bootstrap not finished yet
    Unknown,
    /// No valid credential
    Anonymous,
    /// Valid credential and username present
    Authenticated,
}

/// Coordinates the credential file, the user store, and the query cache
#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    credentials: CredentialStore,
    users: UserStore,
    decks: DeckStore,
    cache: Arc<QueryCache>,
    state: Arc<RwLock<SessionState>>,
}

impl SessionManager {
    pub fn new(
        api: ApiClient,
        credentials: CredentialStore,
        users: UserStore,
        decks: DeckStore,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            api,
            credentials,
            users,
            decks,
            cache,
            state: Arc::new(RwLock::new(SessionState::Unknown)),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Validate the persisted credential, if any, and populate the user
    /// store. A single attempt; a rejected credential is the expected
    /// "not logged in" case and is swallowed after clearing both the store
    /// and the file. Only credential-file I/O errors propagate.
    pub async fn bootstrap(&self) -> ClientResult<SessionState> {
        let Some(stored) = self.credentials.load()? else {
            info!("No stored credential, starting anonymous");
            self.set_anonymous()?;
            return Ok(SessionState::Anonymous);
        };

        match api::auth::me(&self.api, &stored).await {
            Ok(username) => {
                info!("Stored credential accepted for {}", username);
                self.users.set_user(username, stored);
                *self.state.write() = SessionState::Authenticated;
                Ok(SessionState::Authenticated)
            }
            Err(err) => {
                info!("Stored credential rejected: {}", err);
                self.set_anonymous()?;
                Ok(SessionState::Anonymous)
            }
        }
    }

    /// Sign in and populate the session. The username is taken from the
    /// returned token's claims.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let token = api::auth::sign_in(
            &self.api,
            &UserCredentials {
                username: username.to_string(),
                password: password.to_string(),
            },
        )
        .await?;

        let claims = token::decode_claims(&token)?;
        self.credentials.save(&token)?;

        // The credential changed, so nothing cached under the previous one
        // may be served again.
        self.cache.clear();
        self.users.set_user(claims.username.clone(), token);
        *self.state.write() = SessionState::Authenticated;
        info!("Logged in as {}", claims.username);
        Ok(())
    }

    /// Register a new account. The caller still has to log in afterwards.
    pub async fn sign_up(&self, username: &str, password: &str) -> ClientResult<()> {
        api::auth::sign_up(
            &self.api,
            &UserCredentials {
                username: username.to_string(),
                password: password.to_string(),
            },
        )
        .await?;
        info!("Account {} registered", username);
        Ok(())
    }

    /// Drop the session: erase the credential and reset every piece of
    /// client state derived from it.
    pub fn logout(&self) -> ClientResult<()> {
        self.set_anonymous()?;
        info!("Logged out");
        Ok(())
    }

    fn set_anonymous(&self) -> ClientResult<()> {
        self.credentials.clear()?;
        self.users.clear();
        self.decks.clear();
        self.cache.clear();
        *self.state.write() = SessionState::Anonymous;
        Ok(())
    }
}

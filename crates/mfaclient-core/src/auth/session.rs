use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Credentials, Redirect};
use crate::api::{ApiError, AuthApi};
use crate::models::{Token, UserRecord};
use crate::store::{StoreError, TokenStore, TOKEN_KEY};

/// Reasons a login attempt can fail.
///
/// Display output is the raw underlying message, meant to be shown to the
/// user unchanged.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Drop the stored token when auto-login is refused with 401
    pub purge_rejected_token: bool,
}

/// Owns the current user and keeps the persisted token in step with it.
///
/// Mutating operations take `&mut self`, so two logins can never race on the
/// same manager.
pub struct SessionManager<A, S> {
    api: A,
    store: S,
    user: Option<UserRecord>,
    options: SessionOptions,
}

impl<A: AuthApi, S: TokenStore> SessionManager<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            user: None,
            options: SessionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn current_user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Token currently persisted, if any. An empty value counts as absent.
    pub fn stored_token(&self) -> Result<Option<Token>, StoreError> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|value| !value.is_empty())
            .map(Token::from))
    }

    /// Verify credentials, persist the issued token and remember the user.
    ///
    /// On error nothing changes: the session and the stored token stay as
    /// they were.
    pub async fn login(&mut self, credentials: Credentials) -> Result<Redirect, LoginError> {
        debug!(identifier = %credentials.identifier, "Attempting login");

        let result = match self.api.verify(&credentials).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Login rejected");
                return Err(e.into());
            }
        };

        if let Err(e) = self.store.set(TOKEN_KEY, result.token.as_str()) {
            warn!(error = %e, "Failed to persist session token");
            return Err(e.into());
        }

        info!(user = ?result.user.id(), "Login successful");
        self.user = Some(result.user);
        Ok(Redirect::Authenticated)
    }

    /// Forget the user and the stored token.
    ///
    /// The in-memory session is cleared even if the store refuses to remove
    /// the token.
    pub fn logout(&mut self) -> Redirect {
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove session token");
        }
        self.user = None;
        info!("Logged out");
        Redirect::Home
    }

    /// Restore the user from a previously stored token.
    ///
    /// Returns `None` when there is no token or it could not be resolved;
    /// failures are logged and otherwise ignored.
    pub async fn auto_login(&mut self, return_to: Option<&str>) -> Option<Redirect> {
        let token = match self.stored_token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No stored token, skipping auto-login");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                return None;
            }
        };

        match self.api.resolve_by_token(&token).await {
            Ok(user) => {
                info!(user = ?user.id(), "Session restored from stored token");
                self.user = Some(user);
                Some(Redirect::origin_or_home(return_to))
            }
            Err(e) => {
                warn!(error = %e, "Auto-login failed");
                if e.is_unauthorized() {
                    self.discard_rejected_token();
                }
                None
            }
        }
    }

    fn discard_rejected_token(&mut self) {
        if !self.options.purge_rejected_token {
            debug!("Keeping rejected token in store");
            return;
        }
        match self.store.remove(TOKEN_KEY) {
            Ok(()) => debug!("Removed rejected token"),
            Err(e) => warn!(error = %e, "Failed to remove rejected token"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

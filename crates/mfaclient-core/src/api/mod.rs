//! REST API client module for the two-factor authentication service.
//!
//! This module provides the `AuthApi` seam the session manager talks to and
//! `ApiClient`, its HTTP implementation.
//!
//! Login goes through the 2FA verify endpoint, which answers with a bearer
//! token and the user. The token can later be exchanged for the user again.

pub mod client;
pub mod error;

use async_trait::async_trait;

pub use client::ApiClient;
pub use error::ApiError;

use crate::auth::Credentials;
use crate::models::{LoginResult, Token, UserRecord};

/// Operations the session manager needs from the authentication service
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Verify credentials (including the one-time code) and issue a token
    async fn verify(&self, credentials: &Credentials) -> Result<LoginResult, ApiError>;

    /// Resolve a previously issued token back to its user
    async fn resolve_by_token(&self, token: &Token) -> Result<UserRecord, ApiError>;
}

//! Client-side session management for a two-factor authentication API.
//!
//! The `SessionManager` owns the logged-in user, persists the session token
//! through a `TokenStore` and talks to the service through `AuthApi`. It
//! returns `Redirect` intents instead of navigating, leaving presentation to
//! whatever front end drives it.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod store;

pub use api::{ApiClient, ApiError, AuthApi};
pub use auth::{Credentials, LoginError, Redirect, Routes, SessionManager, SessionOptions};
pub use config::{Config, StoreKind};
pub use models::{LoginResult, Token, UserRecord};
pub use store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, StoreError, TokenStore, TOKEN_KEY};

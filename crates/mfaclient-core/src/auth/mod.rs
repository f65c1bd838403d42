//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionManager`: login, logout and auto-login over an `AuthApi` and a `TokenStore`
//! - `Credentials`: transient login input
//! - `Redirect`: where the view layer should navigate after an operation
//!
//! The session token is persisted through the injected store so a later run
//! can restore the user without asking for credentials again.

pub mod credentials;
pub mod redirect;
pub mod session;

pub use credentials::Credentials;
pub use redirect::{Redirect, Routes};
pub use session::{LoginError, SessionManager, SessionOptions};

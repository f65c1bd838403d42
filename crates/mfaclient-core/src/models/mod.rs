//! Data models exchanged with the authentication API.
//!
//! - `UserRecord`: the user as returned by the API, never carrying a password
//! - `Token`: opaque session token issued by the API
//! - `LoginResult`: token and user pair returned by a successful verify call

pub mod token;
pub mod user;

pub use token::Token;
pub use user::{LoginResult, UserRecord};

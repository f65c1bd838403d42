use serde::{Deserialize, Serialize};

/// Navigation intent returned by session operations.
///
/// The session manager never navigates itself; the view layer maps the
/// intent to a concrete location with [`Redirect::path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Landing page for a freshly logged-in user
    Authenticated,
    /// Public home page
    Home,
    /// Location the user was on before the application reloaded
    Origin(String),
}

impl Redirect {
    /// Return to the recorded origin, or home when none was recorded
    pub fn origin_or_home(return_to: Option<&str>) -> Self {
        match return_to {
            Some(path) if !path.is_empty() => Redirect::Origin(path.to_string()),
            _ => Redirect::Home,
        }
    }

    pub fn path<'a>(&'a self, routes: &'a Routes) -> &'a str {
        match self {
            Redirect::Authenticated => &routes.authenticated,
            Redirect::Home => &routes.home,
            Redirect::Origin(path) => path,
        }
    }
}

/// Concrete locations for the fixed redirect targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub authenticated: String,
    pub home: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            authenticated: "/secret".to_string(),
            home: "/".to_string(),
        }
    }
}

//! Command-line view layer over the session manager.
//!
//! `App` wires configuration, the HTTP client and the chosen token store into
//! a `SessionManager`, and renders its results: redirects are printed as the
//! location to open, login failures as a blocking alert.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use mfaclient_core::{
    ApiClient, Config, Credentials, FileTokenStore, KeyringTokenStore, MemoryTokenStore, Redirect,
    SessionManager, StoreKind, TokenStore,
};

pub struct App {
    config: Config,
    session: SessionManager<ApiClient, Box<dyn TokenStore>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, ephemeral: bool) -> Result<Self> {
        let store = Self::open_store(&config, ephemeral)?;
        let api = ApiClient::from_config(&config).context("Failed to create API client")?;
        let session = SessionManager::new(api, store).with_options(config.session_options());
        Ok(Self { config, session })
    }

    fn open_store(config: &Config, ephemeral: bool) -> Result<Box<dyn TokenStore>> {
        let kind = if ephemeral { StoreKind::Memory } else { config.store };
        debug!(?kind, "Opening token store");
        Ok(match kind {
            StoreKind::File => Box::new(FileTokenStore::new(Config::cache_dir()?)),
            StoreKind::Keyring => Box::new(KeyringTokenStore::default()),
            StoreKind::Memory => Box::new(MemoryTokenStore::new()),
        })
    }

    /// Log in, returning whether it succeeded.
    ///
    /// Missing username or password are prompted for on the terminal.
    pub async fn login(
        &mut self,
        username: Option<String>,
        password: Option<String>,
        code: Option<String>,
    ) -> Result<bool> {
        let username = match username {
            Some(username) => username,
            None => self.prompt_username()?,
        };
        let password = match password {
            Some(password) => password,
            None => rpassword::prompt_password("Password: ")?,
        };
        let code = match code {
            Some(code) => Some(code),
            None => Self::prompt_code()?,
        };

        let mut credentials = Credentials::new(username.clone(), password);
        credentials.code = code;

        match self.session.login(credentials).await {
            Ok(redirect) => {
                self.config.last_username = Some(username);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                if let Some(name) = self.session.current_user().and_then(|u| u.display_name()) {
                    println!("Logged in as {}", name);
                }
                self.navigate(&redirect);
                Ok(true)
            }
            Err(e) => {
                Self::alert(&e.to_string());
                Ok(false)
            }
        }
    }

    pub fn logout(&mut self) {
        let redirect = self.session.logout();
        self.navigate(&redirect);
    }

    /// Restore the session from the stored token, if there is one
    pub async fn auto_login(&mut self, from: Option<&str>) {
        if let Some(redirect) = self.session.auto_login(from).await {
            if let Some(name) = self.session.current_user().and_then(|u| u.display_name()) {
                println!("Welcome back, {}", name);
            }
            self.navigate(&redirect);
        }
    }

    /// Print the current user as JSON, returning whether one was found
    pub async fn whoami(&mut self) -> Result<bool> {
        self.session.auto_login(None).await;
        match self.session.current_user() {
            Some(user) => {
                println!("{}", serde_json::to_string_pretty(user)?);
                Ok(true)
            }
            None => {
                println!("Not logged in");
                Ok(false)
            }
        }
    }

    fn navigate(&self, redirect: &Redirect) {
        println!("-> {}", redirect.path(&self.config.routes));
    }

    fn alert(message: &str) {
        eprintln!("Alert: {}", message);
    }

    fn prompt_username(&self) -> Result<String> {
        match self.config.last_username {
            Some(ref last_user) => {
                let input = Self::prompt_line(&format!("Username [{}]: ", last_user))?;
                Ok(if input.is_empty() { last_user.clone() } else { input })
            }
            None => Self::prompt_line("Username: "),
        }
    }

    fn prompt_code() -> Result<Option<String>> {
        let input = Self::prompt_line("One-time code (blank to skip): ")?;
        Ok(if input.is_empty() { None } else { Some(input) })
    }

    fn prompt_line(prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}

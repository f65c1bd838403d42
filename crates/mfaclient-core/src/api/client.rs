//! API client for communicating with the authentication REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use super::{ApiError, AuthApi};
use crate::auth::Credentials;
use crate::config::Config;
use crate::models::{LoginResult, Token, UserRecord};

/// Path of the credential verification endpoint, relative to the auth URL
const VERIFY_PATH: &str = "/verify";

/// Path of the token lookup endpoint, relative to the user URL
const USER_BY_TOKEN_PATH: &str = "/users/token";

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: UserRecord,
}

/// HTTP client for the authentication and user services.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    auth_url: String,
    user_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// Without a timeout, requests wait until the transport gives up.
    pub fn new(
        auth_url: impl Into<String>,
        user_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            auth_url: Self::normalize_base(auth_url.into()),
            user_url: Self::normalize_base(user_url.into()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            config.auth_url.clone(),
            config.user_url.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn normalize_base(mut url: String) -> String {
        while url.ends_with('/') {
            url.pop();
        }
        url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e)))
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn verify(&self, credentials: &Credentials) -> Result<LoginResult, ApiError> {
        let url = format!("{}{}", self.auth_url, VERIFY_PATH);
        debug!(url = %url, "Verifying credentials");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(credentials)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::parse(response, &url).await
    }

    async fn resolve_by_token(&self, token: &Token) -> Result<UserRecord, ApiError> {
        let url = format!("{}{}", self.user_url, USER_BY_TOKEN_PATH);
        debug!(url = %url, "Resolving user by token");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body: UserResponse = Self::parse(response, &url).await?;
        Ok(body.user)
    }
}

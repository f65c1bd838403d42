use thiserror::Error;

/// Errors returned by the authentication API.
///
/// Display output is the server's own message where one was sent, so it can
/// be shown to the user as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    AccessDenied(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Rate limited - please wait before trying again")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// JSON fields the API uses to carry a human-readable error
const MESSAGE_FIELDS: [&str; 2] = ["message", "error"];

impl ApiError {
    /// Truncate a response body to avoid surfacing excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Pull the server's message out of a JSON error body
    fn server_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        MESSAGE_FIELDS
            .iter()
            .find_map(|field| value.get(*field)?.as_str())
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::server_message(body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                Self::truncate_body(body)
            }
        });
        match status.as_u16() {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }

    /// True when the server rejected the credentials or token outright
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_uses_server_message() {
        let err = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"Invalid code","status":401}"#,
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid code");
    }

    #[test]
    fn test_from_status_accepts_error_field() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, r#"{"error":"Account locked"}"#);
        assert!(matches!(err, ApiError::AccessDenied(_)));
        assert_eq!(err.to_string(), "Account locked");
    }

    #[test]
    fn test_from_status_empty_body_uses_reason() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn test_from_status_plain_text_body() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.to_string(), "Server error: upstream down");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_from_status_other_status() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"message":"code required"}"#);
        assert_eq!(err.to_string(), "Invalid response: Status 400 Bad Request: code required");
    }

    #[test]
    fn test_rate_limited() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(err, ApiError::RateLimited));
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY_LENGTH + 10);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with("(truncated, 510 total bytes)"));
    }
}

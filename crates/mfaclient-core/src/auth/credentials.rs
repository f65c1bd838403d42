use std::fmt;

use serde::Serialize;

/// Login input sent to the verify endpoint.
///
/// Not validated locally; the server decides what is acceptable.
#[derive(Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "username")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
    /// One-time code from the user's authenticator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("code", &self.code.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_wire_field_names() {
        let credentials = Credentials::new("ana", "secret").with_code("123456");
        assert_eq!(
            serde_json::to_value(&credentials).unwrap(),
            json!({"username": "ana", "password": "secret", "code": "123456"})
        );
    }

    #[test]
    fn test_code_omitted_when_absent() {
        let credentials = Credentials::new("ana", "secret");
        assert_eq!(
            serde_json::to_value(&credentials).unwrap(),
            json!({"username": "ana", "password": "secret"})
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let printed = format!("{:?}", Credentials::new("ana", "hunter2").with_code("987654"));
        assert!(printed.contains("ana"));
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("987654"));
    }
}

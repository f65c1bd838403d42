use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::Token;

/// Field removed from every user object before it is kept in memory
const PASSWORD_FIELD: &str = "password";

/// Fields tried, in order, when picking a name to show for a user
const DISPLAY_NAME_FIELDS: [&str; 3] = ["username", "name", "email"];

/// A user as returned by the authentication API.
///
/// The record is opaque: the session layer only cares whether one exists.
/// Any password field sent by the server is dropped on construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    pub fn new(mut fields: Map<String, Value>) -> Self {
        fields.remove(PASSWORD_FIELD);
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Server-side identifier, if the API sent one
    pub fn id(&self) -> Option<&Value> {
        self.0.get("user_id").or_else(|| self.0.get("id"))
    }

    /// Best human-readable label for the user
    pub fn display_name(&self) -> Option<&str> {
        DISPLAY_NAME_FIELDS
            .iter()
            .find_map(|field| self.0.get(*field).and_then(Value::as_str))
    }
}

impl<'de> Deserialize<'de> for UserRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::new)
    }
}

/// Response of a successful credential verification
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResult {
    pub token: Token,
    pub user: UserRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_is_stripped_on_decode() {
        let user: UserRecord = serde_json::from_value(json!({
            "user_id": 7,
            "username": "ana",
            "password": "hunter2",
        }))
        .unwrap();

        assert!(user.get("password").is_none());
        assert_eq!(user.id(), Some(&json!(7)));
        assert_eq!(user.display_name(), Some("ana"));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user: UserRecord = serde_json::from_value(json!({"email": "ana@example.com"})).unwrap();
        assert_eq!(user.display_name(), Some("ana@example.com"));

        let anonymous: UserRecord = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(anonymous.display_name(), None);
    }

    #[test]
    fn test_login_result_ignores_message() {
        let result: LoginResult = serde_json::from_value(json!({
            "message": "Login successful",
            "token": "tok-1",
            "user": {"id": 7, "name": "Ana"},
        }))
        .unwrap();

        assert_eq!(result.token, Token::new("tok-1"));
        assert_eq!(result.user.display_name(), Some("Ana"));
    }

    #[test]
    fn test_non_object_user_is_rejected() {
        assert!(serde_json::from_value::<UserRecord>(json!("ana")).is_err());
    }
}

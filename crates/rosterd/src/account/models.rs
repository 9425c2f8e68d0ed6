//! Account data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account entity from database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub sequence_id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

/// Registration request body.
///
/// Fields are optional so an absent field yields the field-agnostic
/// validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub sequence_id: Option<i64>,
    pub username: Option<String>,
    pub secret: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub secret: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_never_serializes_hash() {
        let account = Account {
            id: 1,
            sequence_id: 10,
            username: "alice".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            created_at: "2024-01-01 00:00:00".to_string(),
        };

        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_register_request_wire_names() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"sequenceId":1,"username":"alice","secret":"p@ss1234"}"#)
                .unwrap();
        assert_eq!(request.sequence_id, Some(1));
        assert_eq!(request.username.as_deref(), Some("alice"));
        assert_eq!(request.secret.as_deref(), Some("p@ss1234"));
    }

    #[test]
    fn test_register_request_tolerates_missing_fields() {
        let request: RegisterRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(request.sequence_id, None);
        assert_eq!(request.secret, None);
    }
}

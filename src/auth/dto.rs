use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::User;

/// Request body for signup. Fields default to empty so the validators can
/// report which one is missing instead of a generic body rejection.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub location: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public part of the user returned after signup and login.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            location: u.location,
        }
    }
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

/// Message-only response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_never_carries_password_fields() {
        let response = AuthResponse {
            message: "User created successfully".into(),
            token: "tok".into(),
            user: UserSummary {
                id: Uuid::new_v4(),
                name: "A".into(),
                email: "a@b.co".into(),
                role: "Reader".into(),
                location: "X".into(),
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("a@b.co"));
        assert!(json.contains("token"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn signup_request_defaults_missing_fields() {
        let req: SignupRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(req.email, "a@b.co");
        assert!(req.password.is_empty());
        assert!(req.role.is_empty());
    }
}

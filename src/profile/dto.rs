use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::User;

/// Fixed projection returned by GET /profile; never includes the password
/// hash or the session token.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub description: Option<String>,
    pub profile_pic: Option<String>,
    pub location: String,
    pub role: String,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            description: u.description,
            profile_pic: u.profile_pic,
            location: u.location,
            role: u.role,
        }
    }
}

/// JSON body form of PUT /profile (text-only updates).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Collected fields of a profile update, from either body form. Empty
/// strings count as absent.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub profile_pic: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.profile_pic.is_none()
    }
}

/// User summary echoed back after a profile update.
#[derive(Debug, Serialize)]
pub struct UpdatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub description: Option<String>,
    pub location: String,
    pub profile_pic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub user: UpdatedUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEmailRequest {
    #[serde(default)]
    pub new_email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEmailResponse {
    pub message: String,
    pub new_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "A".into(),
            email: "a@b.co".into(),
            password_hash: "$argon2id$hash".into(),
            role: "Reader".into(),
            location: "X".into(),
            description: Some("desc".into()),
            profile_pic: Some("uploads/profiles/PROFILE-1.png".into()),
            session_token: Some("tok".into()),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn profile_response_projection() {
        let json = serde_json::to_string(&ProfileResponse::from(user())).unwrap();
        assert!(json.contains("a@b.co"));
        assert!(json.contains("Reader"));
        assert!(json.contains("PROFILE-1.png"));
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("session_token"));
    }

    #[test]
    fn empty_changes_detected() {
        assert!(ProfileChanges::default().is_empty());
        let changes = ProfileChanges {
            name: Some("B".into()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn change_requests_use_camel_case() {
        let req: ChangePasswordRequest =
            serde_json::from_str(r#"{"currentPassword":"Old1!","newPassword":"NewPass1!"}"#)
                .unwrap();
        assert_eq!(req.current_password, "Old1!");
        assert_eq!(req.new_password, "NewPass1!");

        let req: ChangeEmailRequest =
            serde_json::from_str(r#"{"newEmail":"b@c.co","password":"Pw1!aA"}"#).unwrap();
        assert_eq!(req.new_email, "b@c.co");

        let resp = ChangeEmailResponse {
            message: "Email updated successfully".into(),
            new_email: "b@c.co".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("newEmail"));
    }
}

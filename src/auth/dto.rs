use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Short user summary returned by register.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

/// Response for a fresh anonymous account. The only place the plaintext
/// password is ever returned.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
    pub password: String,
    pub user: UserSummary,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public part of the user returned on login.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

/// Full own-profile view.
#[derive(Debug, Serialize)]
pub struct ProfileUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login_at: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: ProfileUser,
}

/// Request body for profile update.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn register_response_carries_generated_credentials() {
        let response = RegisterResponse {
            success: true,
            message: "Registration successful.".into(),
            email: "abc@apcer.com".into(),
            password: "s3cret!".into(),
            user: UserSummary {
                id: 1,
                username: "Anonim #1".into(),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["email"], "abc@apcer.com");
        assert_eq!(json["password"], "s3cret!");
        assert_eq!(json["user"]["username"], "Anonim #1");
    }

    #[test]
    fn profile_timestamps_serialize_as_rfc3339() {
        let response = ProfileResponse {
            success: true,
            user: ProfileUser {
                id: 3,
                email: "a@b.co".into(),
                username: "Anonim #3".into(),
                created_at: datetime!(2024-05-01 12:00:00 UTC),
                last_login_at: None,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["user"]["created_at"], "2024-05-01T12:00:00Z");
        assert!(json["user"]["last_login_at"].is_null());
    }
}

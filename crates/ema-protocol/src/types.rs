//! Core protocol types for the auth API's JSON bodies.
//!
//! Every type here is either sent to `/api/auth/*` or received from it.
//! Field names follow the server's contract, which is not consistent:
//! login and password updates use camelCase (`userId`, `firstName`) while
//! registration uses snake_case (`last_name`). The serde attributes below
//! pin each type to exactly what the server expects.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The server-assigned identifier of a user account.
///
/// Same newtype pattern used for every identifier: you can't pass a raw
/// `u64` where a `UserId` is expected. `#[serde(transparent)]` keeps the
/// wire form a bare number (`"id": 1`, `"userId": 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user-{}", self.0)
    }
}

/// The role of an account at the school.
///
/// The server has historically spoken Spanish for roles (the registration
/// form sent `"padre"`), so the Spanish names are accepted as aliases.
/// We always send the English form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "estudiante")]
    Student,
    #[serde(alias = "maestro", alias = "profesor")]
    Teacher,
    #[serde(alias = "padre")]
    Parent,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The authenticated principal, as reported by the auth server.
///
/// The client only ever holds a cached copy: it's created from a login
/// response, persisted as JSON under the `user` key, and read back on
/// startup.
///
/// Some servers omit `isFirstLogin` (it defaults to `false`) or spell it
/// `is_first_login`; names may arrive as `name` / `last_name`. All of those
/// are accepted on input, and when both spellings are present the
/// camelCase one wins. Output always uses the camelCase contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "UserRecord")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub is_first_login: bool,
}

/// Input shape of [`User`], with every accepted spelling as its own field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: UserId,
    email: String,
    role: Role,
    first_name: Option<String>,
    #[serde(rename = "name")]
    legacy_name: Option<String>,
    last_name: Option<String>,
    #[serde(rename = "last_name")]
    legacy_last_name: Option<String>,
    is_first_login: Option<bool>,
    #[serde(rename = "is_first_login")]
    legacy_is_first_login: Option<bool>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            role: record.role,
            first_name: record.first_name.or(record.legacy_name).unwrap_or_default(),
            last_name: record
                .last_name
                .or(record.legacy_last_name)
                .unwrap_or_default(),
            is_first_login: record
                .is_first_login
                .or(record.legacy_is_first_login)
                .unwrap_or(false),
        }
    }
}

impl User {
    /// Returns "First Last", or the email when the server sent no names.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// /api/auth/login
// ---------------------------------------------------------------------------

/// Body of `POST /api/auth/login`.
///
/// Field order matters for anyone comparing raw bodies: serde emits
/// fields in declaration order, so this serializes as
/// `{"email":...,"password":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful (2xx) body of `POST /api/auth/login`.
///
/// Extra fields such as `refreshToken` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub user: User,
    pub token: String,
}

// ---------------------------------------------------------------------------
// /api/auth/update-password
// ---------------------------------------------------------------------------

/// Body of `POST /api/auth/update-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

/// Successful (2xx) body of `POST /api/auth/update-password`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePasswordResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// /api/auth/register
// ---------------------------------------------------------------------------

/// Body of `POST /api/auth/register`.
///
/// Note the snake_case `last_name` and the single `phone` field, which is
/// the country prefix and the local number concatenated (`"+50212345678"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Successful (2xx) body of `POST /api/auth/register`.
///
/// The server also echoes the created `user`; the portal doesn't use it
/// (registration does not log anyone in), so it's ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Body of any non-2xx response.
///
/// Every field is optional: the client surfaces `message` when present and
/// falls back to a generic text otherwise. `code` (e.g.
/// `"INVALID_CREDENTIALS"`, `"ACCOUNT_LOCKED"`, `"EMAIL_ALREADY_EXISTS"`)
/// is kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Shape tests against the bodies the auth server actually sends.

    use super::*;

    fn parse<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).expect("should parse")
    }

    // =====================================================================
    // User
    // =====================================================================

    #[test]
    fn test_user_full_login_payload_parses() {
        let user: User = parse(
            r#"{"id":1,"email":"estudiante@ema.com","role":"student",
                "firstName":"María","lastName":"González","isFirstLogin":false}"#,
        );

        assert_eq!(user.id, UserId(1));
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.first_name, "María");
        assert!(!user.is_first_login);
    }

    #[test]
    fn test_user_missing_first_login_defaults_false() {
        // Teacher accounts come back without the flag at all.
        let user: User = parse(
            r#"{"id":3,"email":"teacher@ema.com","role":"teacher",
                "firstName":"Elena","lastName":"Martínez"}"#,
        );

        assert!(!user.is_first_login);
    }

    #[test]
    fn test_user_snake_case_first_login_is_accepted() {
        let user: User = parse(
            r#"{"id":2,"email":"nuevo@ema.com","role":"student","is_first_login":true}"#,
        );

        assert!(user.is_first_login);
    }

    #[test]
    fn test_user_spanish_role_alias_maps_to_parent() {
        let user: User =
            parse(r#"{"id":9,"email":"p@ema.com","role":"padre","name":"Juan"}"#);

        assert_eq!(user.role, Role::Parent);
        assert_eq!(user.first_name, "Juan");
    }

    #[test]
    fn test_user_both_name_spellings_prefers_camel_case() {
        let user: User = parse(
            r#"{"id":1,"email":"estudiante@ema.com","role":"student",
                "name":"Mari","firstName":"María",
                "last_name":"Gonzalez","lastName":"González",
                "is_first_login":false,"isFirstLogin":true}"#,
        );

        assert_eq!(user.first_name, "María");
        assert_eq!(user.last_name, "González");
        assert!(user.is_first_login);
    }

    #[test]
    fn test_user_stored_json_reads_back_unchanged() {
        let user: User = parse(
            r#"{"id":2,"email":"nuevo@ema.com","role":"student","name":"Carlos"}"#,
        );

        let again: User = parse(&serde_json::to_string(&user).unwrap());

        assert_eq!(again, user);
    }

    #[test]
    fn test_user_unknown_role_fails_to_parse() {
        let result: Result<User, _> =
            serde_json::from_str(r#"{"id":9,"email":"x@ema.com","role":"janitor"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_display_name_joins_first_and_last() {
        let user: User = parse(
            r#"{"id":1,"email":"a@ema.com","role":"admin","firstName":"Ana","lastName":"Ruiz"}"#,
        );

        assert_eq!(user.display_name(), "Ana Ruiz");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user: User = parse(r#"{"id":1,"email":"a@ema.com","role":"admin"}"#);

        assert_eq!(user.display_name(), "a@ema.com");
    }

    // =====================================================================
    // Requests
    // =====================================================================

    #[test]
    fn test_login_request_serializes_exact_body() {
        let req = LoginRequest {
            email: "estudiante@ema.com".into(),
            password: "password123".into(),
        };

        let json = serde_json::to_string(&req).unwrap();

        assert_eq!(
            json,
            r#"{"email":"estudiante@ema.com","password":"password123"}"#
        );
    }

    #[test]
    fn test_update_password_request_uses_camel_case() {
        let req = UpdatePasswordRequest {
            user_id: UserId(2),
            current_password: "temporal".into(),
            new_password: "nuevaClave1".into(),
        };

        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(value["userId"], 2);
        assert_eq!(value["currentPassword"], "temporal");
        assert_eq!(value["newPassword"], "nuevaClave1");
    }

    #[test]
    fn test_register_request_uses_snake_case_last_name() {
        let req = RegisterRequest {
            name: "Juan".into(),
            last_name: "Pérez".into(),
            phone: "+50212345678".into(),
            email: "juan@test.com".into(),
            password: "password123".into(),
            role: Role::Parent,
        };

        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(value["last_name"], "Pérez");
        assert_eq!(value["phone"], "+50212345678");
        assert_eq!(value["role"], "parent");
    }

    // =====================================================================
    // Responses
    // =====================================================================

    #[test]
    fn test_login_response_ignores_refresh_token() {
        let resp: LoginResponse = parse(
            r#"{"success":true,"token":"jwt-teacher-token","refreshToken":"r-123",
                "user":{"id":3,"email":"teacher@ema.com","role":"teacher"}}"#,
        );

        assert_eq!(resp.token, "jwt-teacher-token");
    }

    #[test]
    fn test_login_response_without_token_fails() {
        let result: Result<LoginResponse, _> = serde_json::from_str(
            r#"{"success":true,"user":{"id":3,"email":"t@ema.com","role":"teacher"}}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_api_error_body_keeps_message_and_code() {
        let body: ApiErrorBody = parse(
            r#"{"success":false,"message":"Cuenta bloqueada","code":"ACCOUNT_LOCKED",
                "unlockTime":"2025-08-05T15:30:00Z"}"#,
        );

        assert_eq!(body.message.as_deref(), Some("Cuenta bloqueada"));
        assert_eq!(body.code.as_deref(), Some("ACCOUNT_LOCKED"));
    }

    #[test]
    fn test_api_error_body_empty_object_parses() {
        let body: ApiErrorBody = parse("{}");

        assert_eq!(body, ApiErrorBody::default());
    }
}

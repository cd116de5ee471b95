//! Client-related types shared between the HR backend and the console
//!
//! Common request/response types used in API communication. The auth
//! endpoints in the wild return several different payload shapes for the
//! same operation, so the response types here are untagged enums that
//! accept each known shape and normalize it into the canonical form.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Logout request
///
/// The refresh token is included when available so the backend can revoke
/// it. Logout must still succeed locally when it is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Role reference attached to a user
///
/// Some backends return the role as a full record, others as a plain
/// string. Both deserialize here; `name()` gives the free-text role name
/// that guards match against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    Record {
        #[serde(default)]
        id: Option<i64>,
        name: String,
    },
    Name(String),
}

impl RoleRef {
    /// The role name string
    pub fn name(&self) -> &str {
        match self {
            Self::Record { name, .. } => name,
            Self::Name(name) => name,
        }
    }
}

impl From<&str> for RoleRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// User identity record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<RoleRef>,
}

impl UserInfo {
    /// The role name, empty string when no role is attached
    pub fn role_name(&self) -> &str {
        self.role.as_ref().map(RoleRef::name).unwrap_or("")
    }
}

/// Canonical token pair held by a session
///
/// Single-token backends produce `refresh: None`; refresh is then
/// impossible and the session lasts as long as the access token does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl SessionTokens {
    pub fn new(access: impl Into<String>, refresh: Option<String>) -> Self {
        Self {
            access: access.into(),
            refresh,
        }
    }
}

/// Nested token pair as returned by the detailed login shape
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPairPayload {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Login response payload in any of the shapes backends return
///
/// Known shapes, tried in order:
/// - detailed: `{ "user": {..}, "tokens": { "access": "..", "refresh": ".." } }`
/// - split: `{ "access_token": "..", "refresh_token": "..", "user": {..} }`
/// - bare: `{ "token": "..", "user": {..} }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginPayload {
    Detailed {
        user: UserInfo,
        tokens: TokenPairPayload,
    },
    Split {
        #[serde(alias = "accessToken")]
        access_token: String,
        #[serde(default, alias = "refreshToken")]
        refresh_token: Option<String>,
        #[serde(default)]
        user: Option<UserInfo>,
    },
    Bare {
        token: String,
        #[serde(default)]
        user: Option<UserInfo>,
    },
}

impl LoginPayload {
    /// Normalize into canonical tokens plus the user record when present
    pub fn into_parts(self) -> (SessionTokens, Option<UserInfo>) {
        match self {
            Self::Detailed { user, tokens } => (
                SessionTokens::new(tokens.access, tokens.refresh),
                Some(user),
            ),
            Self::Split {
                access_token,
                refresh_token,
                user,
            } => (SessionTokens::new(access_token, refresh_token), user),
            Self::Bare { token, user } => (SessionTokens::new(token, None), user),
        }
    }
}

/// Refresh response payload in any of the shapes backends return
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefreshPayload {
    Split {
        #[serde(alias = "accessToken")]
        access_token: String,
        #[serde(default, alias = "refreshToken")]
        refresh_token: Option<String>,
    },
    Bare {
        token: String,
    },
}

impl RefreshPayload {
    /// New access token plus the rotated refresh token when the backend
    /// returned one
    pub fn into_tokens(self) -> (String, Option<String>) {
        match self {
            Self::Split {
                access_token,
                refresh_token,
            } => (access_token, refresh_token),
            Self::Bare { token } => (token, None),
        }
    }
}

/// Current-user response payload, wrapped or plain
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CurrentUserPayload {
    Wrapped { user: UserInfo },
    Plain(UserInfo),
}

impl CurrentUserPayload {
    pub fn into_user(self) -> UserInfo {
        match self {
            Self::Wrapped { user } => user,
            Self::Plain(user) => user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_payload_detailed_shape() {
        let json = r#"{
            "user": {"id": 1, "username": "maria", "email": "maria@acme.test",
                     "display_name": "Maria Ionescu", "role": {"id": 2, "name": "HR Manager"}},
            "tokens": {"access": "acc-1", "refresh": "ref-1"}
        }"#;
        let payload: LoginPayload = serde_json::from_str(json).unwrap();
        let (tokens, user) = payload.into_parts();

        assert_eq!(tokens.access, "acc-1");
        assert_eq!(tokens.refresh.as_deref(), Some("ref-1"));
        let user = user.unwrap();
        assert_eq!(user.username, "maria");
        assert_eq!(user.role_name(), "HR Manager");
    }

    #[test]
    fn test_login_payload_split_shape() {
        let json = r#"{
            "access_token": "acc-2",
            "refresh_token": "ref-2",
            "user": {"id": 2, "username": "tom", "role": "Employee"}
        }"#;
        let payload: LoginPayload = serde_json::from_str(json).unwrap();
        let (tokens, user) = payload.into_parts();

        assert_eq!(tokens.access, "acc-2");
        assert_eq!(tokens.refresh.as_deref(), Some("ref-2"));
        assert_eq!(user.unwrap().role_name(), "Employee");
    }

    #[test]
    fn test_login_payload_split_camel_case() {
        let json = r#"{"accessToken": "acc-3", "refreshToken": "ref-3"}"#;
        let payload: LoginPayload = serde_json::from_str(json).unwrap();
        let (tokens, user) = payload.into_parts();

        assert_eq!(tokens.access, "acc-3");
        assert_eq!(tokens.refresh.as_deref(), Some("ref-3"));
        assert!(user.is_none());
    }

    #[test]
    fn test_login_payload_bare_shape() {
        let json = r#"{"token": "acc-4"}"#;
        let payload: LoginPayload = serde_json::from_str(json).unwrap();
        let (tokens, user) = payload.into_parts();

        assert_eq!(tokens.access, "acc-4");
        assert!(tokens.refresh.is_none());
        assert!(user.is_none());
    }

    #[test]
    fn test_role_ref_record_and_name() {
        let record: RoleRef = serde_json::from_str(r#"{"id": 1, "name": "HR"}"#).unwrap();
        assert_eq!(record.name(), "HR");

        let plain: RoleRef = serde_json::from_str(r#""staff""#).unwrap();
        assert_eq!(plain.name(), "staff");
    }

    #[test]
    fn test_user_info_without_role() {
        let json = r#"{"id": 9, "username": "ghost"}"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert!(user.role.is_none());
        assert_eq!(user.role_name(), "");
    }

    #[test]
    fn test_refresh_payload_shapes() {
        let split: RefreshPayload =
            serde_json::from_str(r#"{"access_token": "new-acc"}"#).unwrap();
        assert_eq!(split.into_tokens(), ("new-acc".to_string(), None));

        let rotated: RefreshPayload =
            serde_json::from_str(r#"{"access_token": "new-acc", "refresh_token": "new-ref"}"#)
                .unwrap();
        assert_eq!(
            rotated.into_tokens(),
            ("new-acc".to_string(), Some("new-ref".to_string()))
        );

        let bare: RefreshPayload = serde_json::from_str(r#"{"token": "new-acc"}"#).unwrap();
        assert_eq!(bare.into_tokens(), ("new-acc".to_string(), None));
    }

    #[test]
    fn test_current_user_payload_shapes() {
        let wrapped: CurrentUserPayload =
            serde_json::from_str(r#"{"user": {"id": 1, "username": "maria"}}"#).unwrap();
        assert_eq!(wrapped.into_user().username, "maria");

        let plain: CurrentUserPayload =
            serde_json::from_str(r#"{"id": 2, "username": "tom"}"#).unwrap();
        assert_eq!(plain.into_user().username, "tom");
    }

    #[test]
    fn test_session_tokens_roundtrip() {
        let tokens = SessionTokens::new("acc", Some("ref".to_string()));
        let json = serde_json::to_string(&tokens).unwrap();
        let parsed: SessionTokens = serde_json::from_str(&json).unwrap();
        assert_eq!(tokens, parsed);
    }

    #[test]
    fn test_logout_request_skips_missing_refresh() {
        let req = LogoutRequest {
            refresh_token: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, "{}");
    }
}

//! Wire types for the Leelame REST API.
//!
//! Field names mirror the backend contract (camelCase, Mongo `_id`).
//! Deserialization is tolerant of payload drift the backend is known to
//! exhibit: `role` arrives as either a single string or an array, and the
//! seller fields are absent for plain buyers.

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by API gateway calls.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("API request failed: {0}")]
    Request(String),

    /// The backend returned a non-success status. `body` is the raw
    /// payload, surfaced unmodified.
    #[error("API response error: status {status}")]
    Api { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    Parse(String),

    /// An authenticated call was attempted with no session token.
    #[error("no authentication token found")]
    MissingToken,
}

impl ApiError {
    /// The backend's own `message` field from an error payload, if present.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Api { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str().map(String::from))),
            _ => None,
        }
    }
}

impl crate::error::ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_API_REQUEST",
            Self::Api { .. } => "E_API_RESPONSE",
            Self::Parse(_) => "E_API_PARSE",
            Self::MissingToken => "E_MISSING_TOKEN",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Api { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// ROLES & SELLER STATE
// =============================================================================

/// Coarse permission class attached to a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

/// Seller verification lifecycle. Absent on buyer-only profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerStatus {
    Pending,
    Verified,
    Rejected,
    /// Any unrecognized or missing status. Never grants seller access.
    #[serde(other)]
    None,
}

impl Default for SellerStatus {
    fn default() -> Self {
        Self::None
    }
}

/// The backend emits `role` as either a bare string or an array.
fn role_list<'de, D>(deserializer: D) -> Result<Vec<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Role),
        Many(Vec<Role>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(role) => vec![role],
        OneOrMany::Many(roles) => roles,
    })
}

// =============================================================================
// USER PROFILE
// =============================================================================

/// Server-owned user record; the client holds a cached copy in the
/// session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub contact: String,
    #[serde(rename = "role", deserialize_with = "role_list")]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub seller_status: SellerStatus,
    /// End of an active temporary seller ban, RFC 3339 with offset.
    #[serde(
        rename = "sellerBannedDateTo",
        default,
        with = "time::serde::rfc3339::option"
    )]
    pub seller_banned_to: Option<OffsetDateTime>,
    #[serde(default)]
    pub is_seller_permanently_banned: bool,
}

impl UserProfile {
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub contact: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Vec<Role>,
    pub terms: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleLoginRequest {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyRegistrationRequest {
    pub username: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyResetPasswordRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// Partial profile edit. `None` fields are omitted from the wire payload
/// and left untouched by the session merge.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl UserDetailsUpdate {
    /// True when the edit touches identity fields the backend re-verifies.
    #[must_use]
    pub fn changes_identity(&self) -> bool {
        self.username.is_some() || self.email.is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.username.is_none() && self.email.is_none() && self.contact.is_none()
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Generic `{ success, message }` envelope used by mutation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Authentication response: the user record plus a bearer token. The
/// token is absent when the account still needs OTP verification.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub user: UserProfile,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// `GET /user/get-current-user` and `GET /user/public-profile` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: UserProfile,
}

/// `GET /user/check-username` probe used by route guards.
#[derive(Debug, Clone, Deserialize)]
pub struct UsernameExists {
    pub exists: bool,
}

/// `PUT /user/update-user-details/{id}` response. The updated record is
/// omitted by older backend builds, so it stays optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatedUser {
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

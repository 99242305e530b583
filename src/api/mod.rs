//! API gateway — one function per backend endpoint.
//!
//! DESIGN
//! ======
//! The gateway is a boundary interface, not business logic: fixed
//! method/path per call, bearer token forwarded explicitly by the caller,
//! server error payloads surfaced unmodified. Flows depend on the
//! [`UserApi`] trait so tests can substitute a fake backend.

pub mod client;
pub mod types;

pub use client::HttpApiClient;
pub use types::ApiError;

use types::{
    ApiMessage, AuthPayload, LoginRequest, RegisterRequest, ResetPasswordRequest, UpdatedUser,
    UserDetailsUpdate, UserProfile, VerifyRegistrationRequest, VerifyResetPasswordRequest,
};

/// Backend-neutral async trait over the user API. Enables mocking in tests.
///
/// Methods taking `token` require an authenticated session; the gateway
/// itself holds no credential state.
#[async_trait::async_trait]
pub trait UserApi: Send + Sync {
    async fn register_user(&self, req: &RegisterRequest) -> Result<ApiMessage, ApiError>;

    async fn check_username_unique(&self, username: &str) -> Result<ApiMessage, ApiError>;

    async fn verify_account_registration(
        &self,
        req: &VerifyRegistrationRequest,
    ) -> Result<ApiMessage, ApiError>;

    async fn send_verification_email(&self, email: &str) -> Result<ApiMessage, ApiError>;

    async fn login_user(&self, req: &LoginRequest) -> Result<AuthPayload, ApiError>;

    async fn google_login(&self, access_token: &str) -> Result<AuthPayload, ApiError>;

    async fn forgot_password(&self, email: &str) -> Result<ApiMessage, ApiError>;

    async fn verify_account_reset_password(
        &self,
        req: &VerifyResetPasswordRequest,
    ) -> Result<ApiMessage, ApiError>;

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<ApiMessage, ApiError>;

    async fn get_current_user(&self, token: &str) -> Result<UserProfile, ApiError>;

    /// Existence probe for route-guard username validation.
    async fn check_username(&self, username: &str) -> Result<bool, ApiError>;

    async fn update_user_details(
        &self,
        token: &str,
        user_id: &str,
        update: &UserDetailsUpdate,
    ) -> Result<UpdatedUser, ApiError>;

    async fn delete_user(&self, token: &str, user_id: &str) -> Result<ApiMessage, ApiError>;

    async fn public_profile(&self, username: &str) -> Result<UserProfile, ApiError>;
}

#[cfg(test)]
pub(crate) mod test_support;

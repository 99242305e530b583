//! HTTP implementation of the API gateway.
//!
//! Thin wrapper over `reqwest`: one method per backend endpoint, fixed
//! method and path, bearer header where the contract requires one. Every
//! call is a direct pass-through — no retries, no caching — and error
//! payloads reach the caller byte-for-byte.

use std::time::Duration;

use super::types::{
    ApiError, ApiMessage, AuthPayload, GoogleLoginRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest, UpdatedUser, UserDetailsUpdate, UserEnvelope, UserProfile,
    UsernameExists, VerifyRegistrationRequest, VerifyResetPasswordRequest,
};
use super::UserApi;
use crate::config::ClientConfig;

pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    /// Build the gateway client from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and decode the success body, surfacing non-2xx
    /// payloads unmodified.
    async fn execute<T>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(ApiError::Api { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn bearer(request: reqwest::RequestBuilder, token: &str) -> reqwest::RequestBuilder {
        request.header("Authorization", format!("Bearer {token}"))
    }
}

#[async_trait::async_trait]
impl UserApi for HttpApiClient {
    async fn register_user(&self, req: &RegisterRequest) -> Result<ApiMessage, ApiError> {
        self.execute(self.http.post(self.url("/user/register-user")).json(req))
            .await
    }

    async fn check_username_unique(&self, username: &str) -> Result<ApiMessage, ApiError> {
        self.execute(
            self.http
                .get(self.url("/user/check-username-unique"))
                .query(&[("username", username)]),
        )
        .await
    }

    async fn verify_account_registration(
        &self,
        req: &VerifyRegistrationRequest,
    ) -> Result<ApiMessage, ApiError> {
        self.execute(
            self.http
                .put(self.url("/user/verify-account-registration"))
                .json(req),
        )
        .await
    }

    async fn send_verification_email(&self, email: &str) -> Result<ApiMessage, ApiError> {
        self.execute(
            self.http
                .put(self.url("/user/send-verification-email-registration"))
                .json(&serde_json::json!({ "email": email })),
        )
        .await
    }

    async fn login_user(&self, req: &LoginRequest) -> Result<AuthPayload, ApiError> {
        self.execute(self.http.post(self.url("/user/login-user")).json(req))
            .await
    }

    async fn google_login(&self, access_token: &str) -> Result<AuthPayload, ApiError> {
        let req = GoogleLoginRequest { access_token: access_token.to_string() };
        self.execute(self.http.post(self.url("/user/google-login")).json(&req))
            .await
    }

    async fn forgot_password(&self, email: &str) -> Result<ApiMessage, ApiError> {
        self.execute(
            self.http
                .put(self.url("/user/forgot-password"))
                .json(&serde_json::json!({ "email": email })),
        )
        .await
    }

    async fn verify_account_reset_password(
        &self,
        req: &VerifyResetPasswordRequest,
    ) -> Result<ApiMessage, ApiError> {
        self.execute(
            self.http
                .put(self.url("/user/verify-account-reset-password"))
                .json(req),
        )
        .await
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<ApiMessage, ApiError> {
        self.execute(self.http.put(self.url("/user/reset-password")).json(req))
            .await
    }

    async fn get_current_user(&self, token: &str) -> Result<UserProfile, ApiError> {
        let envelope: UserEnvelope = self
            .execute(Self::bearer(self.http.get(self.url("/user/get-current-user")), token))
            .await?;
        Ok(envelope.user)
    }

    async fn check_username(&self, username: &str) -> Result<bool, ApiError> {
        let probe: UsernameExists = self
            .execute(
                self.http
                    .get(self.url("/user/check-username"))
                    .query(&[("username", username)]),
            )
            .await?;
        Ok(probe.exists)
    }

    async fn update_user_details(
        &self,
        token: &str,
        user_id: &str,
        update: &UserDetailsUpdate,
    ) -> Result<UpdatedUser, ApiError> {
        let path = format!("/user/update-user-details/{user_id}");
        self.execute(Self::bearer(self.http.put(self.url(&path)), token).json(update))
            .await
    }

    async fn delete_user(&self, token: &str, user_id: &str) -> Result<ApiMessage, ApiError> {
        let path = format!("/user/delete-user/{user_id}");
        self.execute(Self::bearer(self.http.delete(self.url(&path)), token))
            .await
    }

    async fn public_profile(&self, username: &str) -> Result<UserProfile, ApiError> {
        let envelope: UserEnvelope = self
            .execute(
                self.http
                    .get(self.url("/user/public-profile"))
                    .query(&[("username", username)]),
            )
            .await?;
        Ok(envelope.user)
    }
}

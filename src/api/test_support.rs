//! In-memory fake backend for flow tests.
//!
//! Implements [`UserApi`] over a mutex-guarded user table so tests can
//! exercise full flows without a network. Error payloads mimic the
//! backend's `{ success, message }` envelope.

use std::collections::HashMap;
use std::sync::Mutex;

use super::types::{
    ApiError, ApiMessage, AuthPayload, LoginRequest, RegisterRequest, ResetPasswordRequest, Role,
    SellerStatus, UpdatedUser, UserDetailsUpdate, UserProfile, VerifyRegistrationRequest,
    VerifyResetPasswordRequest,
};
use super::UserApi;

pub(crate) const FAKE_OTP: &str = "123456";

fn error_body(message: &str) -> String {
    serde_json::json!({ "success": false, "message": message }).to_string()
}

fn api_error(status: u16, message: &str) -> ApiError {
    ApiError::Api { status, body: error_body(message) }
}

/// Minimal verified buyer profile for seeding tests.
pub(crate) fn buyer(username: &str) -> UserProfile {
    UserProfile {
        id: format!("id-{username}"),
        full_name: "Test User".into(),
        username: username.into(),
        email: format!("{username}@example.com"),
        contact: "9876543210".into(),
        roles: vec![Role::Buyer],
        profile_picture_url: None,
        is_verified: true,
        seller_status: SellerStatus::None,
        seller_banned_to: None,
        is_seller_permanently_banned: false,
    }
}

/// Verified seller profile for seeding tests.
pub(crate) fn seller(username: &str) -> UserProfile {
    let mut profile = buyer(username);
    profile.roles = vec![Role::Buyer, Role::Seller];
    profile.seller_status = SellerStatus::Verified;
    profile
}

struct FakeUser {
    profile: UserProfile,
    password: String,
}

#[derive(Default)]
struct FakeState {
    users: Vec<FakeUser>,
    tokens: HashMap<String, String>,
    fail: Option<ApiError>,
    next_token: u64,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_user(profile: UserProfile, password: &str) -> Self {
        let api = Self::new();
        api.add_user(profile, password);
        api
    }

    pub(crate) fn add_user(&self, profile: UserProfile, password: &str) {
        let mut state = self.lock();
        state
            .users
            .push(FakeUser { profile, password: password.into() });
    }

    /// Force every subsequent call to fail, simulating a network outage.
    pub(crate) fn fail_with(&self, error: ApiError) {
        self.lock().fail = Some(error);
    }

    /// Mint a session token for an existing user without logging in.
    pub(crate) fn issue_token(&self, username: &str) -> String {
        let mut state = self.lock();
        let user_id = state
            .users
            .iter()
            .find(|u| u.profile.username == username)
            .map(|u| u.profile.id.clone())
            .expect("unknown user");
        state.next_token += 1;
        let token = format!("tok-{}", state.next_token);
        state.tokens.insert(token.clone(), user_id);
        token
    }

    pub(crate) fn profile_of(&self, username: &str) -> Option<UserProfile> {
        self.lock()
            .users
            .iter()
            .find(|u| u.profile.username == username)
            .map(|u| u.profile.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check_fail(&self) -> Result<(), ApiError> {
        match &self.lock().fail {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl UserApi for FakeApi {
    async fn register_user(&self, req: &RegisterRequest) -> Result<ApiMessage, ApiError> {
        self.check_fail()?;
        let mut state = self.lock();
        if state.users.iter().any(|u| u.profile.username == req.username) {
            return Err(api_error(409, "Username is already taken"));
        }
        if state.users.iter().any(|u| u.profile.email == req.email) {
            return Err(api_error(409, "Email is already registered"));
        }
        let profile = UserProfile {
            id: format!("id-{}", req.username),
            full_name: req.full_name.clone(),
            username: req.username.clone(),
            email: req.email.clone(),
            contact: req.contact.clone(),
            roles: req.role.clone(),
            profile_picture_url: None,
            is_verified: false,
            seller_status: if req.role.contains(&Role::Seller) {
                SellerStatus::Pending
            } else {
                SellerStatus::None
            },
            seller_banned_to: None,
            is_seller_permanently_banned: false,
        };
        state
            .users
            .push(FakeUser { profile, password: req.password.clone() });
        Ok(ApiMessage { success: true, message: "User registered. Please verify your account.".into() })
    }

    async fn check_username_unique(&self, username: &str) -> Result<ApiMessage, ApiError> {
        self.check_fail()?;
        let taken = self
            .lock()
            .users
            .iter()
            .any(|u| u.profile.username == username);
        if taken {
            return Err(api_error(400, "Username is already taken"));
        }
        Ok(ApiMessage { success: true, message: "Username is available".into() })
    }

    async fn verify_account_registration(
        &self,
        req: &VerifyRegistrationRequest,
    ) -> Result<ApiMessage, ApiError> {
        self.check_fail()?;
        if req.code != FAKE_OTP {
            return Err(api_error(400, "Incorrect verification code"));
        }
        let mut state = self.lock();
        let Some(user) = state
            .users
            .iter_mut()
            .find(|u| u.profile.username == req.username)
        else {
            return Err(api_error(404, "User not found"));
        };
        user.profile.is_verified = true;
        Ok(ApiMessage { success: true, message: "Account verified".into() })
    }

    async fn send_verification_email(&self, _email: &str) -> Result<ApiMessage, ApiError> {
        self.check_fail()?;
        Ok(ApiMessage { success: true, message: "Verification code sent".into() })
    }

    async fn login_user(&self, req: &LoginRequest) -> Result<AuthPayload, ApiError> {
        self.check_fail()?;
        let mut state = self.lock();
        let Some(index) = state
            .users
            .iter()
            .position(|u| u.profile.username == req.identifier || u.profile.email == req.identifier)
        else {
            return Err(api_error(401, "Invalid credentials"));
        };
        if state.users[index].password != req.password {
            return Err(api_error(401, "Invalid credentials"));
        }
        let profile = state.users[index].profile.clone();
        if !profile.is_verified {
            return Ok(AuthPayload { user: profile, token: None, message: "Account not verified".into() });
        }
        state.next_token += 1;
        let token = format!("tok-{}", state.next_token);
        state.tokens.insert(token.clone(), profile.id.clone());
        Ok(AuthPayload { user: profile, token: Some(token), message: "Login successful".into() })
    }

    async fn google_login(&self, access_token: &str) -> Result<AuthPayload, ApiError> {
        self.check_fail()?;
        if access_token.is_empty() {
            return Err(api_error(401, "Invalid access token"));
        }
        let mut state = self.lock();
        if state
            .users
            .iter()
            .all(|u| u.profile.username != "googleuser")
        {
            state
                .users
                .push(FakeUser { profile: buyer("googleuser"), password: String::new() });
        }
        let profile = state
            .users
            .iter()
            .find(|u| u.profile.username == "googleuser")
            .map(|u| u.profile.clone())
            .expect("seeded above");
        state.next_token += 1;
        let token = format!("tok-{}", state.next_token);
        state.tokens.insert(token.clone(), profile.id.clone());
        Ok(AuthPayload { user: profile, token: Some(token), message: "Login successful".into() })
    }

    async fn forgot_password(&self, email: &str) -> Result<ApiMessage, ApiError> {
        self.check_fail()?;
        let known = self.lock().users.iter().any(|u| u.profile.email == email);
        if !known {
            return Err(api_error(404, "No account with that email"));
        }
        Ok(ApiMessage { success: true, message: "Reset code sent".into() })
    }

    async fn verify_account_reset_password(
        &self,
        req: &VerifyResetPasswordRequest,
    ) -> Result<ApiMessage, ApiError> {
        self.check_fail()?;
        if req.code != FAKE_OTP {
            return Err(api_error(400, "Incorrect verification code"));
        }
        Ok(ApiMessage { success: true, message: "Code verified".into() })
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<ApiMessage, ApiError> {
        self.check_fail()?;
        let mut state = self.lock();
        let Some(user) = state
            .users
            .iter_mut()
            .find(|u| u.profile.email == req.email)
        else {
            return Err(api_error(404, "No account with that email"));
        };
        user.password = req.new_password.clone();
        Ok(ApiMessage { success: true, message: "Password reset successful".into() })
    }

    async fn get_current_user(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.check_fail()?;
        let state = self.lock();
        let Some(user_id) = state.tokens.get(token) else {
            return Err(api_error(401, "Session expired"));
        };
        state
            .users
            .iter()
            .find(|u| &u.profile.id == user_id)
            .map(|u| u.profile.clone())
            .ok_or_else(|| api_error(401, "Session expired"))
    }

    async fn check_username(&self, username: &str) -> Result<bool, ApiError> {
        self.check_fail()?;
        Ok(self
            .lock()
            .users
            .iter()
            .any(|u| u.profile.username == username))
    }

    async fn update_user_details(
        &self,
        token: &str,
        user_id: &str,
        update: &UserDetailsUpdate,
    ) -> Result<UpdatedUser, ApiError> {
        self.check_fail()?;
        let mut state = self.lock();
        if state.tokens.get(token).map(String::as_str) != Some(user_id) {
            return Err(api_error(401, "Session expired"));
        }
        let Some(user) = state.users.iter_mut().find(|u| u.profile.id == user_id) else {
            return Err(api_error(404, "User not found"));
        };
        if let Some(full_name) = &update.full_name {
            user.profile.full_name = full_name.clone();
        }
        if let Some(username) = &update.username {
            user.profile.username = username.clone();
        }
        if let Some(email) = &update.email {
            user.profile.email = email.clone();
        }
        if let Some(contact) = &update.contact {
            user.profile.contact = contact.clone();
        }
        if update.changes_identity() {
            user.profile.is_verified = false;
        }
        Ok(UpdatedUser { user: Some(user.profile.clone()), message: "User updated".into() })
    }

    async fn delete_user(&self, token: &str, user_id: &str) -> Result<ApiMessage, ApiError> {
        self.check_fail()?;
        let mut state = self.lock();
        if state.tokens.get(token).map(String::as_str) != Some(user_id) {
            return Err(api_error(401, "Session expired"));
        }
        state.users.retain(|u| u.profile.id != user_id);
        state.tokens.retain(|_, id| id != user_id);
        Ok(ApiMessage { success: true, message: "Account deleted".into() })
    }

    async fn public_profile(&self, username: &str) -> Result<UserProfile, ApiError> {
        self.check_fail()?;
        self.lock()
            .users
            .iter()
            .find(|u| u.profile.username == username)
            .map(|u| u.profile.clone())
            .ok_or_else(|| api_error(404, "User not found"))
    }
}

//! Login flow: credential login, Google token login, logout.
//!
//! Entering the login view clears any existing session first, matching
//! the production behavior, so a failed attempt can never leave a stale
//! identity behind.

use std::fmt::Write;

use rand::Rng;
use tracing::{info, warn};

use crate::api::types::LoginRequest;
use crate::api::UserApi;
use crate::cancel::{abortable, CancelToken};
use crate::error::ClientError;
use crate::session::SessionStore;
use crate::validate::LoginForm;

/// Outcome of a credential login attempt that the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn { message: String },
    /// Credentials are valid but the account still needs OTP
    /// verification; no session is established.
    NeedsVerification { email: String },
}

/// Authenticate with username/email + password.
///
/// # Errors
///
/// Empty fields are rejected locally; bad credentials carry the server's
/// message. Aborted attempts leave the (already cleared) session alone.
pub async fn login(
    api: &dyn UserApi,
    session: &SessionStore,
    form: &LoginForm,
    cancel: &CancelToken,
) -> Result<LoginOutcome, ClientError> {
    session.logout().await?;
    form.validate()?;

    let request = LoginRequest { identifier: form.identifier.clone(), password: form.password.clone() };
    let payload = abortable(cancel, async {
        api.login_user(&request).await.map_err(ClientError::from)
    })
    .await?;

    if !payload.user.is_verified {
        info!(identifier = %form.identifier, "login blocked: account not verified");
        return Ok(LoginOutcome::NeedsVerification { email: payload.user.email });
    }

    let Some(token) = payload.token else {
        warn!("login response for verified account carried no token");
        return Err(ClientError::Api(crate::api::ApiError::Parse(
            "login response missing token".into(),
        )));
    };

    session.login(payload.user, token).await?;
    Ok(LoginOutcome::LoggedIn { message: payload.message })
}

/// Authenticate by forwarding a Google OAuth access token.
///
/// # Errors
///
/// Propagates gateway failures; the provider handshake itself happens in
/// the shell's federation widget.
pub async fn login_with_google(
    api: &dyn UserApi,
    session: &SessionStore,
    access_token: &str,
    cancel: &CancelToken,
) -> Result<String, ClientError> {
    let payload = abortable(cancel, async {
        api.google_login(access_token).await.map_err(ClientError::from)
    })
    .await?;

    let Some(token) = payload.token else {
        return Err(ClientError::Api(crate::api::ApiError::Parse(
            "google login response missing token".into(),
        )));
    };

    session.login(payload.user, token).await?;
    Ok(payload.message)
}

/// Clear the session and durable storage.
///
/// # Errors
///
/// Returns a storage error if the persisted credential cannot be removed.
pub async fn logout(session: &SessionStore) -> Result<(), ClientError> {
    session.logout().await?;
    Ok(())
}

// =============================================================================
// OAUTH URL
// =============================================================================

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 16-byte hex state nonce.
#[must_use]
pub fn generate_oauth_state() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Build the Google authorization URL plus the state nonce the shell
/// must check on callback.
#[must_use]
pub fn google_authorize_url(client_id: &str, redirect_uri: &str) -> (String, String) {
    let state = generate_oauth_state();
    let url = format!(
        "https://accounts.google.com/o/oauth2/v2/auth?client_id={client_id}&redirect_uri={redirect_uri}&response_type=token&scope=openid%20email%20profile&state={state}"
    );
    (url, state)
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;

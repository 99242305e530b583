//! Sign-up flow: registration and the live username-availability probe.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::api::{ApiError, UserApi};
use crate::cancel::{abortable, CancelToken};
use crate::error::ClientError;
use crate::validate::{validate_username, SignUpForm, ValidationError};

/// Successful registration. The account is created unverified; the shell
/// routes to OTP entry next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub username: String,
    pub message: String,
}

/// Result of a username-availability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameAvailability {
    Available { message: String },
    Taken { message: String },
}

/// Monotonic sequence for availability probes. The probe and a form
/// submit may race; shells keep the result with the highest sequence
/// number and drop the rest (last response wins).
#[derive(Debug, Default)]
pub struct ProbeSequence {
    next: AtomicU64,
}

impl ProbeSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next probe number.
    pub fn advance(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Register a new account.
///
/// # Errors
///
/// Validation issues never reach the network; gateway errors carry the
/// server's payload.
pub async fn sign_up(
    api: &dyn UserApi,
    form: &SignUpForm,
    cancel: &CancelToken,
) -> Result<SignUpOutcome, ClientError> {
    form.validate()?;

    let request = form.to_request();
    let message = abortable(cancel, async {
        api.register_user(&request).await.map_err(ClientError::from)
    })
    .await?;

    info!(username = %form.username, "account registered, verification pending");
    Ok(SignUpOutcome { username: form.username.clone(), message: message.message })
}

/// Probe whether a username is free. Format is checked locally first so
/// obviously invalid names never hit the backend.
///
/// # Errors
///
/// Propagates transport failures; a definitive "taken" answer is a
/// normal result, not an error.
pub async fn check_username_availability(
    api: &dyn UserApi,
    username: &str,
    cancel: &CancelToken,
) -> Result<UsernameAvailability, ClientError> {
    if let Err(issue) = validate_username(username) {
        return Err(ClientError::Validation(ValidationError { issues: vec![issue] }));
    }

    let result = abortable(cancel, async {
        api.check_username_unique(username).await.map_err(ClientError::from)
    })
    .await;

    match result {
        Ok(reply) => Ok(UsernameAvailability::Available { message: reply.message }),
        // The backend answers "taken" as a 4xx with its own message.
        Err(ClientError::Api(e @ ApiError::Api { status: 400..=409, .. })) => {
            let message = e
                .server_message()
                .unwrap_or_else(|| "Username is already taken".to_string());
            Ok(UsernameAvailability::Taken { message })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "signup_test.rs"]
mod tests;

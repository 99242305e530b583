//! Account verification flow: OTP entry and resend.

use tracing::info;

use crate::api::types::VerifyRegistrationRequest;
use crate::api::UserApi;
use crate::cancel::{abortable, CancelToken};
use crate::error::ClientError;
use crate::validate::{validate_email, validate_otp_code, ValidationError};

/// Submit the six-digit registration code for `username`.
///
/// # Errors
///
/// A malformed code is rejected locally; an incorrect one comes back as
/// the server's error payload.
pub async fn verify_registration(
    api: &dyn UserApi,
    username: &str,
    code: &str,
    cancel: &CancelToken,
) -> Result<String, ClientError> {
    if let Err(issue) = validate_otp_code(code) {
        return Err(ClientError::Validation(ValidationError { issues: vec![issue] }));
    }

    let request = VerifyRegistrationRequest { username: username.to_string(), code: code.to_string() };
    let reply = abortable(cancel, async {
        api.verify_account_registration(&request)
            .await
            .map_err(ClientError::from)
    })
    .await?;

    info!(%username, "account verified");
    Ok(reply.message)
}

/// Ask the backend to email a fresh registration code.
///
/// # Errors
///
/// Propagates gateway failures.
pub async fn resend_verification_email(
    api: &dyn UserApi,
    email: &str,
    cancel: &CancelToken,
) -> Result<String, ClientError> {
    if let Err(issue) = validate_email(email) {
        return Err(ClientError::Validation(ValidationError { issues: vec![issue] }));
    }

    let reply = abortable(cancel, async {
        api.send_verification_email(email).await.map_err(ClientError::from)
    })
    .await?;

    info!(%email, "verification email requested");
    Ok(reply.message)
}

#[cfg(test)]
#[path = "verification_test.rs"]
mod tests;

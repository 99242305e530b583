//! Password reset flow: request code, verify code, set new password.

use tracing::info;

use crate::api::types::VerifyResetPasswordRequest;
use crate::api::UserApi;
use crate::cancel::{abortable, CancelToken};
use crate::error::ClientError;
use crate::validate::{validate_email, validate_otp_code, ResetPasswordForm, ValidationError};

/// Request a reset code for `email`.
///
/// # Errors
///
/// Invalid email shapes are rejected locally; unknown accounts carry the
/// server's message.
pub async fn request_reset(
    api: &dyn UserApi,
    email: &str,
    cancel: &CancelToken,
) -> Result<String, ClientError> {
    if let Err(issue) = validate_email(email) {
        return Err(ClientError::Validation(ValidationError { issues: vec![issue] }));
    }

    let reply = abortable(cancel, async {
        api.forgot_password(email).await.map_err(ClientError::from)
    })
    .await?;

    info!(%email, "password reset code requested");
    Ok(reply.message)
}

/// Verify the emailed reset code before allowing a new password.
///
/// # Errors
///
/// A malformed code is rejected locally; an incorrect one comes back as
/// the server's error payload.
pub async fn verify_reset_code(
    api: &dyn UserApi,
    email: &str,
    code: &str,
    cancel: &CancelToken,
) -> Result<String, ClientError> {
    let mut issues = Vec::new();
    if let Err(issue) = validate_email(email) {
        issues.push(issue);
    }
    if let Err(issue) = validate_otp_code(code) {
        issues.push(issue);
    }
    if !issues.is_empty() {
        return Err(ClientError::Validation(ValidationError { issues }));
    }

    let request = VerifyResetPasswordRequest { email: email.to_string(), code: code.to_string() };
    let reply = abortable(cancel, async {
        api.verify_account_reset_password(&request)
            .await
            .map_err(ClientError::from)
    })
    .await?;

    Ok(reply.message)
}

/// Set the new password after the code step.
///
/// # Errors
///
/// Weak or mismatched passwords are rejected locally and never reach the
/// network layer.
pub async fn reset_password(
    api: &dyn UserApi,
    form: &ResetPasswordForm,
    cancel: &CancelToken,
) -> Result<String, ClientError> {
    form.validate()?;

    let request = form.to_request();
    let reply = abortable(cancel, async {
        api.reset_password(&request).await.map_err(ClientError::from)
    })
    .await?;

    info!(email = %form.email, "password reset completed");
    Ok(reply.message)
}

#[cfg(test)]
#[path = "password_test.rs"]
mod tests;

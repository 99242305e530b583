use super::*;
use crate::api::test_support::{self, FakeApi, FAKE_OTP};
use crate::validate::LoginForm;

// =============================================================================
// request_reset
// =============================================================================

#[tokio::test]
async fn request_reset_for_known_account() {
    let api = FakeApi::with_user(test_support::buyer("alice"), "Old1?pass");
    let message = request_reset(&api, "alice@example.com", &CancelToken::never())
        .await
        .unwrap();
    assert_eq!(message, "Reset code sent");
}

#[tokio::test]
async fn request_reset_unknown_email_surfaces_server_message() {
    let api = FakeApi::new();
    let err = request_reset(&api, "ghost@example.com", &CancelToken::never())
        .await
        .unwrap_err();
    assert_eq!(err.display_message(), Some("No account with that email".to_string()));
}

#[tokio::test]
async fn request_reset_invalid_email_rejected_locally() {
    let api = FakeApi::new();
    api.fail_with(crate::api::ApiError::Request("must not be called".into()));
    let err = request_reset(&api, "bad", &CancelToken::never()).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

// =============================================================================
// verify_reset_code
// =============================================================================

#[tokio::test]
async fn verify_reset_code_accepts_correct_code() {
    let api = FakeApi::with_user(test_support::buyer("alice"), "Old1?pass");
    let message = verify_reset_code(&api, "alice@example.com", FAKE_OTP, &CancelToken::never())
        .await
        .unwrap();
    assert_eq!(message, "Code verified");
}

#[tokio::test]
async fn verify_reset_code_rejects_wrong_code() {
    let api = FakeApi::with_user(test_support::buyer("alice"), "Old1?pass");
    let err = verify_reset_code(&api, "alice@example.com", "999999", &CancelToken::never())
        .await
        .unwrap_err();
    assert_eq!(err.display_message(), Some("Incorrect verification code".to_string()));
}

#[tokio::test]
async fn verify_reset_code_collects_local_issues() {
    let api = FakeApi::new();
    api.fail_with(crate::api::ApiError::Request("must not be called".into()));
    let err = verify_reset_code(&api, "bad", "12", &CancelToken::never())
        .await
        .unwrap_err();
    let ClientError::Validation(validation) = err else {
        panic!("expected validation error");
    };
    assert!(validation.field("email").is_some());
    assert!(validation.field("code").is_some());
}

// =============================================================================
// reset_password
// =============================================================================

#[tokio::test]
async fn reset_password_updates_credentials() {
    let api = FakeApi::with_user(test_support::buyer("alice"), "Old1?pass");
    let form = ResetPasswordForm {
        email: "alice@example.com".into(),
        password: "Fresh1?pw".into(),
        confirm_password: "Fresh1?pw".into(),
    };
    let message = reset_password(&api, &form, &CancelToken::never()).await.unwrap();
    assert_eq!(message, "Password reset successful");

    // Old password no longer works; new one does.
    let session = crate::session::SessionStore::in_memory();
    let old = crate::services::login::login(
        &api,
        &session,
        &LoginForm { identifier: "alice".into(), password: "Old1?pass".into() },
        &CancelToken::never(),
    )
    .await;
    assert!(old.is_err());

    let new = crate::services::login::login(
        &api,
        &session,
        &LoginForm { identifier: "alice".into(), password: "Fresh1?pw".into() },
        &CancelToken::never(),
    )
    .await;
    assert!(new.is_ok());
}

#[tokio::test]
async fn reset_password_mismatch_blocks_submission() {
    let api = FakeApi::with_user(test_support::buyer("alice"), "Old1?pass");
    api.fail_with(crate::api::ApiError::Request("must not be called".into()));

    let form = ResetPasswordForm {
        email: "alice@example.com".into(),
        password: "Fresh1?pw".into(),
        confirm_password: "Other1?pw".into(),
    };
    let err = reset_password(&api, &form, &CancelToken::never()).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

//! Profile flows: session restore, refresh, edit, delete, public view.

use tracing::{info, warn};

use crate::api::types::{UserDetailsUpdate, UserProfile};
use crate::api::{ApiError, UserApi};
use crate::cancel::{abortable, CancelToken};
use crate::error::ClientError;
use crate::session::SessionStore;
use crate::validate::{
    validate_contact, validate_email, validate_full_name, validate_username, ValidationError,
};

/// Outcome of a profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Updated { message: String },
    /// The backend de-verified the account (username or email changed).
    /// The session has been cleared; the shell routes to OTP entry.
    ReverifyRequired { username: String },
}

/// Restore a session from a persisted token at startup.
///
/// Enforces the store invariant: a credential that cannot be redeemed
/// for a profile is cleared (fail closed). Returns `false` when no token
/// was stored.
///
/// # Errors
///
/// Aborted restores leave everything untouched; gateway failures clear
/// the stale credential before propagating.
pub async fn restore_session(
    api: &dyn UserApi,
    session: &SessionStore,
    cancel: &CancelToken,
) -> Result<bool, ClientError> {
    let Some(token) = session.persisted_token()? else {
        return Ok(false);
    };

    let fetched = abortable(cancel, async {
        api.get_current_user(&token).await.map_err(ClientError::from)
    })
    .await;

    match fetched {
        Ok(user) => {
            session.login(user, token).await?;
            info!("session restored from persisted token");
            Ok(true)
        }
        Err(ClientError::Aborted) => Err(ClientError::Aborted),
        Err(e) => {
            warn!(error = %e, "persisted token rejected; clearing session");
            session.logout().await?;
            Err(e)
        }
    }
}

/// Re-fetch the current user into the session cache.
///
/// # Errors
///
/// Fails with [`ApiError::MissingToken`] when no session is active.
pub async fn refresh_current_user(
    api: &dyn UserApi,
    session: &SessionStore,
    cancel: &CancelToken,
) -> Result<UserProfile, ClientError> {
    let Some(token) = session.token().await else {
        return Err(ClientError::Api(ApiError::MissingToken));
    };

    let user = abortable(cancel, async {
        api.get_current_user(&token).await.map_err(ClientError::from)
    })
    .await?;

    session.replace_profile(user.clone()).await;
    Ok(user)
}

fn validate_update(update: &UserDetailsUpdate) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    if let Some(full_name) = &update.full_name {
        if let Err(issue) = validate_full_name(full_name) {
            issues.push(issue);
        }
    }
    if let Some(username) = &update.username {
        if let Err(issue) = validate_username(username) {
            issues.push(issue);
        }
    }
    if let Some(email) = &update.email {
        if let Err(issue) = validate_email(email) {
            issues.push(issue);
        }
    }
    if let Some(contact) = &update.contact {
        if let Err(issue) = validate_contact(contact) {
            issues.push(issue);
        }
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

/// Edit profile details for the logged-in user.
///
/// A username or email change de-verifies the account server-side; the
/// flow then clears the session and reports [`EditOutcome::ReverifyRequired`].
///
/// # Errors
///
/// Set fields are validated locally first; gateway failures carry the
/// server's payload.
pub async fn edit_details(
    api: &dyn UserApi,
    session: &SessionStore,
    update: &UserDetailsUpdate,
    cancel: &CancelToken,
) -> Result<EditOutcome, ClientError> {
    validate_update(update)?;

    let snapshot = session.snapshot().await;
    let (Some(user), Some(token)) = (snapshot.user, snapshot.token) else {
        return Err(ClientError::Api(ApiError::MissingToken));
    };

    let reply = abortable(cancel, async {
        api.update_user_details(&token, &user.id, update)
            .await
            .map_err(ClientError::from)
    })
    .await?;

    let reverify = reply.user.as_ref().is_some_and(|u| !u.is_verified)
        || (reply.user.is_none() && update.changes_identity());
    if reverify {
        let username = reply
            .user
            .map(|u| u.username)
            .or_else(|| update.username.clone())
            .unwrap_or(user.username);
        info!(%username, "identity changed; account requires re-verification");
        session.logout().await?;
        return Ok(EditOutcome::ReverifyRequired { username });
    }

    session.update_profile(update).await;
    Ok(EditOutcome::Updated { message: reply.message })
}

/// Delete the logged-in user's account and clear the session.
///
/// # Errors
///
/// Fails with [`ApiError::MissingToken`] when no session is active.
pub async fn delete_account(
    api: &dyn UserApi,
    session: &SessionStore,
    cancel: &CancelToken,
) -> Result<String, ClientError> {
    let snapshot = session.snapshot().await;
    let (Some(user), Some(token)) = (snapshot.user, snapshot.token) else {
        return Err(ClientError::Api(ApiError::MissingToken));
    };

    let reply = abortable(cancel, async {
        api.delete_user(&token, &user.id).await.map_err(ClientError::from)
    })
    .await?;

    info!(username = %user.username, "account deleted");
    session.account_deleted().await?;
    Ok(reply.message)
}

/// Fetch any user's public profile. Unauthenticated.
///
/// # Errors
///
/// Invalid username shapes are rejected locally; unknown users carry the
/// server's message.
pub async fn public_profile(
    api: &dyn UserApi,
    username: &str,
    cancel: &CancelToken,
) -> Result<UserProfile, ClientError> {
    if let Err(issue) = validate_username(username) {
        return Err(ClientError::Validation(ValidationError { issues: vec![issue] }));
    }

    abortable(cancel, async {
        api.public_profile(username).await.map_err(ClientError::from)
    })
    .await
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;

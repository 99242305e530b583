//! Seller onboarding and standing.
//!
//! Onboarding reuses the sign-up machinery with the seller role forced
//! on; access afterwards is gated by verification status and ban windows
//! (see `crate::access`).

use time::OffsetDateTime;

use crate::api::types::{Role, SellerStatus, UserProfile};
use crate::api::UserApi;
use crate::cancel::CancelToken;
use crate::error::ClientError;
use crate::services::signup::{self, SignUpOutcome};
use crate::services::verification;
use crate::validate::SignUpForm;

/// Where a profile stands in the seller lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SellerStanding {
    /// Verified, unbanned: may use seller routes.
    Eligible,
    /// Application submitted, verification pending.
    AwaitingVerification,
    Rejected,
    TemporarilyBanned { until: OffsetDateTime },
    PermanentlyBanned,
    /// No seller role on the profile.
    NotSeller,
}

/// Classify a profile's seller standing at `now`.
#[must_use]
pub fn seller_standing(user: &UserProfile, now: OffsetDateTime) -> SellerStanding {
    if !user.has_role(Role::Seller) {
        return SellerStanding::NotSeller;
    }
    if user.is_seller_permanently_banned {
        return SellerStanding::PermanentlyBanned;
    }
    if let Some(until) = user.seller_banned_to.filter(|until| *until > now) {
        return SellerStanding::TemporarilyBanned { until };
    }
    match user.seller_status {
        SellerStatus::Verified => SellerStanding::Eligible,
        SellerStatus::Rejected => SellerStanding::Rejected,
        SellerStatus::Pending | SellerStatus::None => SellerStanding::AwaitingVerification,
    }
}

/// Register a seller account. The seller role is forced onto the form.
///
/// # Errors
///
/// Same contract as [`signup::sign_up`].
pub async fn seller_sign_up(
    api: &dyn UserApi,
    form: &SignUpForm,
    cancel: &CancelToken,
) -> Result<SignUpOutcome, ClientError> {
    let mut form = form.clone();
    if !form.roles.contains(&Role::Seller) {
        form.roles.push(Role::Seller);
    }
    signup::sign_up(api, &form, cancel).await
}

/// OTP step of seller onboarding.
///
/// # Errors
///
/// Same contract as [`verification::verify_registration`].
pub async fn verify_seller_registration(
    api: &dyn UserApi,
    username: &str,
    code: &str,
    cancel: &CancelToken,
) -> Result<String, ClientError> {
    verification::verify_registration(api, username, code, cancel).await
}

#[cfg(test)]
#[path = "seller_test.rs"]
mod tests;

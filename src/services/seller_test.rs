use super::*;
use crate::api::test_support::{self, FakeApi, FAKE_OTP};
use time::Duration;

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

fn seller_form() -> SignUpForm {
    SignUpForm {
        full_name: "Sally Seller".into(),
        username: "sally".into(),
        email: "sally@example.com".into(),
        contact: "9876543210".into(),
        password: "Secret1?".into(),
        confirm_password: "Secret1?".into(),
        terms: true,
        roles: vec![],
    }
}

// =============================================================================
// seller_standing
// =============================================================================

#[test]
fn verified_unbanned_seller_is_eligible() {
    let user = test_support::seller("sally");
    assert_eq!(seller_standing(&user, now()), SellerStanding::Eligible);
}

#[test]
fn buyer_is_not_seller() {
    let user = test_support::buyer("alice");
    assert_eq!(seller_standing(&user, now()), SellerStanding::NotSeller);
}

#[test]
fn pending_seller_awaits_verification() {
    let mut user = test_support::seller("sally");
    user.seller_status = SellerStatus::Pending;
    assert_eq!(seller_standing(&user, now()), SellerStanding::AwaitingVerification);
}

#[test]
fn rejected_seller_reports_rejected() {
    let mut user = test_support::seller("sally");
    user.seller_status = SellerStatus::Rejected;
    assert_eq!(seller_standing(&user, now()), SellerStanding::Rejected);
}

#[test]
fn active_ban_reports_window() {
    let until = now() + Duration::days(2);
    let mut user = test_support::seller("sally");
    user.seller_banned_to = Some(until);
    assert_eq!(seller_standing(&user, now()), SellerStanding::TemporarilyBanned { until });
}

#[test]
fn expired_ban_is_eligible_again() {
    let mut user = test_support::seller("sally");
    user.seller_banned_to = Some(now() - Duration::days(2));
    assert_eq!(seller_standing(&user, now()), SellerStanding::Eligible);
}

#[test]
fn permanent_ban_outranks_everything() {
    let mut user = test_support::seller("sally");
    user.seller_banned_to = Some(now() + Duration::days(2));
    user.is_seller_permanently_banned = true;
    assert_eq!(seller_standing(&user, now()), SellerStanding::PermanentlyBanned);
}

// =============================================================================
// seller onboarding
// =============================================================================

#[tokio::test]
async fn seller_sign_up_forces_seller_role() {
    let api = FakeApi::new();
    let outcome = seller_sign_up(&api, &seller_form(), &CancelToken::never())
        .await
        .unwrap();
    assert_eq!(outcome.username, "sally");

    let stored = api.profile_of("sally").unwrap();
    assert!(stored.has_role(Role::Seller));
    assert_eq!(stored.seller_status, SellerStatus::Pending);
    assert!(!stored.is_verified);
}

#[tokio::test]
async fn seller_sign_up_keeps_existing_roles() {
    let api = FakeApi::new();
    let mut form = seller_form();
    form.roles = vec![Role::Buyer];
    seller_sign_up(&api, &form, &CancelToken::never()).await.unwrap();

    let stored = api.profile_of("sally").unwrap();
    assert!(stored.has_role(Role::Buyer));
    assert!(stored.has_role(Role::Seller));
}

#[tokio::test]
async fn seller_onboarding_completes_with_otp() {
    let api = FakeApi::new();
    seller_sign_up(&api, &seller_form(), &CancelToken::never()).await.unwrap();
    verify_seller_registration(&api, "sally", FAKE_OTP, &CancelToken::never())
        .await
        .unwrap();

    let stored = api.profile_of("sally").unwrap();
    assert!(stored.is_verified);
    // Seller routes stay closed until an admin marks the seller verified.
    assert_eq!(seller_standing(&stored, now()), SellerStanding::AwaitingVerification);
}

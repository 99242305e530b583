//! Route access engine.
//!
//! DESIGN
//! ======
//! The production guard decided access inside rendering effects and
//! navigated as a side effect. Here the same semantics are an explicit
//! state machine: named states, pure transition functions over the
//! session snapshot, and redirects returned as data. Shells hold
//! [`AccessState::Authenticating`] while [`authorize`] runs, then render
//! whatever it resolves to.
//!
//! FAILURE POLICY
//! ==============
//! Fail closed. A missing role clears the session and lands on the public
//! route; a network error while validating resolves to a denial, never a
//! grant.

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::api::types::{Role, SellerStatus, UserProfile};
use crate::api::UserApi;
use crate::cancel::{abortable, CancelToken};
use crate::error::ClientError;
use crate::session::{Session, SessionStore};

/// Route all denials land on.
pub const PUBLIC_LANDING: &str = "/";

// =============================================================================
// STATES
// =============================================================================

/// Per-navigation access state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessState {
    /// No session; only public routes render.
    Anonymous,
    /// Session present, validation in flight.
    Authenticating,
    Authorized,
    Denied(DenyReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    NotAuthenticated,
    MissingRole(Role),
    SellerNotVerified,
    SellerBanned { until: OffsetDateTime },
    SellerPermanentlyBanned,
}

/// What to do with a `/:username` route segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// The segment names another existing user; show their public
    /// profile instead.
    RedirectPublicProfile(String),
    NotFound,
}

/// Declarative access requirement for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRule {
    pub required_role: Option<Role>,
}

impl RouteRule {
    /// Any authenticated user.
    #[must_use]
    pub fn authenticated() -> Self {
        Self { required_role: None }
    }

    #[must_use]
    pub fn role(role: Role) -> Self {
        Self { required_role: Some(role) }
    }
}

// =============================================================================
// PURE TRANSITIONS
// =============================================================================

/// True when a temporary seller ban is currently in force.
#[must_use]
pub fn seller_ban_active(user: &UserProfile, now: OffsetDateTime) -> bool {
    user.seller_banned_to.is_some_and(|until| until > now)
}

/// Role predicate over a profile. Seller access requires verified status
/// and no active ban window of either kind.
#[must_use]
pub fn role_satisfied(user: &UserProfile, role: Role, now: OffsetDateTime) -> bool {
    match role {
        Role::Buyer | Role::Admin => user.has_role(role),
        Role::Seller => {
            user.has_role(Role::Seller)
                && user.seller_status == SellerStatus::Verified
                && !seller_ban_active(user, now)
                && !user.is_seller_permanently_banned
        }
    }
}

fn deny_reason(user: &UserProfile, role: Role, now: OffsetDateTime) -> DenyReason {
    if !user.has_role(role) {
        return DenyReason::MissingRole(role);
    }
    match role {
        Role::Buyer | Role::Admin => DenyReason::MissingRole(role),
        Role::Seller => {
            if user.is_seller_permanently_banned {
                DenyReason::SellerPermanentlyBanned
            } else if let Some(until) = user.seller_banned_to.filter(|until| *until > now) {
                DenyReason::SellerBanned { until }
            } else {
                DenyReason::SellerNotVerified
            }
        }
    }
}

/// Resolve a session snapshot against a route rule.
#[must_use]
pub fn evaluate_session(user: Option<&UserProfile>, rule: RouteRule, now: OffsetDateTime) -> AccessState {
    let Some(user) = user else {
        return AccessState::Denied(DenyReason::NotAuthenticated);
    };
    match rule.required_role {
        None => AccessState::Authorized,
        Some(role) if role_satisfied(user, role, now) => AccessState::Authorized,
        Some(role) => AccessState::Denied(deny_reason(user, role, now)),
    }
}

/// Resolve a `/:username` segment once its existence is known.
///
/// A segment matching the session's own username renders in place; a
/// different existing user redirects to their public profile; anything
/// else is NotFound.
#[must_use]
pub fn resolve_username_param(param: &str, session_username: &str, exists: bool) -> RouteDecision {
    if !exists {
        return RouteDecision::NotFound;
    }
    if param == session_username {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectPublicProfile(format!("/{param}"))
    }
}

/// Public-route admission. Public routes admit everyone; an existing
/// session is reported so the shell may bounce to the canonical home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicAccess {
    Anonymous,
    AlreadyAuthenticated { canonical_home: String },
}

#[must_use]
pub fn public_route(session: &Session) -> PublicAccess {
    match &session.user {
        Some(user) => PublicAccess::AlreadyAuthenticated { canonical_home: format!("/{}", user.username) },
        None => PublicAccess::Anonymous,
    }
}

// =============================================================================
// DRIVER
// =============================================================================

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    pub state: AccessState,
    pub decision: RouteDecision,
    /// Where to send the user when denied.
    pub redirect: Option<String>,
}

impl Authorization {
    fn denied(reason: DenyReason) -> Self {
        Self {
            state: AccessState::Denied(reason),
            decision: RouteDecision::NotFound,
            redirect: Some(PUBLIC_LANDING.to_string()),
        }
    }
}

/// Drive the access machine for one navigation.
///
/// Denials clear the session (fail closed) and carry the public landing
/// redirect. A failing username probe resolves to NotFound without
/// touching the session, matching the production guard.
///
/// # Errors
///
/// Returns [`ClientError::Aborted`] only when the navigation's cancel
/// token fires; every other failure resolves to a denial.
pub async fn authorize(
    api: &dyn UserApi,
    session: &SessionStore,
    rule: RouteRule,
    username_param: Option<&str>,
    cancel: &CancelToken,
) -> Result<Authorization, ClientError> {
    let snapshot = session.snapshot().await;
    let now = OffsetDateTime::now_utc();

    let state = match evaluate_session(snapshot.user.as_ref(), rule, now) {
        AccessState::Denied(reason) => {
            info!(?reason, "route access denied");
            if let Err(e) = session.logout().await {
                warn!(error = %e, "session clear failed during denial");
            }
            return Ok(Authorization::denied(reason));
        }
        state => state,
    };

    let Some(param) = username_param else {
        return Ok(Authorization { state, decision: RouteDecision::Allow, redirect: None });
    };

    let session_username = snapshot
        .user
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_default();

    let probe = abortable(cancel, async {
        api.check_username(param).await.map_err(ClientError::from)
    })
    .await;

    let decision = match probe {
        Ok(exists) => resolve_username_param(param, &session_username, exists),
        Err(ClientError::Aborted) => return Err(ClientError::Aborted),
        Err(e) => {
            warn!(error = %e, username = param, "username validation failed; denying route");
            RouteDecision::NotFound
        }
    };

    Ok(Authorization { state, decision, redirect: None })
}

#[cfg(test)]
#[path = "access_test.rs"]
mod tests;

//! Client-side form validation.
//!
//! Rules mirror the production sign-up/login/bid schemas. Validation runs
//! before any request is built, so a rejected form never reaches the
//! network layer. Field names in issues use the wire-side camelCase names
//! so shells can attach messages to inputs directly.

use lazy_static::lazy_static;
use regex::Regex;

use crate::api::types::{RegisterRequest, ResetPasswordRequest, Role};

const PASSWORD_SPECIALS: &str = "@$!%*?&";

lazy_static! {
    static ref FULL_NAME_RE: Regex = Regex::new(r"^[a-zA-Z ]+$").unwrap();
    static ref USERNAME_RE: Regex = Regex::new(r"^[a-zA-Z0-9]+$").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    static ref CONTACT_RE: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
    static ref OTP_RE: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

// =============================================================================
// ISSUES
// =============================================================================

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Aggregate validation failure: one entry per rejected field.
#[derive(Debug)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|i| i.field == name)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.issues.iter().map(|i| i.field).collect();
        write!(f, "validation failed: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationError {}

fn finish(issues: Vec<FieldIssue>) -> Result<(), ValidationError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

// =============================================================================
// FIELD RULES
// =============================================================================

/// 3–20 characters, alphabetic and spaces only.
pub fn validate_full_name(value: &str) -> Result<(), FieldIssue> {
    if value.chars().count() < 3 {
        return Err(FieldIssue::new("fullName", "Name must be at least 3 characters long"));
    }
    if value.chars().count() > 20 {
        return Err(FieldIssue::new("fullName", "Name must not exceed 20 characters"));
    }
    if !FULL_NAME_RE.is_match(value) {
        return Err(FieldIssue::new("fullName", "Name must contain only alphabets and spaces"));
    }
    Ok(())
}

/// 3–20 characters, alphanumeric only.
pub fn validate_username(value: &str) -> Result<(), FieldIssue> {
    if value.chars().count() < 3 {
        return Err(FieldIssue::new("username", "Username must be at least 3 characters long"));
    }
    if value.chars().count() > 20 {
        return Err(FieldIssue::new("username", "Username must not exceed 20 characters"));
    }
    if !USERNAME_RE.is_match(value) {
        return Err(FieldIssue::new("username", "Username must not contain special characters"));
    }
    Ok(())
}

/// 5–50 characters, mailbox shape.
pub fn validate_email(value: &str) -> Result<(), FieldIssue> {
    if value.chars().count() < 5 {
        return Err(FieldIssue::new("email", "Email must be at least 5 characters long"));
    }
    if value.chars().count() > 50 {
        return Err(FieldIssue::new("email", "Email must not exceed 50 characters"));
    }
    if !EMAIL_RE.is_match(value) {
        return Err(FieldIssue::new("email", "Invalid email address"));
    }
    Ok(())
}

/// Exactly 10 digits.
pub fn validate_contact(value: &str) -> Result<(), FieldIssue> {
    if !CONTACT_RE.is_match(value) {
        return Err(FieldIssue::new("contact", "Contact must be 10 digits long"));
    }
    Ok(())
}

/// 8–20 characters from the allowed set, with at least one lowercase,
/// one uppercase, one digit, and one of `@$!%*?&`.
pub fn validate_password(value: &str) -> Result<(), FieldIssue> {
    let issue = |message: &str| FieldIssue::new("password", message);

    let len = value.chars().count();
    if len < 8 {
        return Err(issue("Password must be at least 8 characters long"));
    }
    if len > 20 {
        return Err(issue("Password must not exceed 20 characters"));
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    let strong = value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if !strong || !value.chars().all(allowed) {
        return Err(issue(
            "Password must contain at least 1 uppercase, 1 lowercase, 1 digit and 1 special character",
        ));
    }
    Ok(())
}

/// Confirmation must match the password exactly.
pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), FieldIssue> {
    if password != confirm {
        return Err(FieldIssue::new("confirmPassword", "Passwords do not match"));
    }
    Ok(())
}

/// Six-digit one-time verification code.
pub fn validate_otp_code(value: &str) -> Result<(), FieldIssue> {
    if !OTP_RE.is_match(value) {
        return Err(FieldIssue::new("code", "Verification code must be 6 digits"));
    }
    Ok(())
}

// =============================================================================
// FORMS
// =============================================================================

/// Sign-up form. Also used for seller onboarding with the seller role.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub contact: String,
    pub password: String,
    pub confirm_password: String,
    pub terms: bool,
    pub roles: Vec<Role>,
}

impl SignUpForm {
    /// Validate every field, collecting all issues.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldIssue`] per rejected field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if let Err(issue) = validate_full_name(&self.full_name) {
            issues.push(issue);
        }
        if let Err(issue) = validate_username(&self.username) {
            issues.push(issue);
        }
        if let Err(issue) = validate_email(&self.email) {
            issues.push(issue);
        }
        if let Err(issue) = validate_contact(&self.contact) {
            issues.push(issue);
        }
        if let Err(issue) = validate_password(&self.password) {
            issues.push(issue);
        }
        if let Err(issue) = validate_confirm_password(&self.password, &self.confirm_password) {
            issues.push(issue);
        }
        if !self.terms {
            issues.push(FieldIssue::new("terms", "You must accept the terms and conditions"));
        }
        finish(issues)
    }

    /// Wire payload. An empty role selection defaults to buyer.
    #[must_use]
    pub fn to_request(&self) -> RegisterRequest {
        let role = if self.roles.is_empty() { vec![Role::Buyer] } else { self.roles.clone() };
        RegisterRequest {
            full_name: self.full_name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            contact: self.contact.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            role,
            terms: self.terms,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns one [`FieldIssue`] per empty field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if self.identifier.trim().is_empty() {
            issues.push(FieldIssue::new("identifier", "Username or email is required"));
        }
        if self.password.is_empty() {
            issues.push(FieldIssue::new("password", "Password is required"));
        }
        finish(issues)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    /// # Errors
    ///
    /// Returns one [`FieldIssue`] per rejected field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if let Err(issue) = validate_email(&self.email) {
            issues.push(issue);
        }
        if let Err(issue) = validate_password(&self.password) {
            issues.push(issue);
        }
        if let Err(issue) = validate_confirm_password(&self.password, &self.confirm_password) {
            issues.push(issue);
        }
        finish(issues)
    }

    #[must_use]
    pub fn to_request(&self) -> ResetPasswordRequest {
        ResetPasswordRequest { email: self.email.clone(), new_password: self.password.clone() }
    }
}

/// Bid entry: amount in display units (rupees), integer quantity.
#[derive(Debug, Clone, Copy)]
pub struct BidForm {
    pub amount: f64,
    pub quantity: u32,
}

impl BidForm {
    /// # Errors
    ///
    /// Returns one [`FieldIssue`] per rejected field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if !self.amount.is_finite() || self.amount <= 0.0 {
            issues.push(FieldIssue::new("bidAmount", "Bid amount must be a positive number"));
        }
        if self.quantity < 1 {
            issues.push(FieldIssue::new("quantity", "Quantity must be at least 1"));
        }
        finish(issues)
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;

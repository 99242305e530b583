//! Bid placement: local checks before anything leaves the dialog.
//!
//! Amounts are entered in rupees but products carry their current bid in
//! paise, so comparisons convert once and round once. A bid that fails
//! the minimum-increment rule never produces a ticket.

use uuid::Uuid;

use crate::error::ClientError;
use crate::validate::{BidForm, FieldIssue, ValidationError};

/// Paise per rupee.
const MINOR_PER_UNIT: f64 = 100.0;

/// Product fields the bid dialog needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: String,
    pub title: String,
    /// Highest standing bid, in paise.
    pub current_bid_minor: i64,
}

/// Live totals for the dialog while the user types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BidQuote {
    pub amount: f64,
    pub quantity: u32,
    pub total: f64,
}

/// Compute the running total for display.
#[must_use]
pub fn quote(form: &BidForm) -> BidQuote {
    let amount = if form.amount.is_finite() { form.amount } else { 0.0 };
    BidQuote { amount, quantity: form.quantity, total: amount * f64::from(form.quantity) }
}

/// A fully validated bid, ready to hand to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidTicket {
    /// Client-generated reference for correlating the placement.
    pub client_ref: Uuid,
    pub product_id: String,
    pub amount_minor: i64,
    pub quantity: u32,
    pub total_minor: i64,
}

/// Validate a bid against the product's standing bid.
///
/// # Errors
///
/// Field rules first, then the minimum-increment rule: the offer must be
/// strictly greater than the current bid.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn place_bid(form: &BidForm, product: &ProductSnapshot) -> Result<BidTicket, ClientError> {
    form.validate()?;

    let current = product.current_bid_minor as f64 / MINOR_PER_UNIT;
    if form.amount <= current {
        let issue = FieldIssue {
            field: "bidAmount",
            message: format!("Bid must be greater than the current bid (Rs. {current:.2})"),
        };
        return Err(ClientError::Validation(ValidationError { issues: vec![issue] }));
    }

    let amount_minor = (form.amount * MINOR_PER_UNIT).round() as i64;
    Ok(BidTicket {
        client_ref: Uuid::new_v4(),
        product_id: product.id.clone(),
        amount_minor,
        quantity: form.quantity,
        total_minor: amount_minor * i64::from(form.quantity),
    })
}

// =============================================================================
// DISPLAY FORMATTING
// =============================================================================

/// Format paise as rupees with Indian digit grouping:
/// `123456789` paise -> `Rs. 12,34,567.89`.
#[must_use]
pub fn format_rupees(minor: i64) -> String {
    let negative = minor < 0;
    let minor = minor.unsigned_abs();
    let units = minor / 100;
    let paise = minor % 100;

    let digits = units.to_string();
    let mut grouped = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        grouped.push(c);
        let remaining = len - i - 1;
        // Indian grouping: last group of three, then groups of two.
        if remaining > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            grouped.push(',');
        }
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}Rs. {grouped}.{paise:02}")
}

#[cfg(test)]
#[path = "bid_test.rs"]
mod tests;

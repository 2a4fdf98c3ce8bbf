//! Pure discount arithmetic and percent validation.

use rust_decimal::Decimal;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::ValidationError;

/// Compute the discount amount for a cart total.
///
/// `percent` must already be validated to [0, 100]; `total` is assumed
/// non-negative. No rounding happens here; display rounding is the
/// formatting edge's concern.
pub fn compute_discount_amount(total: Decimal, percent: Decimal) -> Decimal {
    total * percent / Decimal::ONE_HUNDRED
}

/// Validate a raw configured percentage.
///
/// Accepts non-negative numeric input with either a dot or a comma as the
/// decimal separator. Values above 100 and non-numeric input are rejected
/// with distinct errors.
pub fn validate_percent(raw: &str) -> Result<Decimal, ValidationError> {
    let normalized = raw.trim().replace(',', ".");
    let percent: Decimal = normalized.parse()?;
    if percent.is_sign_negative() {
        return Err(ValidationError::NegativePercent);
    }
    if percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::PercentTooHigh);
    }
    Ok(percent)
}

/// Render a monetary amount for display, e.g. `"10.00 EUR"`.
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    format!(
        "{:.prec$} {}",
        amount.round_dp(DISPLAY_DECIMAL_PRECISION),
        currency,
        prec = DISPLAY_DECIMAL_PRECISION as usize
    )
}

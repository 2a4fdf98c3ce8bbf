//! Discount configuration models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The process-wide discount configuration.
///
/// Created with defaults at installation (first read of an empty store) and
/// mutated only through the administrative settings update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSettings {
    /// Percentage reduction granted for bank-wire payments, in [0, 100].
    pub percent: Decimal,
    /// Master switch for the feature.
    pub enabled: bool,
}

/// Input model for the administrative settings update.
///
/// `percent` arrives as the raw form value; it is validated and normalized
/// (comma decimal separator accepted) before anything is written.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSettingsUpdate {
    pub percent: Option<String>,
    pub enabled: Option<bool>,
}

//! Small conversion helpers shared by the storage models.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a TEXT-stored decimal column, falling back to zero on corrupt data.
///
/// Values are written by this crate from `Decimal::to_string`, so a parse
/// failure means the row was tampered with; log it rather than poisoning the
/// whole read.
pub fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(value) => value,
        Err(e) => {
            log::error!(
                "Failed to parse {} '{}' as Decimal: {}. Falling back to ZERO.",
                field_name,
                value_str,
                e
            );
            Decimal::ZERO
        }
    }
}

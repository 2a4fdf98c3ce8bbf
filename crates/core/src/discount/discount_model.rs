//! Outcome models for the discount application flow.

use rust_decimal::Decimal;

/// Result of a discount application attempt.
///
/// `NotApplied` is a regular outcome, not an error: the caller surfaces it
/// as a non-success response and never retries automatically.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// A new rule was created and attached to the cart.
    Applied { amount: Decimal },
    /// A rule with the discount prefix was already attached; `amount` is the
    /// reduction value stored at attach time, not a recomputation.
    AlreadyApplied { amount: Decimal },
    /// Nothing was persisted.
    NotApplied { reason: SkipReason },
}

/// Why a discount application left the cart untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The feature is switched off in the settings.
    DiscountDisabled,
    /// The configured percentage is zero or below; there is nothing to apply.
    NothingToApply,
    /// The rule store rejected the create, or the attach failed.
    CreateFailed,
}

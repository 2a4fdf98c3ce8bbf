/// Prefix for cart-rule codes created by this feature. Code = prefix + cart id.
pub const CART_RULE_PREFIX: &str = "BANKWIRE_DISCOUNT_";

/// Settings key for the configured discount percentage
pub const SETTING_KEY_PERCENT: &str = "discount_percent";

/// Settings key for the discount on/off switch
pub const SETTING_KEY_ENABLED: &str = "discount_enabled";

/// Default discount percentage when no value has been stored yet
pub const DEFAULT_DISCOUNT_PERCENT: &str = "5.0";

/// Default enabled state when no value has been stored yet
pub const DEFAULT_DISCOUNT_ENABLED: bool = true;

/// Validity window of a created cart rule, in hours
pub const RULE_VALIDITY_HOURS: i64 = 24;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

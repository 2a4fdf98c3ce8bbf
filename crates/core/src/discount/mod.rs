pub mod discount_model;
pub mod discount_policy;
pub mod discount_service;
pub use discount_model::*;
pub use discount_policy::{compute_discount_amount, format_amount, validate_percent};
pub use discount_service::{DiscountService, DiscountServiceTrait};

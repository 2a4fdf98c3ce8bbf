//! Bank-transfer payment discount - domain entities, services, and traits.
//!
//! This crate contains the business logic for the bank-wire discount feature.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod cart_rules;
pub mod carts;
pub mod constants;
pub mod discount;
pub mod errors;
pub mod settings;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! SQLite storage implementation for the bank-wire discount service.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `bankwire-discount-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for settings, carts, and cart rules
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!    storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod cart_rules;
pub mod carts;
pub mod settings;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from core for convenience
pub use bankwire_discount_core::errors::{DatabaseError, Error, Result};

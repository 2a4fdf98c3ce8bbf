pub mod carts_model;
pub mod carts_traits;
pub use carts_model::*;
pub use carts_traits::CartRepositoryTrait;

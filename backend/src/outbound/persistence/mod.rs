//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and domain types;
//! row structs and table definitions stay internal to this module. All
//! database errors are mapped to the port error types so the domain never
//! handles Diesel values.

pub(crate) mod diesel_helpers;
mod diesel_category_repository;
mod diesel_dish_repository;
mod diesel_order_repository;
mod diesel_restaurant_repository;
mod diesel_user_repository;
mod diesel_verification_repository;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_dish_repository::DieselDishRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_restaurant_repository::DieselRestaurantRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_verification_repository::DieselVerificationRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

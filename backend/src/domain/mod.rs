//! Domain primitives, aggregates, and the services that drive them.
//!
//! The domain is transport and storage agnostic: entities live in their own
//! modules, driven and driving ports under [`ports`], and each service wires
//! repositories behind generics so tests can substitute mocks.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — operation error payload and its stable code.
//! - `UserService`, `RestaurantService`, `OrderService` — driving port
//!   implementations consumed by the inbound adapters.

pub mod access;
pub mod error;
pub mod events;
pub mod order;
mod order_service;
pub mod ports;
pub mod restaurant;
mod restaurant_service;
pub mod slug;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::order_service::OrderService;
pub use self::restaurant_service::RestaurantService;
pub use self::user_service::UserService;

/// Convenient operation result alias.
pub type ApiResult<T> = Result<T, Error>;

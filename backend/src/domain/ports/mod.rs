//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain talks to adapters (database,
//! broadcast channel, token signer, mailer); driving ports are the use-case
//! surface inbound adapters depend on. Each trait exposes strongly typed
//! errors so adapters map failures into predictable variants.

mod category_repository;
mod dish_repository;
mod mailer;
mod order_events;
mod order_repository;
mod orders;
mod password_hasher;
mod restaurant_repository;
mod restaurants;
mod token_service;
mod user_accounts;
mod user_repository;
mod verification_repository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use dish_repository::MockDishRepository;
pub use dish_repository::{DishRepository, DishRepositoryError};
#[cfg(test)]
pub use mailer::MockVerificationMailer;
pub use mailer::{MailerError, VerificationMailer};
#[cfg(test)]
pub use order_events::MockOrderEventChannel;
pub use order_events::OrderEventChannel;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use orders::MockOrders;
pub use orders::{CreateOrderRequest, EditOrderRequest, OrderItemRequest, Orders};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{CredentialError, PasswordHasher};
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
pub use restaurant_repository::{RestaurantRepository, RestaurantRepositoryError};
#[cfg(test)]
pub use restaurants::MockRestaurants;
pub use restaurants::{
    CategoryPage, CategoryWithCount, CreateDishRequest, CreateRestaurantRequest, EditDishRequest,
    EditRestaurantRequest, Restaurants,
};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::{CreateAccountRequest, EditProfileRequest, UserAccounts};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use verification_repository::MockVerificationRepository;
pub use verification_repository::{VerificationRepository, VerificationRepositoryError};

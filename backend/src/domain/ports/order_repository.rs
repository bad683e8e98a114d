//! Persistence port for orders and their items.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::order::{NewOrder, Order, OrderStatus};

/// Errors raised by order repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderRepositoryError {
    /// Repository connection could not be established.
    #[error("order repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("order repository query failed: {message}")]
    Query { message: String },
}

impl OrderRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for order storage and role-scoped listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order together with its items in one transaction.
    async fn create(&self, order: NewOrder) -> Result<Order, OrderRepositoryError>;

    /// Fetch an order by primary key.
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, OrderRepositoryError>;

    /// Orders placed by a customer, optionally filtered by status.
    async fn find_by_customer(
        &self,
        customer_id: i32,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Orders assigned to a rider, optionally filtered by status.
    async fn find_by_driver(
        &self,
        driver_id: i32,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Orders against any restaurant the owner holds, optionally filtered.
    async fn find_by_restaurant_owner(
        &self,
        owner_id: i32,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Persist a status change; assigns `driver_id` when provided.
    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
        driver_id: Option<i32>,
    ) -> Result<(), OrderRepositoryError>;
}

//! Driving port for order lifecycle management.

use async_trait::async_trait;

use crate::domain::order::{Order, OrderStatus};
use crate::domain::user::User;
use crate::domain::Error;

/// One dish in an order request with its chosen customisations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRequest {
    pub dish_id: i32,
    pub options: Vec<crate::domain::order::OrderItemOption>,
}

/// Fields required to place an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub restaurant_id: i32,
    pub items: Vec<OrderItemRequest>,
}

/// A requested status change for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOrderRequest {
    pub order_id: i32,
    pub status: OrderStatus,
}

/// Use-case surface for the order domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Orders: Send + Sync {
    /// Place an order and announce it to the restaurant owner.
    async fn create_order(
        &self,
        customer: &User,
        request: CreateOrderRequest,
    ) -> Result<Order, Error>;

    /// Orders visible to `user`: own orders for clients, orders against
    /// owned restaurants for owners, assigned orders for riders.
    async fn get_orders(
        &self,
        user: &User,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, Error>;

    /// A single order, if `user` participates in it.
    async fn get_order(&self, user: &User, order_id: i32) -> Result<Order, Error>;

    /// Apply a role-gated status transition.
    async fn edit_order(&self, user: &User, request: EditOrderRequest) -> Result<(), Error>;
}

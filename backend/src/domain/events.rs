//! Domain events published on the order channel.
//!
//! Events stay transport agnostic; the WebSocket adapter maps them to JSON
//! frames and applies the per-subscriber ownership filter at delivery time.

use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

/// Snapshot of an order embedded in an event payload.
///
/// A plain-data copy rather than the aggregate itself, so subscribers never
/// observe later mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub id: i32,
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub status: OrderStatus,
    pub total_price: Option<i32>,
}

impl From<&super::order::Order> for OrderSnapshot {
    fn from(order: &super::order::Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            restaurant_id: order.restaurant_id,
            status: order.status,
            total_price: order.total_price,
        }
    }
}

/// Announcement of a newly created order awaiting restaurant acceptance.
///
/// `owner_id` is the restaurant owner the event is addressed to; delivery is
/// filtered on it per subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrderEvent {
    pub owner_id: i32,
    pub order: OrderSnapshot,
}

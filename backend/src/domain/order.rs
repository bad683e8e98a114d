//! Order aggregate, lifecycle states, and the role/status transition table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::user::Role;

/// Lifecycle state of an order.
///
/// Legal chain: `Pending → Cooking → Cooked → PickedUp → Delivered`.
/// Which role may trigger each edge is encoded in [`may_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Cooking,
    Cooked,
    PickedUp,
    Delivered,
}

impl OrderStatus {
    /// Stable lowercase identifier used in storage and payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Cooking => "cooking",
            Self::Cooked => "cooked",
            Self::PickedUp => "picked_up",
            Self::Delivered => "delivered",
        }
    }

    /// The next state in the legal chain, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Cooking),
            Self::Cooking => Some(Self::Cooked),
            Self::Cooked => Some(Self::PickedUp),
            Self::PickedUp => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "cooking" => Ok(Self::Cooking),
            "cooked" => Ok(Self::Cooked),
            "picked_up" => Ok(Self::PickedUp),
            "delivered" => Ok(Self::Delivered),
            other => Err(ParseOrderStatusError(other.to_owned())),
        }
    }
}

/// Decide whether `role` may move an order from `from` to `to`.
///
/// Owners advance orders through the kitchen (`Pending→Cooking→Cooked`);
/// riders take over from there (`Cooked→PickedUp→Delivered`). Clients never
/// edit status. Skipping states is never legal.
#[must_use]
pub fn may_transition(role: Role, from: OrderStatus, to: OrderStatus) -> bool {
    if from.next() != Some(to) {
        return false;
    }
    match role {
        Role::Owner => matches!(to, OrderStatus::Cooking | OrderStatus::Cooked),
        Role::Delivery => matches!(to, OrderStatus::PickedUp | OrderStatus::Delivered),
        Role::Client => false,
    }
}

/// One chosen customisation on an ordered dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemOption {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<String>,
}

/// A dish within an order, with the customisations chosen at order time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub dish_id: i32,
    pub options: Vec<OrderItemOption>,
}

/// An order placed by a customer against a restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    /// Rider assigned when the order is picked up.
    pub driver_id: Option<i32>,
    pub restaurant_id: i32,
    pub status: OrderStatus,
    /// Whole currency units; computed at creation from dish and option prices.
    pub total_price: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for an order row that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub status: OrderStatus,
    pub total_price: Option<i32>,
    /// `(dish_id, chosen options)` pairs persisted alongside the order.
    pub items: Vec<(i32, Vec<OrderItemOption>)>,
}

impl Order {
    /// Whether `user_id` participates in this order as customer or driver.
    #[must_use]
    pub fn involves_user(&self, user_id: i32) -> bool {
        self.customer_id == user_id || self.driver_id == Some(user_id)
    }
}

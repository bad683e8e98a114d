//! Order service implementing the [`Orders`] driving port.
//!
//! Order creation prices each dish from the stored menu rather than trusting
//! the client, then announces the new order on the event channel addressed to
//! the restaurant owner. Status edits follow the role/status transition table
//! in [`crate::domain::order::may_transition`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::events::{OrderSnapshot, PendingOrderEvent};
use crate::domain::order::{NewOrder, Order, OrderStatus, may_transition};
use crate::domain::ports::{
    CreateOrderRequest, DishRepository, EditOrderRequest, OrderEventChannel, OrderRepository,
    Orders, RestaurantRepository,
};
use crate::domain::user::{Role, User};

fn fault(message: &str, error: &dyn std::fmt::Display) -> Error {
    tracing::error!(error = %error, "order operation failed");
    Error::internal(message)
}

/// Order service over order, restaurant, and dish storage plus the
/// announcement channel.
pub struct OrderService<O, R, D, E> {
    orders: Arc<O>,
    restaurants: Arc<R>,
    dishes: Arc<D>,
    events: Arc<E>,
}

impl<O, R, D, E> OrderService<O, R, D, E> {
    /// Create the service from its collaborators.
    pub fn new(orders: Arc<O>, restaurants: Arc<R>, dishes: Arc<D>, events: Arc<E>) -> Self {
        Self {
            orders,
            restaurants,
            dishes,
            events,
        }
    }
}

impl<O, R, D, E> OrderService<O, R, D, E>
where
    O: OrderRepository,
    R: RestaurantRepository,
    D: DishRepository,
    E: OrderEventChannel,
{
    /// Whether `user` participates in `order` as customer, assigned rider, or
    /// owner of the restaurant it was placed against.
    async fn sees_order(&self, user: &User, order: &Order, failure: &str) -> Result<bool, Error> {
        match user.role {
            Role::Client => Ok(order.customer_id == user.id),
            Role::Delivery => Ok(order.driver_id == Some(user.id)),
            Role::Owner => {
                let restaurant = self
                    .restaurants
                    .find_by_id(order.restaurant_id)
                    .await
                    .map_err(|error| fault(failure, &error))?;
                Ok(restaurant.is_some_and(|r| r.owner_id == user.id))
            }
        }
    }
}

#[async_trait]
impl<O, R, D, E> Orders for OrderService<O, R, D, E>
where
    O: OrderRepository,
    R: RestaurantRepository,
    D: DishRepository,
    E: OrderEventChannel,
{
    async fn create_order(
        &self,
        customer: &User,
        request: CreateOrderRequest,
    ) -> Result<Order, Error> {
        let restaurant = self
            .restaurants
            .find_by_id(request.restaurant_id)
            .await
            .map_err(|error| fault("Could not create order.", &error))?
            .ok_or_else(|| Error::not_found("Restaurant not found"))?;

        let mut total = 0i32;
        let mut items = Vec::with_capacity(request.items.len());
        for item in request.items {
            let dish = self
                .dishes
                .find_by_id(item.dish_id)
                .await
                .map_err(|error| fault("Could not create order.", &error))?
                .ok_or_else(|| Error::not_found("Dish not found."))?;
            // A dish from another menu cannot be smuggled into the order.
            if dish.restaurant_id != restaurant.id {
                return Err(Error::not_found("Dish not found."));
            }

            let mut dish_total = dish.price;
            for chosen in &item.options {
                let Some(option) = dish.option(&chosen.name) else {
                    continue;
                };
                if let Some(extra) = option.extra {
                    dish_total += extra;
                } else if let Some(extra) = chosen
                    .choice
                    .as_deref()
                    .and_then(|name| option.choice(name))
                    .and_then(|choice| choice.extra)
                {
                    dish_total += extra;
                }
            }
            total += dish_total;
            items.push((item.dish_id, item.options));
        }

        let order = self
            .orders
            .create(NewOrder {
                customer_id: customer.id,
                restaurant_id: restaurant.id,
                status: OrderStatus::Pending,
                total_price: Some(total),
                items,
            })
            .await
            .map_err(|error| fault("Could not create order.", &error))?;

        self.events.publish_pending(PendingOrderEvent {
            owner_id: restaurant.owner_id,
            order: OrderSnapshot::from(&order),
        });
        Ok(order)
    }

    async fn get_orders(
        &self,
        user: &User,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, Error> {
        let found = match user.role {
            Role::Client => self.orders.find_by_customer(user.id, status).await,
            Role::Delivery => self.orders.find_by_driver(user.id, status).await,
            Role::Owner => self.orders.find_by_restaurant_owner(user.id, status).await,
        };
        found.map_err(|error| fault("Could not load orders.", &error))
    }

    async fn get_order(&self, user: &User, order_id: i32) -> Result<Order, Error> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await
            .map_err(|error| fault("Could not load order.", &error))?
            .ok_or_else(|| Error::not_found("Order not found."))?;

        if !self.sees_order(user, &order, "Could not load order.").await? {
            return Err(Error::forbidden("You can't see that"));
        }
        Ok(order)
    }

    async fn edit_order(&self, user: &User, request: EditOrderRequest) -> Result<(), Error> {
        let order = self
            .orders
            .find_by_id(request.order_id)
            .await
            .map_err(|error| fault("Could not edit order.", &error))?
            .ok_or_else(|| Error::not_found("Order not found."))?;

        // A rider with no order yet sees unclaimed orders for pickup.
        let claiming = user.role == Role::Delivery && order.driver_id.is_none();
        let visible = claiming
            || self
                .sees_order(user, &order, "Could not edit order.")
                .await?;
        if !visible {
            return Err(Error::forbidden("You can't see that"));
        }

        if !may_transition(user.role, order.status, request.status) {
            return Err(Error::forbidden("You can't do that."));
        }

        let driver_id = (user.role == Role::Delivery && request.status == OrderStatus::PickedUp)
            .then_some(user.id);
        self.orders
            .update_status(order.id, request.status, driver_id)
            .await
            .map_err(|error| fault("Could not edit order.", &error))
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;

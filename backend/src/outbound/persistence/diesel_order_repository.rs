//! PostgreSQL-backed `OrderRepository` implementation using Diesel.
//!
//! Order creation inserts the order row and its items inside one transaction
//! so a failed item insert never leaves a half-written order behind.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::ports::{OrderRepository, OrderRepositoryError};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{NewOrderItemRow, NewOrderRow, OrderRow, OrderStatusUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{order_items, orders, restaurants};

/// Diesel-backed implementation of the `OrderRepository` port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrderRepositoryError {
    OrderRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error, operation: &str) -> OrderRepositoryError {
    OrderRepositoryError::query(diesel_error_message(error, operation))
}

fn row_to_order(row: OrderRow) -> Result<Order, OrderRepositoryError> {
    let status = row
        .status
        .parse()
        .map_err(|err: crate::domain::order::ParseOrderStatusError| {
            OrderRepositoryError::query(err.to_string())
        })?;
    Ok(Order {
        id: row.id,
        customer_id: row.customer_id,
        driver_id: row.driver_id,
        restaurant_id: row.restaurant_id,
        status,
        total_price: row.total_price,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, OrderRepositoryError> {
    rows.into_iter().map(row_to_order).collect()
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let items = order
            .items
            .iter()
            .map(|(dish_id, options)| {
                serde_json::to_value(options)
                    .map(|options| (*dish_id, options))
                    .map_err(|err| {
                        OrderRepositoryError::query(format!(
                            "order item options not serializable: {err}"
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let row: OrderRow = conn
            .transaction(|conn| {
                async move {
                    let row: OrderRow = diesel::insert_into(orders::table)
                        .values(NewOrderRow {
                            customer_id: order.customer_id,
                            restaurant_id: order.restaurant_id,
                            status: order.status.as_str(),
                            total_price: order.total_price,
                        })
                        .returning(OrderRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let item_rows: Vec<NewOrderItemRow> = items
                        .into_iter()
                        .map(|(dish_id, options)| NewOrderItemRow {
                            order_id: row.id,
                            dish_id,
                            options,
                        })
                        .collect();
                    diesel::insert_into(order_items::table)
                        .values(&item_rows)
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(&err, "create order"))?;
        row_to_order(row)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OrderRow> = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find order by id"))?;
        row.map(row_to_order).transpose()
    }

    async fn find_by_customer(
        &self,
        customer_id: i32,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(orders::status.eq(status.as_str()));
        }
        let rows: Vec<OrderRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "find orders by customer"))?;
        rows_to_orders(rows)
    }

    async fn find_by_driver(
        &self,
        driver_id: i32,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = orders::table
            .filter(orders::driver_id.eq(driver_id))
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(orders::status.eq(status.as_str()));
        }
        let rows: Vec<OrderRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "find orders by driver"))?;
        rows_to_orders(rows)
    }

    async fn find_by_restaurant_owner(
        &self,
        owner_id: i32,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = orders::table
            .inner_join(restaurants::table)
            .filter(restaurants::owner_id.eq(owner_id))
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(orders::status.eq(status.as_str()));
        }
        let rows: Vec<OrderRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "find orders by restaurant owner"))?;
        rows_to_orders(rows)
    }

    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
        driver_id: Option<i32>,
    ) -> Result<(), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(orders::table.find(order_id))
            .set(OrderStatusUpdate {
                status: status.as_str(),
                driver_id,
                updated_at: Utc::now(),
            })
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "update order status"))?;
        Ok(())
    }
}

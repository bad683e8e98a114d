//! Order HTTP handlers.
//!
//! ```text
//! POST  /api/orders
//! GET   /api/orders
//! GET   /api/orders/{id}
//! PATCH /api/orders/{id}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ApiResult;
use crate::domain::order::{Order, OrderItemOption, OrderStatus};
use crate::domain::ports::{CreateOrderRequest, EditOrderRequest, OrderItemRequest};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::envelope;
use crate::inbound::http::state::HttpState;

/// One dish line in an order request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemBody {
    pub dish_id: i32,
    #[serde(default)]
    pub options: Vec<OrderItemOption>,
}

/// Request payload for placing an order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub restaurant_id: i32,
    pub items: Vec<OrderItemBody>,
}

/// Request payload for moving an order through its lifecycle.
#[derive(Debug, Deserialize)]
pub struct EditOrderBody {
    pub status: OrderStatus,
}

/// Optional status filter for order listings.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<OrderStatus>,
}

/// Order shape exposed to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: i32,
    pub driver_id: Option<i32>,
    pub restaurant_id: i32,
    pub status: OrderStatus,
    pub total_price: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            driver_id: order.driver_id,
            restaurant_id: order.restaurant_id,
            status: order.status,
            total_price: order.total_price,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderIdPayload {
    order_id: i32,
}

#[derive(Debug, Serialize)]
struct OrdersPayload {
    orders: Vec<OrderResponse>,
}

#[derive(Debug, Serialize)]
struct OrderPayload {
    order: OrderResponse,
}

/// Place an order, priced from the stored menu.
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    auth: AuthContext,
    body: web::Json<CreateOrderBody>,
) -> ApiResult<HttpResponse> {
    let customer = auth.require("create_order")?;
    let body = body.into_inner();
    let result = state
        .orders
        .create_order(
            customer,
            CreateOrderRequest {
                restaurant_id: body.restaurant_id,
                items: body
                    .items
                    .into_iter()
                    .map(|item| OrderItemRequest {
                        dish_id: item.dish_id,
                        options: item.options,
                    })
                    .collect(),
            },
        )
        .await
        .map(|order| OrderIdPayload { order_id: order.id });
    Ok(envelope::respond(result))
}

/// The caller's orders, scoped by role and optionally filtered by status.
#[get("/orders")]
pub async fn get_orders(
    state: web::Data<HttpState>,
    auth: AuthContext,
    query: web::Query<OrdersQuery>,
) -> ApiResult<HttpResponse> {
    let user = auth.require("get_orders")?;
    let result = state
        .orders
        .get_orders(user, query.status)
        .await
        .map(|orders| OrdersPayload {
            orders: orders.into_iter().map(Into::into).collect(),
        });
    Ok(envelope::respond(result))
}

/// A single order, visible only to its participants.
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let user = auth.require("get_order")?;
    let result = state
        .orders
        .get_order(user, path.into_inner())
        .await
        .map(|order| OrderPayload {
            order: order.into(),
        });
    Ok(envelope::respond(result))
}

/// Advance an order through its lifecycle.
#[patch("/orders/{id}")]
pub async fn edit_order(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i32>,
    body: web::Json<EditOrderBody>,
) -> ApiResult<HttpResponse> {
    let user = auth.require("edit_order")?;
    Ok(envelope::respond_empty(
        state
            .orders
            .edit_order(
                user,
                EditOrderRequest {
                    order_id: path.into_inner(),
                    status: body.status,
                },
            )
            .await,
    ))
}

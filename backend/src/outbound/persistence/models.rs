//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversions to domain types live in the repository files.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{categories, dishes, order_items, orders, restaurants, users, verifications};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub verified: bool,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the verifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = verifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VerificationRow {
    pub id: i32,
    pub code: String,
    pub user_id: i32,
}

/// Insertable struct for creating verification codes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = verifications)]
pub(crate) struct NewVerificationRow<'a> {
    pub code: &'a str,
    pub user_id: i32,
}

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub cover_image: Option<String>,
    pub slug: String,
}

/// Insertable struct for the category upsert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

/// Row struct for reading from the restaurants table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RestaurantRow {
    pub id: i32,
    pub name: String,
    pub cover_image: String,
    pub address: String,
    pub category_id: Option<i32>,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new restaurant records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = restaurants)]
pub(crate) struct NewRestaurantRow<'a> {
    pub name: &'a str,
    pub cover_image: &'a str,
    pub address: &'a str,
    pub category_id: i32,
    pub owner_id: i32,
}

/// Changeset struct for partial restaurant updates; `None` fields are kept.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = restaurants)]
pub(crate) struct RestaurantUpdate {
    pub name: Option<String>,
    pub cover_image: Option<String>,
    pub address: Option<String>,
    pub category_id: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the dishes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dishes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DishRow {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub photo: Option<String>,
    pub description: String,
    pub restaurant_id: i32,
    pub options: serde_json::Value,
}

/// Insertable struct for creating new dish records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dishes)]
pub(crate) struct NewDishRow<'a> {
    pub name: &'a str,
    pub price: i32,
    pub photo: Option<&'a str>,
    pub description: &'a str,
    pub restaurant_id: i32,
    pub options: serde_json::Value,
}

/// Changeset struct for partial dish updates; `None` fields are kept.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = dishes)]
pub(crate) struct DishUpdate {
    pub name: Option<String>,
    pub price: Option<i32>,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub options: Option<serde_json::Value>,
}

/// Row struct for reading from the orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i32,
    pub customer_id: i32,
    pub driver_id: Option<i32>,
    pub restaurant_id: i32,
    pub status: String,
    pub total_price: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new order records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub status: &'a str,
    pub total_price: Option<i32>,
}

/// Changeset struct for order status transitions.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = orders)]
pub(crate) struct OrderStatusUpdate<'a> {
    pub status: &'a str,
    /// Only set when a rider claims the order.
    pub driver_id: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for order items created alongside an order.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_items)]
pub(crate) struct NewOrderItemRow {
    pub order_id: i32,
    pub dish_id: i32,
    pub options: serde_json::Value,
}

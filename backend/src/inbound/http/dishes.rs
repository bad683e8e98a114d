//! Dish HTTP handlers. All three operations are owner-gated.
//!
//! ```text
//! POST   /api/dishes
//! PATCH  /api/dishes/{id}
//! DELETE /api/dishes/{id}
//! ```

use actix_web::{HttpResponse, delete, patch, post, web};
use serde::Deserialize;

use crate::domain::ApiResult;
use crate::domain::ports::{CreateDishRequest, EditDishRequest};
use crate::domain::restaurant::DishOption;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::envelope;
use crate::inbound::http::state::HttpState;

/// Request payload for adding a dish to a menu.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDishBody {
    pub restaurant_id: i32,
    pub name: String,
    pub price: i32,
    pub description: String,
    pub photo: Option<String>,
    #[serde(default)]
    pub options: Vec<DishOption>,
}

/// Request payload for editing a dish.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDishBody {
    pub name: Option<String>,
    pub price: Option<i32>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub options: Option<Vec<DishOption>>,
}

/// Add a dish to one of the caller's restaurants.
#[post("/dishes")]
pub async fn create_dish(
    state: web::Data<HttpState>,
    auth: AuthContext,
    body: web::Json<CreateDishBody>,
) -> ApiResult<HttpResponse> {
    let owner = auth.require("create_dish")?;
    let body = body.into_inner();
    Ok(envelope::respond_empty(
        state
            .restaurants
            .create_dish(
                owner,
                CreateDishRequest {
                    restaurant_id: body.restaurant_id,
                    name: body.name,
                    price: body.price,
                    description: body.description,
                    photo: body.photo,
                    options: body.options,
                },
            )
            .await,
    ))
}

/// Edit a dish on one of the caller's menus.
#[patch("/dishes/{id}")]
pub async fn edit_dish(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i32>,
    body: web::Json<EditDishBody>,
) -> ApiResult<HttpResponse> {
    let owner = auth.require("edit_dish")?;
    let body = body.into_inner();
    Ok(envelope::respond_empty(
        state
            .restaurants
            .edit_dish(
                owner,
                EditDishRequest {
                    dish_id: path.into_inner(),
                    name: body.name,
                    price: body.price,
                    description: body.description,
                    photo: body.photo,
                    options: body.options,
                },
            )
            .await,
    ))
}

/// Remove a dish from one of the caller's menus.
#[delete("/dishes/{id}")]
pub async fn delete_dish(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let owner = auth.require("delete_dish")?;
    Ok(envelope::respond_empty(
        state.restaurants.delete_dish(owner, path.into_inner()).await,
    ))
}

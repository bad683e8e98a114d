//! Restaurant HTTP handlers.
//!
//! ```text
//! POST   /api/restaurants
//! GET    /api/restaurants
//! GET    /api/restaurants/search
//! GET    /api/restaurants/{id}
//! PATCH  /api/restaurants/{id}
//! DELETE /api/restaurants/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ApiResult;
use crate::domain::ports::{CreateRestaurantRequest, EditRestaurantRequest};
use crate::domain::restaurant::Restaurant;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::envelope;
use crate::inbound::http::page_param;
use crate::inbound::http::state::HttpState;

/// Request payload for opening a restaurant.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantBody {
    pub name: String,
    pub cover_image: String,
    pub address: String,
    pub category_name: String,
}

/// Request payload for editing a restaurant.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRestaurantBody {
    pub name: Option<String>,
    pub cover_image: Option<String>,
    pub address: Option<String>,
    pub category_name: Option<String>,
}

/// Page selector for listings.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Name search with a page selector.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub page: Option<u32>,
}

/// Restaurant shape exposed to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    pub id: i32,
    pub name: String,
    pub cover_image: String,
    pub address: String,
    pub category_id: Option<i32>,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            cover_image: restaurant.cover_image,
            address: restaurant.address,
            category_id: restaurant.category_id,
            owner_id: restaurant.owner_id,
            created_at: restaurant.created_at,
            updated_at: restaurant.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct RestaurantPayload {
    restaurant: RestaurantResponse,
}

/// Open a restaurant owned by the caller.
#[post("/restaurants")]
pub async fn create_restaurant(
    state: web::Data<HttpState>,
    auth: AuthContext,
    body: web::Json<CreateRestaurantBody>,
) -> ApiResult<HttpResponse> {
    let owner = auth.require("create_restaurant")?;
    let body = body.into_inner();
    Ok(envelope::respond_empty(
        state
            .restaurants
            .create_restaurant(
                owner,
                CreateRestaurantRequest {
                    name: body.name,
                    cover_image: body.cover_image,
                    address: body.address,
                    category_name: body.category_name,
                },
            )
            .await,
    ))
}

/// One page of all restaurants.
#[get("/restaurants")]
pub async fn all_restaurants(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let page = match page_param(query.page) {
        Ok(page) => page,
        Err(error) => return envelope::fail(&error),
    };
    let result = state
        .restaurants
        .all_restaurants(page)
        .await
        .map(|paginated| paginated.map(RestaurantResponse::from));
    envelope::respond(result)
}

/// Search restaurants by name, case-insensitively.
#[get("/restaurants/search")]
pub async fn search_restaurants(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let page = match page_param(query.page) {
        Ok(page) => page,
        Err(error) => return envelope::fail(&error),
    };
    let result = state
        .restaurants
        .search_restaurant_by_name(&query.query, page)
        .await
        .map(|paginated| paginated.map(RestaurantResponse::from));
    envelope::respond(result)
}

/// A single restaurant.
#[get("/restaurants/{id}")]
pub async fn find_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> HttpResponse {
    let result = state
        .restaurants
        .find_restaurant_by_id(path.into_inner())
        .await
        .map(|restaurant| RestaurantPayload {
            restaurant: restaurant.into(),
        });
    envelope::respond(result)
}

/// Edit a restaurant owned by the caller.
#[patch("/restaurants/{id}")]
pub async fn edit_restaurant(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i32>,
    body: web::Json<EditRestaurantBody>,
) -> ApiResult<HttpResponse> {
    let owner = auth.require("edit_restaurant")?;
    let body = body.into_inner();
    Ok(envelope::respond_empty(
        state
            .restaurants
            .edit_restaurant(
                owner,
                EditRestaurantRequest {
                    restaurant_id: path.into_inner(),
                    name: body.name,
                    cover_image: body.cover_image,
                    address: body.address,
                    category_name: body.category_name,
                },
            )
            .await,
    ))
}

/// Delete a restaurant owned by the caller.
#[delete("/restaurants/{id}")]
pub async fn delete_restaurant(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let owner = auth.require("delete_restaurant")?;
    Ok(envelope::respond_empty(
        state
            .restaurants
            .delete_restaurant(owner, path.into_inner())
            .await,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use mockall::predicate::eq;
    use pagination::Paginated;
    use serde_json::json;

    use super::*;
    use crate::domain::ports::{MockOrders, MockRestaurants, MockTokenService, MockUserAccounts};
    use crate::domain::user::{Role, User};

    fn sample_restaurant(id: i32) -> Restaurant {
        Restaurant {
            id,
            name: "Seoul Kitchen".to_owned(),
            cover_image: "https://img.example.com/seoul.png".to_owned(),
            address: "1 Gangnam St".to_owned(),
            category_id: Some(3),
            owner_id: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn state_with(
        restaurants: MockRestaurants,
        tokens: MockTokenService,
        accounts: MockUserAccounts,
    ) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            accounts: Arc::new(accounts),
            restaurants: Arc::new(restaurants),
            orders: Arc::new(MockOrders::new()),
            tokens: Arc::new(tokens),
        })
    }

    #[actix_web::test]
    async fn listing_flattens_the_pagination_envelope() {
        let mut restaurants = MockRestaurants::new();
        restaurants
            .expect_all_restaurants()
            .return_once(|_| Ok(Paginated::new(vec![sample_restaurant(1)], 26)));

        let app = test::init_service(
            App::new()
                .app_data(state_with(
                    restaurants,
                    MockTokenService::new(),
                    MockUserAccounts::new(),
                ))
                .service(all_restaurants),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/restaurants?page=2")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["ok"], true);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["results"][0]["name"], "Seoul Kitchen");
    }

    #[actix_web::test]
    async fn page_zero_fails_inside_the_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(
                    MockRestaurants::new(),
                    MockTokenService::new(),
                    MockUserAccounts::new(),
                ))
                .service(all_restaurants),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/restaurants?page=0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["ok"], false);
    }

    #[actix_web::test]
    async fn clients_cannot_open_restaurants() {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().return_once(|_| Ok(4));
        let mut accounts = MockUserAccounts::new();
        accounts.expect_find_by_id().with(eq(4)).return_once(|id| {
            Ok(User {
                id,
                email: "client@example.com".to_owned(),
                password_hash: "$2b$hash".to_owned(),
                role: Role::Client,
                verified: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

        let app = test::init_service(
            App::new()
                .app_data(state_with(MockRestaurants::new(), tokens, accounts))
                .service(create_restaurant),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/restaurants")
            .insert_header((header::AUTHORIZATION, "Bearer signed"))
            .set_json(json!({
                "name": "Seoul Kitchen",
                "coverImage": "https://img.example.com/seoul.png",
                "address": "1 Gangnam St",
                "categoryName": "Korean BBQ"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}

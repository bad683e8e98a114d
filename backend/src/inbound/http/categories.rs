//! Category HTTP handlers.
//!
//! ```text
//! GET /api/categories
//! GET /api/categories/{slug}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};

use crate::domain::restaurant::Category;
use crate::inbound::http::envelope;
use crate::inbound::http::page_param;
use crate::inbound::http::restaurants::RestaurantResponse;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Category shape exposed to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub cover_image: Option<String>,
    pub slug: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            cover_image: category.cover_image,
            slug: category.slug,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryWithCountResponse {
    #[serde(flatten)]
    category: CategoryResponse,
    restaurant_count: u64,
}

#[derive(Debug, Serialize)]
struct CategoriesPayload {
    categories: Vec<CategoryWithCountResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryPagePayload {
    category: CategoryResponse,
    restaurants: Vec<RestaurantResponse>,
    total_results: u64,
    total_pages: u32,
}

/// All categories with their restaurant counts.
#[get("/categories")]
pub async fn all_categories(state: web::Data<HttpState>) -> HttpResponse {
    let result = state.restaurants.all_categories().await.map(|categories| {
        CategoriesPayload {
            categories: categories
                .into_iter()
                .map(|entry| CategoryWithCountResponse {
                    category: entry.category.into(),
                    restaurant_count: entry.restaurant_count,
                })
                .collect(),
        }
    });
    envelope::respond(result)
}

/// A category and one page of its restaurants.
#[get("/categories/{slug}")]
pub async fn find_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let page = match page_param(query.page) {
        Ok(page) => page,
        Err(error) => return envelope::fail(&error),
    };
    let result = state
        .restaurants
        .find_category_by_slug(&path.into_inner(), page)
        .await
        .map(|page| CategoryPagePayload {
            category: page.category.into(),
            restaurants: page.restaurants.into_iter().map(Into::into).collect(),
            total_results: page.total_results,
            total_pages: page.total_pages,
        });
    envelope::respond(result)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};
    use chrono::Utc;

    use super::*;
    use crate::domain::ports::{
        CategoryPage, CategoryWithCount, MockOrders, MockRestaurants, MockTokenService,
        MockUserAccounts,
    };
    use crate::domain::restaurant::Restaurant;
    use crate::inbound::http::state::HttpState;

    fn state(restaurants: MockRestaurants) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            accounts: Arc::new(MockUserAccounts::new()),
            restaurants: Arc::new(restaurants),
            orders: Arc::new(MockOrders::new()),
            tokens: Arc::new(MockTokenService::new()),
        })
    }

    fn korean_bbq() -> Category {
        Category {
            id: 3,
            name: "Korean BBQ".to_owned(),
            cover_image: None,
            slug: "korean-bbq".to_owned(),
        }
    }

    #[actix_web::test]
    async fn listing_inlines_restaurant_counts() {
        let mut restaurants = MockRestaurants::new();
        restaurants.expect_all_categories().return_once(|| {
            Ok(vec![CategoryWithCount {
                category: korean_bbq(),
                restaurant_count: 7,
            }])
        });

        let app = test::init_service(
            App::new().app_data(state(restaurants)).service(all_categories),
        )
        .await;

        let req = test::TestRequest::get().uri("/categories").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["ok"], true);
        assert_eq!(body["categories"][0]["slug"], "korean-bbq");
        assert_eq!(body["categories"][0]["restaurantCount"], 7);
    }

    #[actix_web::test]
    async fn category_page_carries_totals_beside_the_rows() {
        let mut restaurants = MockRestaurants::new();
        restaurants
            .expect_find_category_by_slug()
            .return_once(|_, _| {
                Ok(CategoryPage {
                    category: korean_bbq(),
                    restaurants: vec![Restaurant {
                        id: 1,
                        name: "Seoul Kitchen".to_owned(),
                        cover_image: "https://img.example.com/seoul.png".to_owned(),
                        address: "1 Gangnam St".to_owned(),
                        category_id: Some(3),
                        owner_id: 5,
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    }],
                    total_results: 26,
                    total_pages: 2,
                })
            });

        let app = test::init_service(
            App::new().app_data(state(restaurants)).service(find_category),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/categories/korean-bbq")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["ok"], true);
        assert_eq!(body["category"]["slug"], "korean-bbq");
        assert_eq!(body["restaurants"][0]["name"], "Seoul Kitchen");
        assert_eq!(body["totalResults"], 26);
        assert_eq!(body["totalPages"], 2);
    }
}

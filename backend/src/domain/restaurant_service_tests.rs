//! Tests for the restaurant service.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    MockCategoryRepository, MockDishRepository, MockRestaurantRepository,
    RestaurantRepositoryError,
};
use crate::domain::restaurant::Dish;
use crate::domain::user::Role;

type Service = RestaurantService<MockRestaurantRepository, MockCategoryRepository, MockDishRepository>;

struct Mocks {
    restaurants: MockRestaurantRepository,
    categories: MockCategoryRepository,
    dishes: MockDishRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            restaurants: MockRestaurantRepository::new(),
            categories: MockCategoryRepository::new(),
            dishes: MockDishRepository::new(),
        }
    }

    fn into_service(self) -> Service {
        RestaurantService::new(
            Arc::new(self.restaurants),
            Arc::new(self.categories),
            Arc::new(self.dishes),
        )
    }
}

fn sample_owner(id: i32) -> User {
    let now = Utc::now();
    User {
        id,
        email: format!("owner{id}@example.com"),
        password_hash: "$2b$hash".to_owned(),
        role: Role::Owner,
        verified: true,
        created_at: now,
        updated_at: now,
    }
}

fn sample_restaurant(id: i32, owner_id: i32) -> Restaurant {
    let now = Utc::now();
    Restaurant {
        id,
        name: "Seoul Kitchen".to_owned(),
        cover_image: "https://img.example.com/seoul.png".to_owned(),
        address: "1 Gangnam St".to_owned(),
        category_id: Some(3),
        owner_id,
        created_at: now,
        updated_at: now,
    }
}

fn sample_category(id: i32, slug: &str) -> Category {
    Category {
        id,
        name: slug.replace('-', " "),
        cover_image: None,
        slug: slug.to_owned(),
    }
}

fn sample_dish(id: i32, restaurant_id: i32) -> Dish {
    Dish {
        id,
        name: "Bibimbap".to_owned(),
        price: 12,
        photo: None,
        description: "Rice bowl".to_owned(),
        restaurant_id,
        options: Vec::new(),
    }
}

#[tokio::test]
async fn create_restaurant_slugifies_and_links_the_category() {
    let mut mocks = Mocks::new();
    mocks
        .categories
        .expect_get_or_create()
        .with(eq("Korean BBQ"), eq("korean-bbq"))
        .times(1)
        .return_once(|_, slug| Ok(sample_category(3, slug)));
    mocks
        .restaurants
        .expect_insert()
        .withf(|new| new.category_id == 3 && new.owner_id == 5)
        .times(1)
        .return_once(|_| Ok(sample_restaurant(1, 5)));

    mocks
        .into_service()
        .create_restaurant(
            &sample_owner(5),
            CreateRestaurantRequest {
                name: "Seoul Kitchen".to_owned(),
                cover_image: "https://img.example.com/seoul.png".to_owned(),
                address: "1 Gangnam St".to_owned(),
                category_name: " Korean BBQ ".to_owned(),
            },
        )
        .await
        .expect("restaurant created");
}

#[tokio::test]
async fn edit_restaurant_rejects_a_foreign_owner() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_restaurant(1, 99))));
    mocks.restaurants.expect_update().times(0);

    let error = mocks
        .into_service()
        .edit_restaurant(
            &sample_owner(5),
            EditRestaurantRequest {
                restaurant_id: 1,
                name: Some("Stolen".to_owned()),
                ..EditRestaurantRequest::default()
            },
        )
        .await
        .expect_err("foreign owner");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(
        error.message(),
        "You can't edit a restaurant that you don't own"
    );
}

#[tokio::test]
async fn edit_restaurant_reassigns_the_category_when_named() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_restaurant(1, 5))));
    mocks
        .categories
        .expect_get_or_create()
        .with(eq("Fast Food"), eq("fast-food"))
        .times(1)
        .return_once(|_, slug| Ok(sample_category(8, slug)));
    mocks
        .restaurants
        .expect_update()
        .withf(|id, changes| *id == 1 && changes.category_id == Some(8) && changes.name.is_none())
        .times(1)
        .return_once(|_, _| Ok(()));

    mocks
        .into_service()
        .edit_restaurant(
            &sample_owner(5),
            EditRestaurantRequest {
                restaurant_id: 1,
                category_name: Some("Fast Food".to_owned()),
                ..EditRestaurantRequest::default()
            },
        )
        .await
        .expect("restaurant edited");
}

#[tokio::test]
async fn delete_restaurant_rejects_a_foreign_owner() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_restaurant(1, 99))));
    mocks.restaurants.expect_delete().times(0);

    let error = mocks
        .into_service()
        .delete_restaurant(&sample_owner(5), 1)
        .await
        .expect_err("foreign owner");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(
        error.message(),
        "You can't delete a restaurant that you don't own"
    );
}

#[tokio::test]
async fn delete_restaurant_reports_a_missing_restaurant() {
    let mut mocks = Mocks::new();
    mocks.restaurants.expect_find_by_id().return_once(|_| Ok(None));

    let error = mocks
        .into_service()
        .delete_restaurant(&sample_owner(5), 404)
        .await
        .expect_err("missing restaurant");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Restaurant not found");
}

#[tokio::test]
async fn all_categories_counts_restaurants_per_category() {
    let mut mocks = Mocks::new();
    mocks
        .categories
        .expect_all()
        .return_once(|| Ok(vec![sample_category(3, "korean-bbq"), sample_category(8, "fast-food")]));
    mocks
        .restaurants
        .expect_count_by_category()
        .with(eq(3))
        .return_once(|_| Ok(4));
    mocks
        .restaurants
        .expect_count_by_category()
        .with(eq(8))
        .return_once(|_| Ok(0));

    let counted = mocks
        .into_service()
        .all_categories()
        .await
        .expect("categories loaded");

    assert_eq!(counted.len(), 2);
    assert_eq!(counted[0].restaurant_count, 4);
    assert_eq!(counted[1].restaurant_count, 0);
}

#[tokio::test]
async fn find_category_by_slug_reports_a_missing_category() {
    let mut mocks = Mocks::new();
    mocks
        .categories
        .expect_find_by_slug()
        .return_once(|_| Ok(None));

    let error = mocks
        .into_service()
        .find_category_by_slug("ghost", PageRequest::first())
        .await
        .expect_err("missing category");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Category not found");
}

#[tokio::test]
async fn find_category_by_slug_builds_page_totals() {
    let mut mocks = Mocks::new();
    mocks
        .categories
        .expect_find_by_slug()
        .with(eq("korean-bbq"))
        .return_once(|_| Ok(Some(sample_category(3, "korean-bbq"))));
    mocks
        .restaurants
        .expect_find_by_category()
        .withf(|category_id, page| *category_id == 3 && page.number() == 2)
        .return_once(|_, _| Ok(vec![sample_restaurant(26, 5)]));
    mocks
        .restaurants
        .expect_count_by_category()
        .return_once(|_| Ok(26));

    let page = mocks
        .into_service()
        .find_category_by_slug("korean-bbq", PageRequest::new(2).expect("valid page"))
        .await
        .expect("category loaded");

    assert_eq!(page.total_results, 26);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.restaurants.len(), 1);
}

#[tokio::test]
async fn all_restaurants_wraps_the_pagination_envelope() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_list()
        .return_once(|_| Ok((vec![sample_restaurant(1, 5)], 51)));

    let page = mocks
        .into_service()
        .all_restaurants(PageRequest::first())
        .await
        .expect("restaurants loaded");

    assert_eq!(page.total_results, 51);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn search_passes_the_query_through() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_search_by_name()
        .withf(|query, _| query == "piz")
        .times(1)
        .return_once(|_, _| Ok((Vec::new(), 0)));

    let page = mocks
        .into_service()
        .search_restaurant_by_name("piz", PageRequest::first())
        .await
        .expect("search succeeds");

    assert!(page.results.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn search_masks_storage_faults() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_search_by_name()
        .return_once(|_, _| Err(RestaurantRepositoryError::connection("pool drained")));

    let error = mocks
        .into_service()
        .search_restaurant_by_name("piz", PageRequest::first())
        .await
        .expect_err("storage fault");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Could not search for restaurants");
}

#[tokio::test]
async fn create_dish_denies_a_non_owner() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_restaurant(1, 99))));
    mocks.dishes.expect_insert().times(0);

    let error = mocks
        .into_service()
        .create_dish(
            &sample_owner(5),
            CreateDishRequest {
                restaurant_id: 1,
                name: "Bibimbap".to_owned(),
                price: 12,
                description: "Rice bowl".to_owned(),
                photo: None,
                options: Vec::new(),
            },
        )
        .await
        .expect_err("foreign menu");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), "You can't do that.");
}

#[tokio::test]
async fn edit_dish_reports_a_missing_dish() {
    let mut mocks = Mocks::new();
    mocks.dishes.expect_find_by_id().return_once(|_| Ok(None));

    let error = mocks
        .into_service()
        .edit_dish(
            &sample_owner(5),
            EditDishRequest {
                dish_id: 404,
                price: Some(15),
                ..EditDishRequest::default()
            },
        )
        .await
        .expect_err("missing dish");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Dish not found");
}

#[tokio::test]
async fn edit_dish_updates_an_owned_menu() {
    let mut mocks = Mocks::new();
    mocks
        .dishes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_dish(2, 1))));
    mocks
        .restaurants
        .expect_find_by_id()
        .with(eq(1))
        .return_once(|_| Ok(Some(sample_restaurant(1, 5))));
    mocks
        .dishes
        .expect_update()
        .withf(|id, changes| *id == 2 && changes.price == Some(15))
        .times(1)
        .return_once(|_, _| Ok(()));

    mocks
        .into_service()
        .edit_dish(
            &sample_owner(5),
            EditDishRequest {
                dish_id: 2,
                price: Some(15),
                ..EditDishRequest::default()
            },
        )
        .await
        .expect("dish edited");
}

#[tokio::test]
async fn delete_dish_checks_menu_ownership() {
    let mut mocks = Mocks::new();
    mocks
        .dishes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_dish(2, 1))));
    mocks
        .restaurants
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_restaurant(1, 99))));
    mocks.dishes.expect_delete().times(0);

    let error = mocks
        .into_service()
        .delete_dish(&sample_owner(5), 2)
        .await
        .expect_err("foreign menu");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), "You can't do that.");
}

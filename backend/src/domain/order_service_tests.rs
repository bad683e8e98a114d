//! Tests for the order service.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::order::OrderItemOption;
use crate::domain::ports::{
    MockDishRepository, MockOrderEventChannel, MockOrderRepository, MockRestaurantRepository,
    OrderItemRequest, OrderRepositoryError,
};
use crate::domain::restaurant::{Dish, DishOption, OptionChoice, Restaurant};

type Service = OrderService<
    MockOrderRepository,
    MockRestaurantRepository,
    MockDishRepository,
    MockOrderEventChannel,
>;

struct Mocks {
    orders: MockOrderRepository,
    restaurants: MockRestaurantRepository,
    dishes: MockDishRepository,
    events: MockOrderEventChannel,
}

impl Mocks {
    fn new() -> Self {
        Self {
            orders: MockOrderRepository::new(),
            restaurants: MockRestaurantRepository::new(),
            dishes: MockDishRepository::new(),
            events: MockOrderEventChannel::new(),
        }
    }

    fn into_service(self) -> Service {
        OrderService::new(
            Arc::new(self.orders),
            Arc::new(self.restaurants),
            Arc::new(self.dishes),
            Arc::new(self.events),
        )
    }
}

fn sample_user(id: i32, role: Role) -> User {
    let now = Utc::now();
    User {
        id,
        email: format!("user{id}@example.com"),
        password_hash: "$2b$hash".to_owned(),
        role,
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

fn priced_dish(id: i32, restaurant_id: i32) -> Dish {
    Dish {
        id,
        name: "Bibimbap".to_owned(),
        price: 12,
        photo: None,
        description: "Rice bowl".to_owned(),
        restaurant_id,
        options: vec![
            DishOption {
                name: "extra rice".to_owned(),
                extra: Some(2),
                choices: Vec::new(),
            },
            DishOption {
                name: "spice".to_owned(),
                extra: None,
                choices: vec![
                    OptionChoice {
                        name: "mild".to_owned(),
                        extra: None,
                    },
                    OptionChoice {
                        name: "nuclear".to_owned(),
                        extra: Some(1),
                    },
                ],
            },
        ],
    }
}

fn sample_order(id: i32, customer_id: i32, status: OrderStatus) -> Order {
    Order {
        id,
        customer_id,
        driver_id: None,
        restaurant_id: 2,
        status,
        total_price: Some(15),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn create_order_prices_dishes_from_the_stored_menu() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_find_by_id()
        .with(eq(2))
        .return_once(|_| Ok(Some(sample_restaurant(2, 77))));
    mocks
        .dishes
        .expect_find_by_id()
        .with(eq(9))
        .return_once(|_| Ok(Some(priced_dish(9, 2))));
    mocks
        .orders
        .expect_create()
        .withf(|new| {
            new.status == OrderStatus::Pending
                && new.total_price == Some(15)
                && new.items.len() == 1
        })
        .times(1)
        .return_once(|new| {
            let mut order = sample_order(31, new.customer_id, new.status);
            order.total_price = new.total_price;
            Ok(order)
        });
    mocks
        .events
        .expect_publish_pending()
        .withf(|event| {
            event.owner_id == 77 && event.order.id == 31 && event.order.total_price == Some(15)
        })
        .times(1)
        .return_const(());

    let order = mocks
        .into_service()
        .create_order(
            &sample_user(4, Role::Client),
            CreateOrderRequest {
                restaurant_id: 2,
                items: vec![OrderItemRequest {
                    dish_id: 9,
                    options: vec![
                        OrderItemOption {
                            name: "extra rice".to_owned(),
                            choice: None,
                        },
                        OrderItemOption {
                            name: "spice".to_owned(),
                            choice: Some("nuclear".to_owned()),
                        },
                    ],
                }],
            },
        )
        .await
        .expect("order created");

    assert_eq!(order.total_price, Some(15));
}

#[tokio::test]
async fn create_order_reports_a_missing_restaurant() {
    let mut mocks = Mocks::new();
    mocks.restaurants.expect_find_by_id().return_once(|_| Ok(None));
    mocks.events.expect_publish_pending().times(0);

    let error = mocks
        .into_service()
        .create_order(
            &sample_user(4, Role::Client),
            CreateOrderRequest {
                restaurant_id: 404,
                items: Vec::new(),
            },
        )
        .await
        .expect_err("missing restaurant");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Restaurant not found");
}

#[tokio::test]
async fn create_order_reports_a_missing_dish() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_restaurant(2, 77))));
    mocks.dishes.expect_find_by_id().return_once(|_| Ok(None));
    mocks.orders.expect_create().times(0);
    mocks.events.expect_publish_pending().times(0);

    let error = mocks
        .into_service()
        .create_order(
            &sample_user(4, Role::Client),
            CreateOrderRequest {
                restaurant_id: 2,
                items: vec![OrderItemRequest {
                    dish_id: 404,
                    options: Vec::new(),
                }],
            },
        )
        .await
        .expect_err("missing dish");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Dish not found.");
}

#[tokio::test]
async fn create_order_rejects_a_dish_from_another_menu() {
    let mut mocks = Mocks::new();
    mocks
        .restaurants
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_restaurant(2, 77))));
    mocks
        .dishes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(priced_dish(9, 3))));
    mocks.orders.expect_create().times(0);
    mocks.events.expect_publish_pending().times(0);

    let error = mocks
        .into_service()
        .create_order(
            &sample_user(4, Role::Client),
            CreateOrderRequest {
                restaurant_id: 2,
                items: vec![OrderItemRequest {
                    dish_id: 9,
                    options: Vec::new(),
                }],
            },
        )
        .await
        .expect_err("foreign dish");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Dish not found.");
}

#[tokio::test]
async fn get_orders_scopes_clients_to_their_own_orders() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_customer()
        .with(eq(4), eq(Some(OrderStatus::Pending)))
        .times(1)
        .return_once(|_, _| Ok(vec![sample_order(1, 4, OrderStatus::Pending)]));

    let orders = mocks
        .into_service()
        .get_orders(&sample_user(4, Role::Client), Some(OrderStatus::Pending))
        .await
        .expect("orders loaded");

    assert_eq!(orders.len(), 1);
}

#[tokio::test]
async fn get_orders_scopes_riders_to_assigned_orders() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_driver()
        .with(eq(8), eq(None))
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let orders = mocks
        .into_service()
        .get_orders(&sample_user(8, Role::Delivery), None)
        .await
        .expect("orders loaded");

    assert!(orders.is_empty());
}

#[tokio::test]
async fn get_orders_scopes_owners_to_their_restaurants() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_restaurant_owner()
        .with(eq(77), eq(None))
        .times(1)
        .return_once(|_, _| Ok(vec![sample_order(1, 4, OrderStatus::Cooking)]));

    let orders = mocks
        .into_service()
        .get_orders(&sample_user(77, Role::Owner), None)
        .await
        .expect("orders loaded");

    assert_eq!(orders.len(), 1);
}

#[tokio::test]
async fn get_orders_masks_storage_faults() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_customer()
        .return_once(|_, _| Err(OrderRepositoryError::query("boom")));

    let error = mocks
        .into_service()
        .get_orders(&sample_user(4, Role::Client), None)
        .await
        .expect_err("storage fault");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Could not load orders.");
}

#[tokio::test]
async fn get_order_denies_a_stranger() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_order(1, 4, OrderStatus::Pending))));

    let error = mocks
        .into_service()
        .get_order(&sample_user(99, Role::Client), 1)
        .await
        .expect_err("stranger");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), "You can't see that");
}

#[tokio::test]
async fn get_order_lets_the_owner_see_restaurant_orders() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_order(1, 4, OrderStatus::Pending))));
    mocks
        .restaurants
        .expect_find_by_id()
        .with(eq(2))
        .return_once(|_| Ok(Some(sample_restaurant(2, 77))));

    mocks
        .into_service()
        .get_order(&sample_user(77, Role::Owner), 1)
        .await
        .expect("owner sees the order");
}

#[tokio::test]
async fn get_order_reports_a_missing_order() {
    let mut mocks = Mocks::new();
    mocks.orders.expect_find_by_id().return_once(|_| Ok(None));

    let error = mocks
        .into_service()
        .get_order(&sample_user(4, Role::Client), 404)
        .await
        .expect_err("missing order");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Order not found.");
}

#[tokio::test]
async fn edit_order_owner_advances_the_kitchen() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_order(1, 4, OrderStatus::Pending))));
    mocks
        .restaurants
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_restaurant(2, 77))));
    mocks
        .orders
        .expect_update_status()
        .with(eq(1), eq(OrderStatus::Cooking), eq(None))
        .times(1)
        .return_once(|_, _, _| Ok(()));

    mocks
        .into_service()
        .edit_order(
            &sample_user(77, Role::Owner),
            EditOrderRequest {
                order_id: 1,
                status: OrderStatus::Cooking,
            },
        )
        .await
        .expect("order advanced");
}

#[tokio::test]
async fn edit_order_rider_claims_the_driver_slot_on_pickup() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_order(1, 4, OrderStatus::Cooked))));
    mocks
        .orders
        .expect_update_status()
        .with(eq(1), eq(OrderStatus::PickedUp), eq(Some(8)))
        .times(1)
        .return_once(|_, _, _| Ok(()));

    mocks
        .into_service()
        .edit_order(
            &sample_user(8, Role::Delivery),
            EditOrderRequest {
                order_id: 1,
                status: OrderStatus::PickedUp,
            },
        )
        .await
        .expect("rider claims the order");
}

#[tokio::test]
async fn edit_order_assigned_rider_completes_delivery() {
    let mut mocks = Mocks::new();
    mocks.orders.expect_find_by_id().return_once(|_| {
        let mut order = sample_order(1, 4, OrderStatus::PickedUp);
        order.driver_id = Some(8);
        Ok(Some(order))
    });
    mocks
        .orders
        .expect_update_status()
        .with(eq(1), eq(OrderStatus::Delivered), eq(None))
        .times(1)
        .return_once(|_, _, _| Ok(()));

    mocks
        .into_service()
        .edit_order(
            &sample_user(8, Role::Delivery),
            EditOrderRequest {
                order_id: 1,
                status: OrderStatus::Delivered,
            },
        )
        .await
        .expect("delivery completed");
}

#[tokio::test]
async fn edit_order_rejects_skipping_states() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_order(1, 4, OrderStatus::Pending))));
    mocks
        .restaurants
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_restaurant(2, 77))));
    mocks.orders.expect_update_status().times(0);

    let error = mocks
        .into_service()
        .edit_order(
            &sample_user(77, Role::Owner),
            EditOrderRequest {
                order_id: 1,
                status: OrderStatus::Cooked,
            },
        )
        .await
        .expect_err("skipped state");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), "You can't do that.");
}

#[tokio::test]
async fn edit_order_clients_never_edit_status() {
    let mut mocks = Mocks::new();
    mocks
        .orders
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_order(1, 4, OrderStatus::Pending))));
    mocks.orders.expect_update_status().times(0);

    let error = mocks
        .into_service()
        .edit_order(
            &sample_user(4, Role::Client),
            EditOrderRequest {
                order_id: 1,
                status: OrderStatus::Cooking,
            },
        )
        .await
        .expect_err("client edit");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), "You can't do that.");
}

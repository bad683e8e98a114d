//! HTTP adapter: routing, the response envelope, and the auth gate.

use actix_web::web;
use pagination::PageRequest;

use crate::domain::Error;

pub mod auth;
pub mod categories;
pub mod dishes;
pub mod envelope;
pub mod error;
pub mod health;
pub mod orders;
pub mod restaurants;
pub mod state;
pub mod users;

/// Parse an optional `page` query value, defaulting to the first page.
pub(crate) fn page_param(page: Option<u32>) -> Result<PageRequest, Error> {
    match page {
        Some(number) => {
            PageRequest::new(number).map_err(|err| Error::invalid_request(err.to_string()))
        }
        None => Ok(PageRequest::first()),
    }
}

/// Register every HTTP route.
///
/// Literal paths are registered ahead of their parameterised siblings so
/// `/users/me` and `/restaurants/search` are not swallowed by `{id}` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_account)
        .service(users::login)
        .service(users::verify_email)
        .service(users::me)
        .service(users::edit_profile)
        .service(users::user_profile)
        .service(restaurants::create_restaurant)
        .service(restaurants::all_restaurants)
        .service(restaurants::search_restaurants)
        .service(restaurants::find_restaurant)
        .service(restaurants::edit_restaurant)
        .service(restaurants::delete_restaurant)
        .service(categories::all_categories)
        .service(categories::find_category)
        .service(dishes::create_dish)
        .service(dishes::edit_dish)
        .service(dishes::delete_dish)
        .service(orders::create_order)
        .service(orders::get_orders)
        .service(orders::get_order)
        .service(orders::edit_order);
}

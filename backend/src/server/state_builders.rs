//! Assembly of adapter and service state for the HTTP server.

use std::sync::Arc;

use crate::domain::ports::{Orders, Restaurants, UserAccounts};
use crate::domain::{OrderService, RestaurantService, UserService};
use crate::inbound::http::state::HttpState;
use crate::inbound::ws::state::WsState;
use crate::outbound::auth::{BcryptPasswordHasher, JwtTokenService};
use crate::outbound::email::{LogMailer, MailgunMailer};
use crate::outbound::events::BroadcastOrderChannel;
use crate::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselDishRepository, DieselOrderRepository,
    DieselRestaurantRepository, DieselUserRepository, DieselVerificationRepository,
};
use crate::server::Config;

/// Wire repositories, services, and adapters into the shared handler states.
pub(crate) fn build_states(config: &Config, pool: DbPool) -> (HttpState, WsState) {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let verifications = Arc::new(DieselVerificationRepository::new(pool.clone()));
    let categories = Arc::new(DieselCategoryRepository::new(pool.clone()));
    let restaurants = Arc::new(DieselRestaurantRepository::new(pool.clone()));
    let dishes = Arc::new(DieselDishRepository::new(pool.clone()));
    let orders = Arc::new(DieselOrderRepository::new(pool));

    let tokens = Arc::new(JwtTokenService::new(
        &config.jwt_secret,
        config.token_ttl_seconds,
    ));
    let hasher = Arc::new(BcryptPasswordHasher::new());
    let channel = Arc::new(BroadcastOrderChannel::new());

    let accounts: Arc<dyn UserAccounts> = match config.mailgun() {
        Some(mailgun) => Arc::new(UserService::new(
            users,
            verifications,
            hasher,
            tokens.clone(),
            Arc::new(MailgunMailer::new(
                mailgun.api_key,
                mailgun.domain,
                mailgun.from,
            )),
        )),
        None => Arc::new(UserService::new(
            users,
            verifications,
            hasher,
            tokens.clone(),
            Arc::new(LogMailer),
        )),
    };

    let restaurant_ops: Arc<dyn Restaurants> = Arc::new(RestaurantService::new(
        restaurants.clone(),
        categories,
        dishes.clone(),
    ));
    let order_ops: Arc<dyn Orders> = Arc::new(OrderService::new(
        orders,
        restaurants,
        dishes,
        channel.clone(),
    ));

    let http_state = HttpState {
        accounts,
        restaurants: restaurant_ops,
        orders: order_ops,
        tokens,
    };
    (http_state, WsState::new(channel))
}

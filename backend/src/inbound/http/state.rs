//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! driving ports and stay testable with mocks.

use std::sync::Arc;

use crate::domain::ports::{Orders, Restaurants, TokenService, UserAccounts};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn UserAccounts>,
    pub restaurants: Arc<dyn Restaurants>,
    pub orders: Arc<dyn Orders>,
    pub tokens: Arc<dyn TokenService>,
}

//! Persistence port for restaurant aggregates.

use async_trait::async_trait;
use pagination::PageRequest;
use thiserror::Error;

use crate::domain::restaurant::{NewRestaurant, Restaurant, RestaurantChanges};

/// Errors raised by restaurant repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestaurantRepositoryError {
    /// Repository connection could not be established.
    #[error("restaurant repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("restaurant repository query failed: {message}")]
    Query { message: String },
}

impl RestaurantRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for restaurant storage, listing, and search.
///
/// Listing operations return one fixed-size window plus the total count so
/// the service can build the pagination envelope.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Insert a new restaurant and return the persisted row.
    async fn insert(&self, restaurant: NewRestaurant)
        -> Result<Restaurant, RestaurantRepositoryError>;

    /// Fetch a restaurant by primary key.
    async fn find_by_id(&self, id: i32) -> Result<Option<Restaurant>, RestaurantRepositoryError>;

    /// Apply a partial update; untouched fields keep their stored values.
    async fn update(
        &self,
        id: i32,
        changes: RestaurantChanges,
    ) -> Result<(), RestaurantRepositoryError>;

    /// Delete a restaurant by primary key.
    async fn delete(&self, id: i32) -> Result<(), RestaurantRepositoryError>;

    /// One page of all restaurants plus the total count.
    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<Restaurant>, u64), RestaurantRepositoryError>;

    /// One page of restaurants whose name contains `query`, case-insensitively.
    async fn search_by_name(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<(Vec<Restaurant>, u64), RestaurantRepositoryError>;

    /// One page of restaurants in a category.
    async fn find_by_category(
        &self,
        category_id: i32,
        page: PageRequest,
    ) -> Result<Vec<Restaurant>, RestaurantRepositoryError>;

    /// Total number of restaurants in a category.
    async fn count_by_category(&self, category_id: i32) -> Result<u64, RestaurantRepositoryError>;
}

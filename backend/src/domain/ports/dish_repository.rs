//! Persistence port for dishes.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::restaurant::{Dish, DishChanges, NewDish};

/// Errors raised by dish repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DishRepositoryError {
    /// Repository connection could not be established.
    #[error("dish repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("dish repository query failed: {message}")]
    Query { message: String },
}

impl DishRepositoryError {
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

/// Port for dish storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishRepository: Send + Sync {
    /// Insert a new dish and return the persisted row.
    async fn insert(&self, dish: NewDish) -> Result<Dish, DishRepositoryError>;

    /// Fetch a dish by primary key.
    async fn find_by_id(&self, id: i32) -> Result<Option<Dish>, DishRepositoryError>;

    /// Apply a partial update; untouched fields keep their stored values.
    async fn update(&self, id: i32, changes: DishChanges) -> Result<(), DishRepositoryError>;

    /// Delete a dish by primary key.
    async fn delete(&self, id: i32) -> Result<(), DishRepositoryError>;
}

//! Persistence port for categories.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::restaurant::Category;

/// Errors raised by category repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryRepositoryError {
    /// Repository connection could not be established.
    #[error("category repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("category repository query failed: {message}")]
    Query { message: String },
}

impl CategoryRepositoryError {
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

/// Port for category storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Look up the category with `slug`, creating it when absent.
    ///
    /// Implementations must make this a single atomic step keyed on the
    /// unique slug so concurrent callers cannot create duplicates.
    async fn get_or_create(
        &self,
        name: &str,
        slug: &str,
    ) -> Result<Category, CategoryRepositoryError>;

    /// Every category.
    async fn all(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Fetch a category by slug.
    async fn find_by_slug(&self, slug: &str)
        -> Result<Option<Category>, CategoryRepositoryError>;
}

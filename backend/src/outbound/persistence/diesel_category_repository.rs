//! PostgreSQL-backed `CategoryRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::restaurant::Category;

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{CategoryRow, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryRepositoryError {
    CategoryRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error, operation: &str) -> CategoryRepositoryError {
    CategoryRepositoryError::query(diesel_error_message(error, operation))
}

fn row_to_category(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        name: row.name,
        cover_image: row.cover_image,
        slug: row.slug,
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn get_or_create(
        &self,
        name: &str,
        slug: &str,
    ) -> Result<Category, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Single upsert keyed on the unique slug so concurrent creators
        // converge on one row. The no-op update makes RETURNING yield the
        // existing row without overwriting its display name.
        let row: CategoryRow = diesel::insert_into(categories::table)
            .values(NewCategoryRow { name, slug })
            .on_conflict(categories::slug)
            .do_update()
            .set(categories::slug.eq(excluded(categories::slug)))
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "get or create category"))?;
        Ok(row_to_category(row))
    }

    async fn all(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .order(categories::name.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "load categories"))?;
        Ok(rows.into_iter().map(row_to_category).collect())
    }

    async fn find_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CategoryRow> = categories::table
            .filter(categories::slug.eq(slug))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find category by slug"))?;
        Ok(row.map(row_to_category))
    }
}

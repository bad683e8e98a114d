//! PostgreSQL-backed `RestaurantRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{RestaurantRepository, RestaurantRepositoryError};
use crate::domain::restaurant::{NewRestaurant, Restaurant, RestaurantChanges};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{NewRestaurantRow, RestaurantRow, RestaurantUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::restaurants;

/// Diesel-backed implementation of the `RestaurantRepository` port.
#[derive(Clone)]
pub struct DieselRestaurantRepository {
    pool: DbPool,
}

impl DieselRestaurantRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RestaurantRepositoryError {
    RestaurantRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error, operation: &str) -> RestaurantRepositoryError {
    RestaurantRepositoryError::query(diesel_error_message(error, operation))
}

fn row_to_restaurant(row: RestaurantRow) -> Restaurant {
    Restaurant {
        id: row.id,
        name: row.name,
        cover_image: row.cover_image,
        address: row.address,
        category_id: row.category_id,
        owner_id: row.owner_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn count_to_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn insert(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<Restaurant, RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: RestaurantRow = diesel::insert_into(restaurants::table)
            .values(NewRestaurantRow {
                name: &restaurant.name,
                cover_image: &restaurant.cover_image,
                address: &restaurant.address,
                category_id: restaurant.category_id,
                owner_id: restaurant.owner_id,
            })
            .returning(RestaurantRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "insert restaurant"))?;
        Ok(row_to_restaurant(row))
    }

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<Restaurant>, RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RestaurantRow> = restaurants::table
            .find(id)
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find restaurant by id"))?;
        Ok(row.map(row_to_restaurant))
    }

    async fn update(
        &self,
        id: i32,
        changes: RestaurantChanges,
    ) -> Result<(), RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(restaurants::table.find(id))
            .set(RestaurantUpdate {
                name: changes.name,
                cover_image: changes.cover_image,
                address: changes.address,
                category_id: changes.category_id,
                updated_at: Utc::now(),
            })
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "update restaurant"))?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(restaurants::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "delete restaurant"))?;
        Ok(())
    }

    async fn list(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<Restaurant>, u64), RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RestaurantRow> = restaurants::table
            .order(restaurants::created_at.desc())
            .offset(page.offset())
            .limit(page.limit())
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "list restaurants"))?;
        let total: i64 = restaurants::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "count restaurants"))?;
        Ok((
            rows.into_iter().map(row_to_restaurant).collect(),
            count_to_total(total),
        ))
    }

    async fn search_by_name(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<(Vec<Restaurant>, u64), RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = format!("%{query}%");
        let rows: Vec<RestaurantRow> = restaurants::table
            .filter(restaurants::name.ilike(&pattern))
            .order(restaurants::created_at.desc())
            .offset(page.offset())
            .limit(page.limit())
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "search restaurants"))?;
        let total: i64 = restaurants::table
            .filter(restaurants::name.ilike(&pattern))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "count restaurant search"))?;
        Ok((
            rows.into_iter().map(row_to_restaurant).collect(),
            count_to_total(total),
        ))
    }

    async fn find_by_category(
        &self,
        category_id: i32,
        page: PageRequest,
    ) -> Result<Vec<Restaurant>, RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RestaurantRow> = restaurants::table
            .filter(restaurants::category_id.eq(category_id))
            .order(restaurants::created_at.desc())
            .offset(page.offset())
            .limit(page.limit())
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "find restaurants by category"))?;
        Ok(rows.into_iter().map(row_to_restaurant).collect())
    }

    async fn count_by_category(
        &self,
        category_id: i32,
    ) -> Result<u64, RestaurantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = restaurants::table
            .filter(restaurants::category_id.eq(category_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "count restaurants by category"))?;
        Ok(count_to_total(total))
    }
}

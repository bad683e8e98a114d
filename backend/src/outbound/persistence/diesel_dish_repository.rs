//! PostgreSQL-backed `DishRepository` implementation using Diesel.
//!
//! Dish customisation options are stored as a JSONB document; the converters
//! here translate between that document and the typed domain options.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DishRepository, DishRepositoryError};
use crate::domain::restaurant::{Dish, DishChanges, DishOption, NewDish};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{DishRow, DishUpdate, NewDishRow};
use super::pool::{DbPool, PoolError};
use super::schema::dishes;

/// Diesel-backed implementation of the `DishRepository` port.
#[derive(Clone)]
pub struct DieselDishRepository {
    pool: DbPool,
}

impl DieselDishRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DishRepositoryError {
    DishRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error, operation: &str) -> DishRepositoryError {
    DishRepositoryError::query(diesel_error_message(error, operation))
}

fn options_to_json(options: &[DishOption]) -> Result<serde_json::Value, DishRepositoryError> {
    serde_json::to_value(options)
        .map_err(|err| DishRepositoryError::query(format!("dish options not serializable: {err}")))
}

fn row_to_dish(row: DishRow) -> Result<Dish, DishRepositoryError> {
    let options: Vec<DishOption> = serde_json::from_value(row.options)
        .map_err(|err| DishRepositoryError::query(format!("stored dish options invalid: {err}")))?;
    Ok(Dish {
        id: row.id,
        name: row.name,
        price: row.price,
        photo: row.photo,
        description: row.description,
        restaurant_id: row.restaurant_id,
        options,
    })
}

#[async_trait]
impl DishRepository for DieselDishRepository {
    async fn insert(&self, dish: NewDish) -> Result<Dish, DishRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let options = options_to_json(&dish.options)?;
        let row: DishRow = diesel::insert_into(dishes::table)
            .values(NewDishRow {
                name: &dish.name,
                price: dish.price,
                photo: dish.photo.as_deref(),
                description: &dish.description,
                restaurant_id: dish.restaurant_id,
                options,
            })
            .returning(DishRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "insert dish"))?;
        row_to_dish(row)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Dish>, DishRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DishRow> = dishes::table
            .find(id)
            .select(DishRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find dish by id"))?;
        row.map(row_to_dish).transpose()
    }

    async fn update(&self, id: i32, changes: DishChanges) -> Result<(), DishRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let options = changes
            .options
            .as_deref()
            .map(options_to_json)
            .transpose()?;
        diesel::update(dishes::table.find(id))
            .set(DishUpdate {
                name: changes.name,
                price: changes.price,
                photo: changes.photo,
                description: changes.description,
                options,
            })
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "update dish"))?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DishRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(dishes::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "delete dish"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::restaurant::OptionChoice;
    use rstest::rstest;

    #[rstest]
    fn options_round_trip_through_jsonb() {
        let options = vec![DishOption {
            name: "spice".to_owned(),
            extra: None,
            choices: vec![OptionChoice {
                name: "nuclear".to_owned(),
                extra: Some(1),
            }],
        }];
        let json = options_to_json(&options).expect("serializable");
        let row = DishRow {
            id: 1,
            name: "Bibimbap".to_owned(),
            price: 12,
            photo: None,
            description: "Rice bowl".to_owned(),
            restaurant_id: 2,
            options: json,
        };
        let dish = row_to_dish(row).expect("valid row");
        assert_eq!(dish.options, options);
    }

    #[rstest]
    fn malformed_stored_options_surface_as_query_errors() {
        let row = DishRow {
            id: 1,
            name: "Bibimbap".to_owned(),
            price: 12,
            photo: None,
            description: "Rice bowl".to_owned(),
            restaurant_id: 2,
            options: serde_json::json!({"not": "a list"}),
        };
        let err = row_to_dish(row).expect_err("invalid document");
        assert!(err.to_string().contains("stored dish options invalid"));
    }
}

//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{NewUser, User};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error, operation: &str) -> UserRepositoryError {
    UserRepositoryError::query(diesel_error_message(error, operation))
}

/// Convert a database row to a domain user.
///
/// An unparseable role means the row was written outside the application;
/// surface it as a query error rather than guessing.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let role = row
        .role
        .parse()
        .map_err(|err: crate::domain::user::ParseRoleError| {
            UserRepositoryError::query(err.to_string())
        })?;
    Ok(User {
        id: row.id,
        email: row.email,
        password_hash: row.password_hash,
        role,
        verified: row.verified,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow {
                email: &user.email,
                password_hash: &user.password_hash,
                role: user.role.as_str(),
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "insert user"))?;
        row_to_user(row)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find user by id"))?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find user by email"))?;
        row.map(row_to_user).transpose()
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(users::table.find(user.id))
            .set(UserUpdate {
                email: &user.email,
                password_hash: &user.password_hash,
                verified: user.verified,
                updated_at: Utc::now(),
            })
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "update user"))?;
        Ok(())
    }
}

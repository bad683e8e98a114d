//! PostgreSQL-backed `VerificationRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{VerificationRepository, VerificationRepositoryError};
use crate::domain::user::{User, Verification};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{NewVerificationRow, UserRow, VerificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{users, verifications};

/// Diesel-backed implementation of the `VerificationRepository` port.
#[derive(Clone)]
pub struct DieselVerificationRepository {
    pool: DbPool,
}

impl DieselVerificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VerificationRepositoryError {
    VerificationRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(
    error: &diesel::result::Error,
    operation: &str,
) -> VerificationRepositoryError {
    VerificationRepositoryError::query(diesel_error_message(error, operation))
}

fn row_to_verification(row: VerificationRow) -> Verification {
    Verification {
        id: row.id,
        code: row.code,
        user_id: row.user_id,
    }
}

fn row_to_user(row: UserRow) -> Result<User, VerificationRepositoryError> {
    let role = row
        .role
        .parse()
        .map_err(|err: crate::domain::user::ParseRoleError| {
            VerificationRepositoryError::query(err.to_string())
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
impl VerificationRepository for DieselVerificationRepository {
    async fn create(
        &self,
        user_id: i32,
        code: &str,
    ) -> Result<Verification, VerificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: VerificationRow = diesel::insert_into(verifications::table)
            .values(NewVerificationRow { code, user_id })
            .returning(VerificationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "create verification"))?;
        Ok(row_to_verification(row))
    }

    async fn replace_for_user(
        &self,
        user_id: i32,
        code: &str,
    ) -> Result<Verification, VerificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: VerificationRow = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(
                        verifications::table.filter(verifications::user_id.eq(user_id)),
                    )
                    .execute(conn)
                    .await?;
                    diesel::insert_into(verifications::table)
                        .values(NewVerificationRow { code, user_id })
                        .returning(VerificationRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(&err, "replace verification"))?;
        Ok(row_to_verification(row))
    }

    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<(Verification, User)>, VerificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(VerificationRow, UserRow)> = verifications::table
            .inner_join(users::table)
            .filter(verifications::code.eq(code))
            .select((VerificationRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find verification by code"))?;
        row.map(|(verification, user)| Ok((row_to_verification(verification), row_to_user(user)?)))
            .transpose()
    }

    async fn delete(&self, id: i32) -> Result<(), VerificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(verifications::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "delete verification"))?;
        Ok(())
    }
}

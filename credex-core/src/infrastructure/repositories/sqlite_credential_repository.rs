use std::fmt;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::repositories::{CredentialRecord, CredentialRepository, RepositoryError};

/// SQLite-backed credential store.
///
/// The `auth_users` schema (see `migrations/`) carries a `UNIQUE` constraint
/// on `email` under the default BINARY collation, so uniqueness and lookup
/// are byte-wise case-sensitive and concurrent inserts of the same email
/// resolve in the database, not here.
pub struct SqliteCredentialRepository {
    pool: SqlitePool,
}

impl fmt::Debug for SqliteCredentialRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCredentialRepository").finish()
    }
}

impl SqliteCredentialRepository {
    /// Wrap an existing connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations to the pool.
    pub async fn migrate(pool: &SqlitePool) -> Result<(), RepositoryError> {
        crate::MIGRATOR
            .run(pool)
            .await
            .map_err(|err| RepositoryError::Database(err.into()))
    }
}

fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::DuplicateEmail,
        _ => RepositoryError::Database(err.into()),
    }
}

#[async_trait]
impl CredentialRepository for SqliteCredentialRepository {
    async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO auth_users (email, password_hash) VALUES (?1, ?2) RETURNING id",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, (i64, String, String)>(
            "SELECT id, email, password_hash FROM auth_users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|(id, email, password_hash)| CredentialRecord {
            id,
            email,
            password_hash,
        }))
    }

    async fn update_password(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE auth_users SET password_hash = ?2 WHERE id = ?1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn update_email(&self, user_id: i64, email: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE auth_users SET email = ?2 WHERE id = ?1")
            .bind(user_id)
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

//! The credential store port and its record/error types.

use async_trait::async_trait;
use thiserror::Error;

/// A hydrated `auth_users` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Store-assigned identifier, stable for the lifetime of the record.
    pub id: i64,
    /// The record's email, unique across the store.
    pub email: String,
    /// PHC-format hash of the password. Never the plaintext.
    pub password_hash: String,
}

/// Failures surfaced by a credential store.
///
/// Uniqueness conflicts are the one classification the service layer acts
/// on; everything else stays opaque.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The email collides with an existing record's unique constraint.
    #[error("email is already registered")]
    DuplicateEmail,
    /// Any other store failure.
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Narrow port over the `auth_users` table.
///
/// Email comparison and uniqueness are byte-wise case-sensitive; the
/// implementation must enforce uniqueness with a store-level constraint so
/// concurrent inserts of the same email cannot both succeed. Every mutation
/// is a single statement keyed by id.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Insert a new record, returning the assigned id.
    async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<i64, RepositoryError>;

    /// Look up a record by exact email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, RepositoryError>;

    /// Replace the password hash for an id, returning affected row count.
    async fn update_password(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<u64, RepositoryError>;

    /// Replace the email for an id, returning affected row count.
    async fn update_email(&self, user_id: i64, email: &str) -> Result<u64, RepositoryError>;
}

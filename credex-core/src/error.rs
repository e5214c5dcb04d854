use thiserror::Error;

use crate::crypto::CryptoError;
use crate::domain::repositories::RepositoryError;
use crate::validate::ValidationReport;

/// Errors surfaced by credential operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more input constraints failed; carries field-level detail.
    #[error("validation failed: {0}")]
    Validation(ValidationReport),

    /// Authentication failed. Deliberately does not distinguish an unknown
    /// email from a wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email is already bound to another record, as reported by the
    /// store's uniqueness constraint.
    #[error("email is already registered")]
    DuplicateEmail,

    /// Password hashing failed; with a healthy RNG this does not happen.
    #[error("password hashing error: {0}")]
    Hashing(#[from] CryptoError),

    /// Any unclassified store failure, propagated opaquely.
    #[error("credential store error: {0}")]
    Store(#[source] anyhow::Error),
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateEmail => AuthError::DuplicateEmail,
            RepositoryError::Database(inner) => AuthError::Store(inner),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AuthError>;

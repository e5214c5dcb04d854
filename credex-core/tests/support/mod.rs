//! Shared helpers for the integration suites.

use std::sync::Arc;

use argon2::Params;
use credex_core::infrastructure::repositories::SqliteCredentialRepository;
use credex_core::{CredentialService, PasswordCrypto};
use sqlx::SqlitePool;

/// Cheap Argon2 parameters so suites are not dominated by hashing cost.
pub fn test_crypto() -> Arc<PasswordCrypto> {
    let params = Params::new(1024, 1, 1, Some(32)).expect("valid test params");
    Arc::new(PasswordCrypto::with_params("integration-pepper", params).expect("test crypto"))
}

/// A service wired to a SQLite-backed repository over the given pool.
pub fn service(pool: SqlitePool) -> CredentialService {
    CredentialService::new(
        Arc::new(SqliteCredentialRepository::new(pool)),
        test_crypto(),
    )
}

//! # Credex Core
//!
//! Core library for Credex, a credential-management service: account
//! registration, credential authentication, and self-service or
//! administrative password/email changes.
//!
//! ## Overview
//!
//! The crate exposes one component, [`CredentialService`], composed from two
//! collaborators:
//!
//! - [`PasswordCrypto`]: Argon2id hashing and verification with a
//!   server-side pepper. Hashing cost is deliberately nontrivial and
//!   dominates operation latency as a defense against offline and online
//!   brute-force guessing.
//! - [`CredentialRepository`]: a narrow async port over the `auth_users`
//!   table (insert, select-by-email, update-password, update-email).
//!   [`SqliteCredentialRepository`] implements it over SQLx; swapping store
//!   technology never touches credential logic.
//!
//! Every operation is a single validate → (authenticate) → mutate pass:
//! inputs are checked first ([`ValidationReport`] carries field-level
//! detail), self-service mutations re-authenticate before touching the
//! store, and email uniqueness is enforced by the store constraint rather
//! than a racy pre-check.
//!
//! ## Feature Flags
//!
//! - `database`: enables the SQLx/SQLite store adapter (on by default).
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use credex_core::{
//!     CredentialService, PasswordCrypto, RegisterRequest,
//!     infrastructure::repositories::SqliteCredentialRepository,
//! };
//! use sqlx::sqlite::SqlitePoolOptions;
//!
//! async fn bootstrap() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = SqlitePoolOptions::new()
//!         .max_connections(1)
//!         .connect("sqlite::memory:")
//!         .await?;
//!     SqliteCredentialRepository::migrate(&pool).await?;
//!
//!     let service = CredentialService::new(
//!         Arc::new(SqliteCredentialRepository::new(pool)),
//!         Arc::new(PasswordCrypto::new("server-pepper")?),
//!     );
//!
//!     let user_id = service
//!         .register(RegisterRequest {
//!             email: "a@x.com".into(),
//!             password: "password1".into(),
//!             password_confirm: "password1".into(),
//!         })
//!         .await?;
//!     println!("registered user {user_id}");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Password hashing and verification.
pub mod crypto;
/// Operation inputs, store port, and the credential service.
pub mod domain;
/// Error taxonomy for credential operations.
pub mod error;
/// Store adapters.
#[cfg(feature = "database")]
pub mod infrastructure;
/// Field-level input validation.
pub mod validate;

pub use crypto::{CryptoError, PasswordCrypto};
pub use domain::repositories::{CredentialRecord, CredentialRepository, RepositoryError};
pub use domain::requests::{
    AuthenticateRequest, ChangeEmailRequest, ChangePasswordRequest, ForceChangeEmailRequest,
    ForceChangePasswordRequest, RegisterRequest,
};
pub use domain::services::CredentialService;
pub use error::{AuthError, Result};
pub use validate::{FieldViolation, ValidationReport, ViolationRule};

/// Embedded schema migrations for the SQLite store adapter.
#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

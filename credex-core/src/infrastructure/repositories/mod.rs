//! SQLx-backed implementations of the domain ports.

mod sqlite_credential_repository;

pub use sqlite_credential_repository::SqliteCredentialRepository;

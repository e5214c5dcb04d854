//! The credential manager and its operations.

mod credential_service;

pub use credential_service::CredentialService;

//! Domain layer: operation inputs, the store port, and the credential
//! service that ties them together.

pub mod repositories;
pub mod requests;
pub mod services;

pub use repositories::{CredentialRecord, CredentialRepository, RepositoryError};
pub use requests::{
    AuthenticateRequest, ChangeEmailRequest, ChangePasswordRequest, ForceChangeEmailRequest,
    ForceChangePasswordRequest, RegisterRequest,
};
pub use services::CredentialService;

use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;

use crate::crypto::PasswordCrypto;
use crate::domain::repositories::{CredentialRepository, RepositoryError};
use crate::domain::requests::{
    AuthenticateRequest, ChangeEmailRequest, ChangePasswordRequest, ForceChangeEmailRequest,
    ForceChangePasswordRequest, RegisterRequest,
};
use crate::error::{AuthError, Result};
use crate::validate::ValidationReport;

/// The credential manager.
///
/// Stateless between calls; holds only the store port and the hasher, so a
/// single instance can be shared across concurrent callers. Every operation
/// validates its input, optionally re-authenticates, then performs at most
/// one mutating statement. Correctness under concurrency rests on the
/// store's uniqueness constraint and single-statement updates keyed by id.
pub struct CredentialService {
    repository: Arc<dyn CredentialRepository>,
    crypto: Arc<PasswordCrypto>,
}

impl fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialService")
            .field("repository_refs", &Arc::strong_count(&self.repository))
            .finish()
    }
}

impl CredentialService {
    /// Build a service over a store port and a configured hasher.
    pub fn new(repository: Arc<dyn CredentialRepository>, crypto: Arc<PasswordCrypto>) -> Self {
        Self { repository, crypto }
    }

    /// Register a new account, returning the store-assigned id.
    ///
    /// The password is hashed before insertion; the plaintext never reaches
    /// the store. A colliding email surfaces as
    /// [`AuthError::DuplicateEmail`] from the store's uniqueness constraint
    /// rather than a racy pre-check.
    pub async fn register(&self, request: RegisterRequest) -> Result<i64> {
        Self::ensure_valid(request.validate())?;

        let password_hash = self.crypto.hash_password(&request.password)?;
        let id = match self
            .repository
            .insert_user(&request.email, &password_hash)
            .await
        {
            Ok(id) => id,
            Err(RepositoryError::DuplicateEmail) => {
                tracing::warn!("registration rejected: email already registered");
                return Err(AuthError::DuplicateEmail);
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(user_id = id, "registered new account");
        Ok(id)
    }

    /// Verify a credential pair, returning the record id on success.
    ///
    /// An unknown email and a wrong password both yield
    /// [`AuthError::InvalidCredentials`]; the miss path burns a decoy
    /// verification so the two cases also cost the same.
    pub async fn authenticate(&self, request: AuthenticateRequest) -> Result<i64> {
        Self::ensure_valid(request.validate())?;

        let Some(record) = self.repository.find_by_email(&request.email).await? else {
            self.crypto.verify_decoy(&request.password);
            tracing::warn!("authentication failed");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .crypto
            .verify_password(&request.password, &record.password_hash)?
        {
            tracing::warn!(user_id = record.id, "authentication failed");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!(user_id = record.id, "authentication succeeded");
        Ok(record.id)
    }

    /// Change a password after re-authenticating the current one.
    ///
    /// Authentication completes before any mutation is attempted; its
    /// failure propagates unchanged. The stored hash is derived from the
    /// new password.
    pub async fn change_password(&self, request: ChangePasswordRequest) -> Result<()> {
        Self::ensure_valid(request.validate())?;

        let user_id = self
            .authenticate(AuthenticateRequest {
                email: request.email.clone(),
                password: request.current_password.clone(),
            })
            .await?;

        let password_hash = self.crypto.hash_password(&request.new_password)?;
        let affected = self
            .repository
            .update_password(user_id, &password_hash)
            .await?;
        if affected == 0 {
            return Err(AuthError::Store(anyhow!(
                "password update affected no rows for user {user_id}"
            )));
        }

        tracing::info!(user_id, "password changed");
        Ok(())
    }

    /// Change an email after re-authenticating the password.
    ///
    /// Fails with [`AuthError::DuplicateEmail`] when the new email collides
    /// with another record.
    pub async fn change_email(&self, request: ChangeEmailRequest) -> Result<()> {
        Self::ensure_valid(request.validate())?;

        let user_id = self
            .authenticate(AuthenticateRequest {
                email: request.email.clone(),
                password: request.password.clone(),
            })
            .await?;

        let affected = match self
            .repository
            .update_email(user_id, &request.new_email)
            .await
        {
            Ok(affected) => affected,
            Err(RepositoryError::DuplicateEmail) => {
                tracing::warn!(user_id, "email change rejected: email already registered");
                return Err(AuthError::DuplicateEmail);
            }
            Err(err) => return Err(err.into()),
        };
        if affected == 0 {
            return Err(AuthError::Store(anyhow!(
                "email update affected no rows for user {user_id}"
            )));
        }

        tracing::info!(user_id, "email changed");
        Ok(())
    }

    /// Replace a password for a target id without re-authentication.
    ///
    /// Reserved for privileged callers (admin tooling, reset flows) that
    /// have verified authority out-of-band; nothing here checks it.
    pub async fn force_change_password(
        &self,
        request: ForceChangePasswordRequest,
    ) -> Result<()> {
        Self::ensure_valid(request.validate())?;

        let password_hash = self.crypto.hash_password(&request.new_password)?;
        let affected = self
            .repository
            .update_password(request.user_id, &password_hash)
            .await?;
        if affected == 0 {
            return Err(AuthError::Store(anyhow!(
                "password update affected no rows for user {}",
                request.user_id
            )));
        }

        tracing::info!(user_id = request.user_id, "password changed by privileged caller");
        Ok(())
    }

    /// Replace an email for a target id without re-authentication.
    ///
    /// Reserved for privileged callers that have verified authority
    /// out-of-band; nothing here checks it. Fails with
    /// [`AuthError::DuplicateEmail`] on collision.
    pub async fn force_change_email(&self, request: ForceChangeEmailRequest) -> Result<()> {
        Self::ensure_valid(request.validate())?;

        let affected = match self
            .repository
            .update_email(request.user_id, &request.new_email)
            .await
        {
            Ok(affected) => affected,
            Err(RepositoryError::DuplicateEmail) => {
                tracing::warn!(
                    user_id = request.user_id,
                    "email change rejected: email already registered"
                );
                return Err(AuthError::DuplicateEmail);
            }
            Err(err) => return Err(err.into()),
        };
        if affected == 0 {
            return Err(AuthError::Store(anyhow!(
                "email update affected no rows for user {}",
                request.user_id
            )));
        }

        tracing::info!(user_id = request.user_id, "email changed by privileged caller");
        Ok(())
    }

    fn ensure_valid(report: ValidationReport) -> Result<()> {
        if report.is_satisfied() {
            Ok(())
        } else {
            Err(AuthError::Validation(report))
        }
    }
}

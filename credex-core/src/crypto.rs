use argon2::{
    Algorithm, Argon2, Params, ParamsBuilder, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use password_hash::Error as PasswordHashError;
use rand::{TryRngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroizing;

/// Centralized cryptographic helper for credential hashing.
///
/// Wraps Argon2id with a server-side pepper so every stored hash is bound to
/// a secret the database never sees. Keeping the parameters in one place
/// guarantees consistent cost choices and makes it possible to rotate the
/// pepper in the future.
///
/// Construction also derives a decoy hash so lookups that miss can still
/// burn a full verification (see [`PasswordCrypto::verify_decoy`]).
pub struct PasswordCrypto {
    argon2: Argon2<'static>,
    pepper: Zeroizing<Vec<u8>>,
    decoy_hash: String,
}

impl std::fmt::Debug for PasswordCrypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCrypto").finish()
    }
}

/// Errors raised while configuring or running the password hasher.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The server-side pepper was empty at construction time.
    #[error("password pepper must not be empty")]
    EmptyPepper,
    /// The Argon2 parameter set was rejected by the hasher.
    #[error("invalid Argon2 parameters: {0}")]
    InvalidParams(String),
    /// Hashing or verification failed, typically on RNG exhaustion or a
    /// malformed stored hash.
    #[error("password hashing error: {0}")]
    Hash(String),
}

impl From<PasswordHashError> for CryptoError {
    fn from(err: PasswordHashError) -> Self {
        CryptoError::Hash(err.to_string())
    }
}

impl PasswordCrypto {
    /// Server defaults target ~64 MiB memory and 3 iterations, a solid
    /// baseline without dedicated tuning.
    const DEFAULT_MEMORY_KIB: u32 = 64 * 1024; // 64 MiB
    const DEFAULT_ITERATIONS: u32 = 3;
    const DEFAULT_PARALLELISM: u32 = 1;
    const SALT_LENGTH: usize = password_hash::Salt::RECOMMENDED_LENGTH;

    /// Build a helper with default Argon2id parameters.
    pub fn new(pepper: impl AsRef<[u8]>) -> Result<Self, CryptoError> {
        Self::with_params(
            pepper,
            ParamsBuilder::new()
                .m_cost(Self::DEFAULT_MEMORY_KIB)
                .t_cost(Self::DEFAULT_ITERATIONS)
                .p_cost(Self::DEFAULT_PARALLELISM)
                .output_len(32)
                .build()
                .map_err(|err| CryptoError::InvalidParams(err.to_string()))?,
        )
    }

    /// Build a helper with caller-specified Argon2 parameters (useful for
    /// tests or constrained environments).
    pub fn with_params(
        pepper: impl AsRef<[u8]>,
        params: Params,
    ) -> Result<Self, CryptoError> {
        let pepper = pepper.as_ref();
        if pepper.is_empty() {
            return Err(CryptoError::EmptyPepper);
        }

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::default(), params);

        let mut crypto = Self {
            argon2,
            pepper: Zeroizing::new(pepper.to_vec()),
            decoy_hash: String::new(),
        };
        let decoy_hash = crypto.hash_password("")?;
        crypto.decoy_hash = decoy_hash;
        Ok(crypto)
    }

    /// Hash a password using Argon2id with a random salt and the shared
    /// pepper. The resulting PHC string is suitable for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, CryptoError> {
        let material = self.peppered(password);

        let mut salt_bytes = [0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| CryptoError::Hash(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(CryptoError::from)?;
        let hash = self.argon2.hash_password(&material, &salt)?.to_string();
        Ok(hash)
    }

    /// Verify a password against a stored PHC hash, applying the shared
    /// pepper. The underlying comparison is constant-time.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, CryptoError> {
        let parsed = PasswordHash::new(password_hash)?;
        let material = self.peppered(password);
        Ok(self.argon2.verify_password(&material, &parsed).is_ok())
    }

    /// Burn a verification against the decoy hash.
    ///
    /// Used when a lookup misses entirely, so that "unknown account" and
    /// "wrong password" cost the caller one Argon2 verification each and are
    /// indistinguishable by timing. The result is always discarded.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify_password(password, &self.decoy_hash);
    }

    fn peppered(&self, password: &str) -> Zeroizing<Vec<u8>> {
        let mut material =
            Zeroizing::new(Vec::with_capacity(password.len() + self.pepper.len()));
        material.extend_from_slice(password.as_bytes());
        material.extend_from_slice(&self.pepper);
        material
    }

    #[cfg(test)]
    pub(crate) fn pepper(&self) -> &[u8] {
        &self.pepper
    }
}

#[cfg(test)]
pub(crate) fn test_params() -> Params {
    // Cheap parameters so test suites are not dominated by hashing cost.
    Params::new(1024, 1, 1, Some(32)).expect("valid test params")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crypto() -> PasswordCrypto {
        PasswordCrypto::with_params("pepper", test_params()).unwrap()
    }

    #[test]
    fn hashes_passwords_and_verifies() {
        let crypto = crypto();
        let hash = crypto.hash_password("correct horse").unwrap();
        assert!(crypto.verify_password("correct horse", &hash).unwrap());
        assert!(!crypto.verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn hash_is_opaque_and_salted() {
        let crypto = crypto();
        let first = crypto.hash_password("password1").unwrap();
        let second = crypto.hash_password("password1").unwrap();
        assert_ne!(first, "password1");
        assert!(first.starts_with("$argon2id$"));
        // Random salts mean equal plaintexts never share a hash.
        assert_ne!(first, second);
    }

    #[test]
    fn pepper_binds_the_hash() {
        let crypto = crypto();
        let other = PasswordCrypto::with_params("other-pepper", test_params()).unwrap();
        let hash = crypto.hash_password("correct horse").unwrap();
        assert!(!other.verify_password("correct horse", &hash).unwrap());
        assert_eq!(crypto.pepper(), b"pepper");
    }

    #[test]
    fn rejects_empty_pepper() {
        assert!(matches!(
            PasswordCrypto::new(""),
            Err(CryptoError::EmptyPepper)
        ));
    }

    #[test]
    fn decoy_verification_never_panics() {
        let crypto = crypto();
        crypto.verify_decoy("anything at all");
    }

    #[test]
    fn rejects_malformed_stored_hash() {
        let crypto = crypto();
        assert!(matches!(
            crypto.verify_password("pw", "not-a-phc-string"),
            Err(CryptoError::Hash(_))
        ));
    }
}

mod credential;
mod crypto;
mod error;

pub use crate::credential::{Credential, Verification};
pub use crate::crypto::{
    HASH_ALGORITHM, HashAlgorithm, HashParams, ITERATIONS, KEY_SIZE, MAX_KEY_SIZE,
    MIN_ITERATIONS, SALT_SIZE,
};
pub use crate::error::{ConfigError, HashError};
use zeroize::Zeroizing;

/// Salted PBKDF2 password hasher.
///
/// Holds nothing but its parameters, so a single instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordHasher {
    params: HashParams,
}

impl PasswordHasher {
    /// Creates a hasher with a custom key size and iteration count, using
    /// the default hash algorithm.
    pub fn new(key_size: usize, iterations: u32) -> Result<Self, ConfigError> {
        let params = HashParams::new(key_size, iterations, HASH_ALGORITHM)?;
        Ok(Self::with_params(&params))
    }

    /// Creates a hasher from the default parameter set.
    pub fn new_default() -> Self {
        Self::with_params(&HashParams::default())
    }

    pub fn with_params(params: &HashParams) -> Self {
        log::debug!(
            "password hasher: key_size={} iterations={} algorithm={}",
            params.key_size(),
            params.iterations(),
            params.algorithm()
        );
        Self { params: *params }
    }

    pub fn params(&self) -> &HashParams {
        &self.params
    }

    /// Hashes `password` under a freshly generated salt.
    ///
    /// An empty password yields [`Credential::empty`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Entropy`] if the OS random source fails.
    pub fn hash(&self, password: &str) -> Result<Credential, HashError> {
        if password.is_empty() {
            log::debug!("empty password, no hash produced");
            return Ok(Credential::empty());
        }

        let salt = crypto::generate_salt(self.params.key_size())?;
        let key = crypto::derive_key(password.as_bytes(), &salt, &self.params);

        Ok(Credential::from_parts(hex::encode_upper(&*key), salt))
    }

    /// Checks `password` against a stored hex `digest` and its `salt`.
    pub fn verify(&self, password: &str, digest: &str, salt: &[u8]) -> bool {
        self.verify_detailed(password, digest, salt).is_match()
    }

    pub fn verify_credential(&self, password: &str, credential: &Credential) -> bool {
        self.verify(password, credential.digest(), credential.salt())
    }

    /// Like [`PasswordHasher::verify`] but reports why a check failed.
    ///
    /// Empty inputs short-circuit before any key derivation. The comparison
    /// itself runs in constant time.
    pub fn verify_detailed(&self, password: &str, digest: &str, salt: &[u8]) -> Verification {
        if password.is_empty() || digest.is_empty() || salt.is_empty() {
            log::debug!("empty password, digest or salt; rejecting");
            return Verification::EmptyInput;
        }

        let expected = match hex::decode(digest) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(e) => {
                log::warn!("stored digest is not valid hex: {e}");
                return Verification::MalformedDigest;
            }
        };

        let key = crypto::derive_key(password.as_bytes(), salt, &self.params);

        if crypto::fixed_time_eq(&key, &expected) {
            Verification::Match
        } else {
            Verification::Mismatch
        }
    }
}

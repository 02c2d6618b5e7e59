use std::fmt;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use super::{HASH_ALGORITHM, ITERATIONS, KEY_SIZE, MAX_KEY_SIZE, MIN_ITERATIONS, SALT_SIZE};
use crate::error::ConfigError;

/// Digest used as the HMAC pseudorandom function inside PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        HASH_ALGORITHM
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Strength parameters of the key derivation.
///
/// Fields are private; a value obtained from [`HashParams::new`] or
/// [`Default`] is always within the accepted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HashParams {
    key_size: usize,
    iterations: u32,
    algorithm: HashAlgorithm,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            // 512 bit derived key
            key_size: KEY_SIZE,
            iterations: ITERATIONS,
            algorithm: HASH_ALGORITHM,
        }
    }
}

impl HashParams {
    pub fn new(
        key_size: usize,
        iterations: u32,
        algorithm: HashAlgorithm,
    ) -> Result<Self, ConfigError> {
        let params = Self {
            key_size,
            iterations,
            algorithm,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_size < SALT_SIZE {
            return Err(ConfigError::KeySizeTooSmall {
                key_size: self.key_size,
                min: SALT_SIZE,
            });
        }
        if self.key_size > MAX_KEY_SIZE {
            return Err(ConfigError::KeySizeTooLarge {
                key_size: self.key_size,
                max: MAX_KEY_SIZE,
            });
        }
        if self.iterations < MIN_ITERATIONS {
            return Err(ConfigError::IterationsTooLow {
                iterations: self.iterations,
                min: MIN_ITERATIONS,
            });
        }
        Ok(())
    }
}

/// Derive `key_size` bytes from password and salt with PBKDF2-HMAC.
pub fn derive_key(password: &[u8], salt: &[u8], params: &HashParams) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; params.key_size]);

    match params.algorithm {
        HashAlgorithm::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, params.iterations, &mut key),
        HashAlgorithm::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, params.iterations, &mut key),
        HashAlgorithm::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, params.iterations, &mut key),
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(algorithm: HashAlgorithm) -> HashParams {
        HashParams::new(32, MIN_ITERATIONS, algorithm).unwrap()
    }

    #[test]
    fn default_params_are_valid() {
        let params = HashParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.key_size(), 64);
        assert_eq!(params.iterations(), 350_000);
        assert_eq!(params.algorithm(), HashAlgorithm::Sha512);
    }

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];
        let params = fast(HashAlgorithm::Sha512);

        let k1 = derive_key(b"password", &salt, &params);
        let k2 = derive_key(b"password", &salt, &params);

        assert_eq!(k1, k2);
        assert_eq!(k1.len(), 32);
    }

    #[test]
    fn kdf_matches_rfc6070_style_vector() {
        // PBKDF2-HMAC-SHA256, P="password", S="salt", c=4096, dkLen=32
        let params = HashParams::new(32, 4096, HashAlgorithm::Sha256).unwrap();
        let key = derive_key(b"password", b"salt", &params);
        assert_eq!(
            hex::encode(&*key),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn kdf_params_affect_output() {
        let salt = [7u8; 16];

        let k1 = derive_key(b"pw", &salt, &fast(HashAlgorithm::Sha512));
        let k2 = derive_key(b"pw", &salt, &fast(HashAlgorithm::Sha256));
        let k3 = derive_key(
            b"pw",
            &salt,
            &HashParams::new(32, MIN_ITERATIONS + 1, HashAlgorithm::Sha512).unwrap(),
        );

        assert_ne!(k1, k2);
        assert_ne!(k1, k3);
    }

    #[test]
    fn kdf_invalid_params_fail_gracefully() {
        assert!(matches!(
            HashParams::new(0, ITERATIONS, HashAlgorithm::Sha512),
            Err(ConfigError::KeySizeTooSmall { .. })
        ));
        assert!(matches!(
            HashParams::new(SALT_SIZE - 1, ITERATIONS, HashAlgorithm::Sha512),
            Err(ConfigError::KeySizeTooSmall { .. })
        ));
        assert!(matches!(
            HashParams::new(MAX_KEY_SIZE + 1, ITERATIONS, HashAlgorithm::Sha512),
            Err(ConfigError::KeySizeTooLarge { .. })
        ));
        assert!(matches!(
            HashParams::new(KEY_SIZE, 0, HashAlgorithm::Sha512),
            Err(ConfigError::IterationsTooLow { .. })
        ));
    }

    #[test]
    fn algorithm_parses_common_spellings() {
        assert_eq!("sha512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha512);
        assert_eq!("SHA-512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha512);
        assert_eq!("Sha384".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha384);
        assert_eq!("sha-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn algorithm_display_roundtrips() {
        for alg in [
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            assert_eq!(alg.to_string().parse::<HashAlgorithm>().unwrap(), alg);
        }
    }
}

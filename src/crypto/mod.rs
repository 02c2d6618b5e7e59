//! Cryptographic primitives for password hashing.
//!
//! Provides the PBKDF2 key derivation, salt generation, and the fixed-time
//! comparison used during verification.

pub mod kdf;
pub mod random;

pub use kdf::{HashAlgorithm, HashParams, derive_key};
pub use random::generate_salt;

use subtle::ConstantTimeEq;

/// Default size of the derived key in bytes.
pub const KEY_SIZE: usize = 64;
/// Minimum salt length in bytes. Salts are generated at `key_size` bytes,
/// so this is also the smallest accepted key size.
pub const SALT_SIZE: usize = 16;
/// Default number of PBKDF2 iterations.
pub const ITERATIONS: u32 = 350_000;
/// Default PRF digest.
pub const HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha512;
/// Lowest iteration count a hasher will accept (RFC 8018, section 4.2).
pub const MIN_ITERATIONS: u32 = 1_000;
/// Largest derived key a hasher will produce.
pub const MAX_KEY_SIZE: usize = 1024;

/// Compares two byte slices in time independent of their contents.
///
/// Slices of different length compare unequal.
pub fn fixed_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_eq_matches_equal_slices() {
        assert!(fixed_time_eq(b"abcdef", b"abcdef"));
        assert!(fixed_time_eq(b"", b""));
    }

    #[test]
    fn fixed_time_eq_rejects_differences() {
        assert!(!fixed_time_eq(b"abcdef", b"abcdeg"));
        assert!(!fixed_time_eq(b"xbcdef", b"abcdef"));
    }

    #[test]
    fn fixed_time_eq_rejects_length_mismatch() {
        assert!(!fixed_time_eq(b"abc", b"abcd"));
        assert!(!fixed_time_eq(b"abcd", b""));
    }
}

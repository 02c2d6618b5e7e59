use getrandom::fill;

use crate::error::HashError;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<(), HashError> {
    fill(buf).map_err(|e| {
        log::error!("OS random generator unavailable: {e}");
        HashError::Entropy
    })
}

/// Generate a salt of `len` bytes
pub fn generate_salt(len: usize) -> Result<Vec<u8>, HashError> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_has_requested_length() {
        assert_eq!(generate_salt(16).unwrap().len(), 16);
        assert_eq!(generate_salt(64).unwrap().len(), 64);
    }

    #[test]
    fn salts_are_unique() {
        let a = generate_salt(32).unwrap();
        let b = generate_salt(32).unwrap();
        assert_ne!(a, b);
    }
}

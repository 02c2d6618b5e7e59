//! The digest and salt pair handed back to callers.

use serde::{Deserialize, Serialize};

/// A derived password digest together with the salt it was derived with.
///
/// The digest is uppercase hex. When serialized, the salt is written as
/// uppercase hex as well, so the whole record is plain text. Where it is
/// stored is up to the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Credential {
    digest: String,
    #[serde(with = "hex_bytes")]
    salt: Vec<u8>,
}

impl Credential {
    /// Rebuilds a credential from previously stored parts.
    pub fn from_parts(digest: impl Into<String>, salt: impl Into<Vec<u8>>) -> Self {
        Self {
            digest: digest.into(),
            salt: salt.into(),
        }
    }

    /// The "no hash produced" value returned for an empty password.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn salt_hex(&self) -> String {
        hex::encode_upper(&self.salt)
    }

    /// Returns `true` for the sentinel produced by hashing an empty password.
    pub fn is_empty(&self) -> bool {
        self.digest.is_empty() && self.salt.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.digest, self.salt)
    }
}

/// Outcome of a detailed verification.
///
/// Only [`Verification::Match`] authenticates. The other variants exist so
/// callers can tell ordinary empty input apart from corrupt stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch,
    EmptyInput,
    MalformedDigest,
}

impl Verification {
    pub fn is_match(&self) -> bool {
        matches!(self, Verification::Match)
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_upper(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(D::Error::custom)
    }
}

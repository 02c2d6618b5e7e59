use thiserror::Error;

/// Rejected hasher parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("key size {key_size} is below the minimum of {min} bytes")]
    KeySizeTooSmall { key_size: usize, min: usize },
    #[error("key size {key_size} exceeds the maximum of {max} bytes")]
    KeySizeTooLarge { key_size: usize, max: usize },
    #[error("iteration count {iterations} is below the minimum of {min}")]
    IterationsTooLow { iterations: u32, min: u32 },
    #[error("unsupported hash algorithm '{0}'")]
    UnknownAlgorithm(String),
}

/// Failure while producing a credential.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("OS random generator unavailable")]
    Entropy,
}

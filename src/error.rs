use thiserror::Error;

/// Errors returned by the operations of this crate.
///
/// Validation always happens before any state is touched, so a returned error
/// means the receiver is exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KMeansError {
    /// Malformed dimension, point shape mismatch, invalid `k` or invalid seeds
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Access outside of `[0, size)`
    #[error("Index {index} out of range for dataset of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;

use thiserror::Error;

/// Errors returned by EQDS header decoding.
///
/// `Truncated` is the only variant raised by the byte cursor; the other two
/// are logical failures detected on bytes that were read successfully.
///
/// # Examples
/// ```
/// use eqds_core::EqdsError;
///
/// let err = EqdsError::UnknownNextProtocol { value: 7 };
/// assert!(err.to_string().contains("unknown next protocol"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EqdsError {
    #[error("declared length {declared} below header minimum {minimum}")]
    LengthMismatch { declared: usize, minimum: usize },
    #[error("unknown next protocol: {value}")]
    UnknownNextProtocol { value: u8 },
    #[error("buffer truncated: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
}

//! Driver error type.

/// Error returned by the public driver API.
///
/// Protocol-level detail (which step failed, the MAC status code) goes to the
/// log only; callers see one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The request was malformed or asks for an unsupported feature.
    #[error("invalid parameter")]
    InvalidParameter,
    /// The transport failed or the co-processor reported a failure.
    #[error("I/O error")]
    Io,
    /// No response arrived before the caller's deadline.
    #[error("request timed out")]
    Timeout,
}

impl Error {
    /// POSIX-style negative error number.
    #[must_use]
    pub const fn errno(self) -> i32 {
        match self {
            Self::InvalidParameter => -22,
            Self::Io => -5,
            Self::Timeout => -116,
        }
    }
}

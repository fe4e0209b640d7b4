use crate::random::RandomSourceError;

/// Error type shared by the base32 codec and the OTP engine
#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    /// Decoding met a byte that is neither a base32 symbol nor padding
    #[error("Invalid base32 character {byte:#04x} at position {position}")]
    InvalidCharacter {
        /// Index of the offending byte in the input
        position: usize,
        /// The offending byte
        byte: u8,
    },
    /// The declared output capacity cannot hold the full result
    #[error("Output buffer too small: {required} bytes required, {capacity} available")]
    BufferTooSmall {
        /// Capacity the full result needs
        required: usize,
        /// Capacity the caller declared
        capacity: usize,
    },
    /// Digit width outside `0..=8`
    #[error("Invalid digit count {0}, expected 0 to 8")]
    InvalidDigitCount(u32),
    /// The entropy source reported failure
    #[error("Random source failure: {0}")]
    RandomSourceFailure(#[from] RandomSourceError),
    /// A time step of zero seconds
    #[error("Time step must be greater than zero")]
    InvalidTimeStep,
    /// More earlier verification windows than [MAX_BACK_RETRY](crate::config::MAX_BACK_RETRY)
    #[error("Back retry {0} exceeds the maximum verification window")]
    InvalidBackRetry(usize),
    /// A timestamp earlier than 1970-01-01T00:00:00Z
    #[error("Timestamp is before the UNIX epoch")]
    TimeBeforeEpoch,
}

/// Result alias used across the crate
pub type Result<T, E = OtpError> = std::result::Result<T, E>;

use thiserror::Error;

/// Result type returned by every fallible operation in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors related to FF1 and FF3-1 encryption.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// The engine parameters, or the numeral string length they are used
    /// with, are not permitted by SP 800-38G.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// The caller passed a numeral string or buffer that cannot be processed
    /// with the current configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
    /// An intermediate value did not fit in the digit count it was reduced
    /// to. This indicates a bug in this crate, not a caller error.
    #[error("arithmetic inconsistency: value does not fit in the expected numeral string")]
    ArithmeticInconsistency,
    /// [`FpeEngine::process_bytes`](crate::FpeEngine::process_bytes) or
    /// [`FpeEngine::process_wide`](crate::FpeEngine::process_wide) was called
    /// before [`FpeEngine::init`](crate::FpeEngine::init).
    #[error("FPE engine not initialized")]
    NotInitialized,
}

/// Reasons a configuration is rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// Radix must be in `[2, max]`.
    #[error("radix {radix} outside of [2, {max}]")]
    RadixOutOfRange {
        /// Requested radix.
        radix: u32,
        /// Largest radix accepted by the entry point.
        max: u32,
    },
    /// `radix^len` is below 1,000,000, or `len` is below 2.
    #[error("domain too small: radix {radix} with length {len}")]
    DomainTooSmall {
        /// Radix of the numeral string.
        radix: u32,
        /// Length of the numeral string.
        len: usize,
    },
    /// FF3-1 numeral strings are bounded by `2 * floor(log_radix(2^96))`.
    #[error("input length {len} exceeds maximum of {max}")]
    InputTooLong {
        /// Length of the numeral string.
        len: usize,
        /// Maximum length for this radix.
        max: usize,
    },
    /// The tweak has a length the algorithm does not accept.
    #[error("tweak is {len} bytes, expected {expected}")]
    TweakLength {
        /// Length of the supplied tweak.
        len: usize,
        /// Description of the accepted lengths.
        expected: &'static str,
    },
    /// The block cipher rejected the key length.
    #[error("invalid key length {len}")]
    KeyLength {
        /// Length of the supplied key.
        len: usize,
    },
}

/// Reasons an input is rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum ArgumentError {
    /// A digit is not below the radix.
    #[error("digit {digit} at index {index} outside of radix {radix}")]
    DigitOutOfRange {
        /// Position of the offending digit.
        index: usize,
        /// Value of the offending digit.
        digit: u32,
        /// Configured radix.
        radix: u32,
    },
    /// Input length is not the same as the length the [`FF1`](crate::FF1) or
    /// [`FF3_1`](crate::FF3_1) instance was created for.
    #[error("input length {actual} does not match instance length {expected}")]
    InputLength {
        /// Length the instance was created for.
        expected: usize,
        /// Length of the supplied numeral string.
        actual: usize,
    },
    /// The output buffer cannot hold the transformed numeral string.
    #[error("output buffer too short: need {needed}, got {actual}")]
    OutputTooShort {
        /// Elements required.
        needed: usize,
        /// Elements available.
        actual: usize,
    },
    /// A buffer of big-endian 16-bit digits must have an even byte length.
    #[error("wide digit buffer has odd length {len}")]
    OddByteLength {
        /// Length of the byte buffer.
        len: usize,
    },
}

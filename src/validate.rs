//! Argument checks shared by FF1, FF3-1 and the engines.
//!
//! Every check here runs before the first block cipher call of an operation,
//! so a rejected input never touches the key.

use crate::{numeral::Digit, ArgumentError, ConfigError, Result};

/// Largest radix permitted by SP 800-38G.
pub const MAX_RADIX: u32 = 1 << 16;

/// Smallest domain `radix^len` permitted by SP 800-38G.
pub const MIN_DOMAIN: u64 = 1_000_000;

/// Checks `2 <= radix <= max`.
pub fn check_radix(radix: u32, max: u32) -> Result<()> {
    if radix < 2 || radix > max {
        return Err(ConfigError::RadixOutOfRange { radix, max }.into());
    }
    Ok(())
}

/// Checks `len >= 2` and `radix^len >= 1,000,000`.
pub fn check_domain(radix: u32, len: usize) -> Result<()> {
    let mut domain = 1_u64;
    for _ in 0..len {
        domain = domain.saturating_mul(u64::from(radix));
        if domain >= MIN_DOMAIN {
            break;
        }
    }

    if len < 2 || domain < MIN_DOMAIN {
        return Err(ConfigError::DomainTooSmall { radix, len }.into());
    }
    Ok(())
}

/// Checks that FF1's 32-bit length fields can hold `len` and `tweak_len`.
pub fn check_ff1_lengths(len: usize, tweak_len: usize) -> Result<()> {
    let max = u32::MAX as usize;
    if len > max {
        return Err(ConfigError::InputTooLong { len, max }.into());
    }
    if tweak_len > max {
        return Err(ConfigError::TweakLength {
            len: tweak_len,
            expected: "at most 2^32 - 1",
        }
        .into());
    }
    Ok(())
}

/// Maximum FF3-1 numeral string length, `2 * floor(log_radix(2^96))`.
pub fn max_ff3_len(radix: u32) -> usize {
    const LIMIT: u128 = 1 << 96;

    // Exact integer floor(log_radix(2^96)).
    let radix = u128::from(radix.max(2));
    let mut power = radix;
    let mut exponent = 0;
    while power <= LIMIT {
        power *= radix;
        exponent += 1;
    }
    2 * exponent
}

/// Checks `len <= 2 * floor(log_radix(2^96))`.
pub fn check_ff3_len(radix: u32, len: usize) -> Result<()> {
    let max = max_ff3_len(radix);
    if len > max {
        return Err(ConfigError::InputTooLong { len, max }.into());
    }
    Ok(())
}

/// Checks that every digit is below `radix`.
pub fn check_digits<D: Digit>(digits: &[D], radix: u32) -> Result<()> {
    for (index, &digit) in digits.iter().enumerate() {
        let digit: u32 = digit.into();
        if digit >= radix {
            return Err(ArgumentError::DigitOutOfRange {
                index,
                digit,
                radix,
            }
            .into());
        }
    }
    Ok(())
}

/// Checks that `output` can receive the `input` numeral string.
pub fn check_buffers(input: usize, output: usize) -> Result<()> {
    if output < input {
        return Err(ArgumentError::OutputTooShort {
            needed: input,
            actual: output,
        }
        .into());
    }
    Ok(())
}

/// Runs the width, length and digit checks for one numeral string.
pub fn check_input<D: Digit>(digits: &[D], radix: u32) -> Result<()> {
    check_radix(radix, D::MAX_RADIX)?;
    check_domain(radix, digits.len())?;
    check_digits(digits, radix)
}

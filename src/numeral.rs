//! Conversion between numeral strings and integers.
//!
//! These are NUM_radix and STR^m_radix of SP 800-38G. Digits are stored most
//! significant first.

use core::{convert::TryFrom, fmt::Debug};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use zeroize::DefaultIsZeroes;

use crate::{validate, Error, Result};

/// Storage width of a single numeral.
///
/// `u8` digits cover every radix up to 256 and `u16` digits every radix up to
/// 65536. The width is fixed by the type parameter of the FF1 and FF3-1
/// routines, so the round loop never branches on it.
pub trait Digit: DefaultIsZeroes + Into<u32> + Debug + Eq + 'static {
    /// Largest radix whose digits fit in this width.
    const MAX_RADIX: u32;

    /// Narrows `value`, or returns `None` if it does not fit in this width.
    fn from_u32(value: u32) -> Option<Self>;
}

impl Digit for u8 {
    const MAX_RADIX: u32 = 1 << 8;

    fn from_u32(value: u32) -> Option<Self> {
        u8::try_from(value).ok()
    }
}

impl Digit for u16 {
    const MAX_RADIX: u32 = 1 << 16;

    fn from_u32(value: u32) -> Option<Self> {
        u16::try_from(value).ok()
    }
}

/// NUM_radix(X): interprets `digits` as a big-endian numeral in `radix`.
///
/// Digits must already be below `radix`.
pub fn num<D: Digit>(digits: &[D], radix: u32) -> BigUint {
    digits.iter().fold(BigUint::zero(), |acc, &digit| {
        let digit: u32 = digit.into();
        acc * radix + digit
    })
}

/// STR^m_radix(x): writes `value` into `out` as a big-endian numeral of
/// exactly `out.len()` digits.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if `radix` is below 2 or its digits
/// do not fit in `D`, and [`Error::ArithmeticInconsistency`] if `value` is not
/// below `radix^out.len()`.
pub fn str_into<D: Digit>(mut value: BigUint, radix: u32, out: &mut [D]) -> Result<()> {
    validate::check_radix(radix, D::MAX_RADIX)?;

    let divisor = BigUint::from(radix);
    for slot in out.iter_mut().rev() {
        let (quotient, mut remainder) = value.div_rem(&divisor);
        let digit = remainder.to_u32().and_then(D::from_u32);
        wipe(&mut remainder);
        wipe(&mut value);
        *slot = digit.ok_or(Error::ArithmeticInconsistency)?;
        value = quotient;
    }

    let fits = value.is_zero();
    wipe(&mut value);
    if !fits {
        return Err(Error::ArithmeticInconsistency);
    }
    Ok(())
}

/// Replaces `x` with STR(NUM(x) + y mod modulus).
pub(crate) fn add_mod_into<D: Digit>(
    x: &mut [D],
    y: &BigUint,
    radix: u32,
    modulus: &BigUint,
) -> Result<()> {
    let mut sum = num(x, radix) + y;
    let c = &sum % modulus;
    wipe(&mut sum);
    str_into(c, radix, x)
}

/// Replaces `x` with STR(NUM(x) - y mod modulus).
pub(crate) fn sub_mod_into<D: Digit>(
    x: &mut [D],
    y: &BigUint,
    radix: u32,
    modulus: &BigUint,
) -> Result<()> {
    let mut reduced = y % modulus;
    let mut difference = num(x, radix) + modulus;
    difference -= &reduced;
    wipe(&mut reduced);
    let c = &difference % modulus;
    wipe(&mut difference);
    str_into(c, radix, x)
}

/// Overwrites the limbs of `value` with zeros in place.
///
/// `num-bigint` has no zeroize support, so this only reaches the allocation
/// `value` owns now. Buffers the arithmetic operators released on the way to
/// it are not covered.
pub(crate) fn wipe(value: &mut BigUint) {
    let words = ((value.bits() + 31) / 32) as usize;
    value.assign_from_slice(&vec![0; words]);
    core::hint::black_box(&*value);
}

/// Writes `value` into `out` as a big-endian byte string of exactly
/// `out.len()` bytes, i.e. `[x]^s` in SP 800-38G notation.
///
/// # Errors
///
/// Returns [`Error::ArithmeticInconsistency`] if `value` needs more bytes.
pub fn write_be(value: &BigUint, out: &mut [u8]) -> Result<()> {
    if value.is_zero() {
        out.iter_mut().for_each(|b| *b = 0);
        return Ok(());
    }

    let bytes = value.to_bytes_be();
    let pad = out
        .len()
        .checked_sub(bytes.len())
        .ok_or(Error::ArithmeticInconsistency)?;
    out[..pad].iter_mut().for_each(|b| *b = 0);
    out[pad..].copy_from_slice(&bytes);
    Ok(())
}

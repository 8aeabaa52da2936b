use num_bigint::BigUint;
use tracing::trace;

use crate::{
    numeral::{self, Digit},
    prf::{Block, BlockFunction},
    validate, ArgumentError, ConfigError, Result,
};

const ROUNDS: u8 = 8;

/// A 64-bit FF3 tweak, split into the words `T_L || T_R`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tweak64([u8; 8]);

impl Tweak64 {
    /// Uses an 8-byte tweak as is.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TweakLength`] unless `tweak` is 8 bytes long.
    pub fn raw(tweak: &[u8]) -> Result<Self> {
        if tweak.len() != 8 {
            return Err(ConfigError::TweakLength {
                len: tweak.len(),
                expected: "8 bytes",
            }
            .into());
        }
        let mut t = [0; 8];
        t.copy_from_slice(tweak);
        Ok(Self(t))
    }

    /// Expands a 56-bit FF3-1 tweak.
    ///
    /// `T_L = T[0..27] || 0^4` and `T_R = T[32..55] || T[28..31] || 0^4`: the
    /// fourth byte's high nibble stays with the left word and its low nibble
    /// becomes the high nibble of the last byte.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TweakLength`] unless `tweak` is 7 bytes long.
    pub fn compressed(tweak: &[u8]) -> Result<Self> {
        if tweak.len() != 7 {
            return Err(ConfigError::TweakLength {
                len: tweak.len(),
                expected: "7 bytes",
            }
            .into());
        }
        let mut t = [0; 8];
        t[..3].copy_from_slice(&tweak[..3]);
        t[3] = tweak[3] & 0xF0;
        t[4..7].copy_from_slice(&tweak[4..]);
        t[7] = tweak[3] << 4;
        Ok(Self(t))
    }

    fn left(&self) -> &[u8] {
        &self.0[..4]
    }

    fn right(&self) -> &[u8] {
        &self.0[4..]
    }
}

impl AsRef<[u8]> for Tweak64 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// FF3-1 for one radix, numeral string length, and tweak.
///
/// The block function must be keyed with the byte-reversed key `REVB(K)`;
/// [`Ff31Engine`](crate::Ff31Engine) does this for you.
#[allow(non_camel_case_types)]
pub struct FF3_1<'a, F: ?Sized> {
    f: &'a F,
    tweak: Tweak64,
    radix: u32,
    len: usize,
    u: usize,
    modulus_u: BigUint,
    modulus_v: BigUint,
}

impl<'a, F> FF3_1<'a, F>
where
    F: BlockFunction + ?Sized,
{
    /// Creates an [`FF3_1`] instance for a given block function, radix, input
    /// length, and tweak.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if the radix is outside `[2, 65536]`, if `radix^len < 1,000,000`, or if
    /// `len > 2 * floor(log_radix(2^96))`.
    pub fn new(f: &'a F, radix: u32, len: usize, tweak: Tweak64) -> Result<Self> {
        validate::check_radix(radix, validate::MAX_RADIX)?;
        validate::check_domain(radix, len)?;
        validate::check_ff3_len(radix, len)?;

        // 1. Let u = ceil(n / 2); v = n - u
        let v = len / 2;
        let u = len - v;

        trace!(radix, len, u, v, "FF3-1 parameters");

        Ok(Self {
            f,
            tweak,
            radix,
            len,
            u,
            modulus_u: BigUint::from(radix).pow(u as u32),
            modulus_v: BigUint::from(radix).pow(v as u32),
        })
    }

    fn check<D: Digit>(&self, x: &[D]) -> Result<()> {
        if x.len() != self.len {
            return Err(ArgumentError::InputLength {
                expected: self.len,
                actual: x.len(),
            }
            .into());
        }
        validate::check_input(x, self.radix)
    }

    /// Computes y = NUM(S) for round `i`. `x_b` is already digit-reversed, so
    /// NUM(x_b) is NUM(REV(B)).
    fn round<D: Digit>(&self, i: u8, x_b: &[D]) -> Result<BigUint> {
        // 4i. If i is even, let W = T_R, else let W = T_L.
        let w = if i % 2 == 0 {
            self.tweak.right()
        } else {
            self.tweak.left()
        };

        // 4ii. Let P = W ⊕ [i]^4 || [NUM_radix(REV(B))]^12
        let mut p = Block::default();
        p[..4].copy_from_slice(w);
        p[3] ^= i;
        let mut num = numeral::num(x_b, self.radix);
        let written = numeral::write_be(&num, &mut p[4..]);
        numeral::wipe(&mut num);
        written?;

        // 4iii. Let S = REVB(CIPH_REVB(K)(REVB(P)))
        p.reverse();
        self.f.apply(&mut p);
        p.reverse();

        // 4iv. Let y = NUM(S)
        Ok(BigUint::from_bytes_be(&p))
    }

    /// Both halves are held digit-reversed for the duration of `rounds`, which
    /// turns every NUM(REV(.)) and REV(STR(.)) of SP 800-38G into a
    /// plain NUM and STR.
    fn with_reversed_halves<D: Digit>(
        &self,
        x: &mut [D],
        rounds: impl FnOnce(&mut [D], &mut [D]) -> Result<()>,
    ) -> Result<()> {
        self.check(x)?;

        let (upper, lower) = x.split_at_mut(self.u);
        upper.reverse();
        lower.reverse();
        let result = rounds(&mut *upper, &mut *lower);
        upper.reverse();
        lower.reverse();
        result
    }

    /// Encrypts the given plaintext in place.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` does not have the length given to
    /// [`FF3_1::new`], if the digit width cannot hold the radix, or if a digit
    /// is not below the radix. Nothing is encrypted in that case.
    pub fn encrypt<D: Digit>(&self, x: &mut [D]) -> Result<()> {
        self.with_reversed_halves(x, |upper, lower| {
            for i in 0..ROUNDS {
                // A and B swap at the end of each round, so the half being replaced
                // alternates between the upper and lower halves.
                let (x_a, x_b, modulus) = if i % 2 == 0 {
                    (&mut *upper, &*lower, &self.modulus_u)
                } else {
                    (&mut *lower, &*upper, &self.modulus_v)
                };

                let mut y = self.round(i, x_b)?;

                // 4v. Let c = (NUM_radix(REV(A)) + y) mod radix^m
                // 4vi. Let C = REV(STR^m_radix(c))
                numeral::add_mod_into(x_a, &y, self.radix, modulus)?;
                numeral::wipe(&mut y);
            }
            Ok(())
        })
    }

    /// Decrypts the given ciphertext in place.
    ///
    /// # Errors
    ///
    /// Same as [`FF3_1::encrypt`].
    pub fn decrypt<D: Digit>(&self, x: &mut [D]) -> Result<()> {
        self.with_reversed_halves(x, |upper, lower| {
            for i in (0..ROUNDS).rev() {
                let (x_a, x_b, modulus) = if i % 2 == 0 {
                    (&mut *upper, &*lower, &self.modulus_u)
                } else {
                    (&mut *lower, &*upper, &self.modulus_v)
                };

                let mut y = self.round(i, x_b)?;

                // 4v. Let c = (NUM_radix(REV(B)) - y) mod radix^m
                numeral::sub_mod_into(x_a, &y, self.radix, modulus)?;
                numeral::wipe(&mut y);
            }
            Ok(())
        })
    }
}

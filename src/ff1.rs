use num_bigint::BigUint;
use tracing::trace;

use crate::{
    numeral::{self, Digit},
    prf::{BlockFunction, Prf},
    validate, ArgumentError, Result, Scratch,
};

const ROUNDS: u8 = 10;

/// FF1 for one radix, numeral string length, and tweak.
///
/// The block function must be keyed AES (any key size) or another cipher with
/// a 16 byte block. The instance holds no plaintext-dependent state, so it can
/// encrypt and decrypt any number of numeral strings of its length.
pub struct FF1<'a, F: ?Sized> {
    prf: Prf<'a, F>,
    radix: u32,
    len: usize,
    u: usize,
    b: usize,
    d: usize,
    modulus_u: BigUint,
    modulus_v: BigUint,
}

impl<'a, F> FF1<'a, F>
where
    F: BlockFunction + ?Sized,
{
    /// Creates an [`FF1`] instance for a given block function, radix, input
    /// length, and tweak.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) if the radix is outside
    /// `[2, 65536]`, if `radix^len < 1,000,000`, or if `len` or the tweak
    /// length do not fit in 32 bits.
    pub fn new(f: &'a F, radix: u32, len: usize, tweak: &[u8]) -> Result<Self> {
        validate::check_radix(radix, validate::MAX_RADIX)?;
        validate::check_domain(radix, len)?;
        validate::check_ff1_lengths(len, tweak.len())?;

        // 1. Let u = floor(n / 2); v = n - u
        let u = len / 2;
        let v = len - u;

        let modulus_u = BigUint::from(radix).pow(u as u32);
        let modulus_v = BigUint::from(radix).pow(v as u32);

        // 3. Let b = ceil(ceil(v * log2(radix)) / 8)
        // The bit length of radix^v - 1 is exactly ceil(v * log2(radix)), without
        // the rounding hazards of evaluating the logarithm in floating point.
        let b = ((&modulus_v - 1_u32).bits() as usize + 7) / 8;

        // 4. Let d = 4 * ceil(b / 4) + 4
        let d = ((b + 3) & !3) + 4;

        trace!(radix, len, u, v, b, d, "FF1 parameters");

        // This can be precomputed so we only do it once per instance, rather than
        // in every Feistel round.
        let mut block = [0; 16];
        // 5. Let P =
        block[0] = 1; // [1]^1
        block[1] = 2; // [2]^1
        block[2] = 1; // [1]^1
        block[3..6].copy_from_slice(&radix.to_be_bytes()[1..]); // [radix]^3
        block[6] = ROUNDS; // [10]^1
        block[7] = u as u8; // [u mod 256]^1
        block[8..12].copy_from_slice(&(len as u32).to_be_bytes()); // [n]^4
        block[12..].copy_from_slice(&(tweak.len() as u32).to_be_bytes()); // [t]^4

        let mut prf = Prf::new(f);
        prf.write(&block);
        // SP 800-38G recomputes the entirety of Q in each Feistel round, but the
        // beginning of Q can be precomputed here. If the tweak spans multiple
        // blocks, this will also save us a few block encryptions.
        prf.write(tweak);
        // SP 800-38G defines this as [0]^((-t-b-1) mod 16). It is used to pad
        // the input to the PRF function to a multiple of the block size (16
        // bytes).
        prf.seek(!(tweak.len() + b) & 15);

        Ok(Self {
            prf,
            radix,
            len,
            u,
            b,
            d,
            modulus_u,
            modulus_v,
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

    /// Computes y = NUM(S) for round `i` with `x_b` as the message half.
    fn round<D: Digit>(&self, i: u8, x_b: &[D], num_b: &mut [u8], s: &mut [u8]) -> Result<BigUint> {
        let mut num = numeral::num(x_b, self.radix);
        let written = numeral::write_be(&num, num_b);
        numeral::wipe(&mut num);
        written?;

        // This is the remainder of Q. It is specific to a given Feistel round of a
        // given plaintext, so we cannot precompute it.
        let mut prf = self.prf;
        prf.write(&[i]);
        prf.write(num_b);

        // generate_s will panic if an incomplete block has been written to the PRF,
        // i.e. the input was not a multiple of the block size. This cannot
        // happen here because the PRF input was padded in the constructor.
        prf.generate_s(s);
        Ok(BigUint::from_bytes_be(s))
    }

    /// Encrypts the given plaintext in place.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` does not have the length given to
    /// [`FF1::new`], if the digit width cannot hold the radix, or if a digit
    /// is not below the radix. Nothing is encrypted in that case.
    pub fn encrypt<D: Digit>(&self, x: &mut [D]) -> Result<()> {
        self.check(x)?;

        let mut num_b = Scratch::<u8>::zeroed(self.b);
        let mut s = Scratch::<u8>::zeroed(self.d);
        let (upper, lower) = x.split_at_mut(self.u);

        for i in 0..ROUNDS {
            // This is equivalent to Step 6viii and 6ix of SP 800-38G, where A and B
            // are swapped at the end of each Feistel round.
            let (x_a, x_b, modulus) = if i % 2 == 0 {
                (&mut *upper, &*lower, &self.modulus_u)
            } else {
                (&mut *lower, &*upper, &self.modulus_v)
            };

            let mut y = self.round(i, x_b, &mut num_b, &mut s)?;

            // 6vi. Let c = (NUM(A, radix) + y) mod radix^m
            numeral::add_mod_into(x_a, &y, self.radix, modulus)?;
            numeral::wipe(&mut y);
        }

        Ok(())
    }

    /// Decrypts the given ciphertext in place.
    ///
    /// # Errors
    ///
    /// Same as [`FF1::encrypt`].
    pub fn decrypt<D: Digit>(&self, x: &mut [D]) -> Result<()> {
        self.check(x)?;

        let mut num_b = Scratch::<u8>::zeroed(self.b);
        let mut s = Scratch::<u8>::zeroed(self.d);
        let (upper, lower) = x.split_at_mut(self.u);

        // This is the inverse of our encryption routine: we iterate backwards, and
        // subtract instead of adding.
        for i in (0..ROUNDS).rev() {
            let (x_a, x_b, modulus) = if i % 2 == 0 {
                (&mut *upper, &*lower, &self.modulus_u)
            } else {
                (&mut *lower, &*upper, &self.modulus_v)
            };

            let mut y = self.round(i, x_b, &mut num_b, &mut s)?;

            // 6vi. Let c = (NUM(B, radix) - y) mod radix^m
            numeral::sub_mod_into(x_a, &y, self.radix, modulus)?;
            numeral::wipe(&mut y);
        }

        Ok(())
    }
}

//! Rust implementation of FF1 and FF3-1 format-preserving encryption for any
//! radix from 2 to 65536, specified in
//! [NIST Special Publication 800-38G](https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-38G.pdf).
//!
//! A numeral string of `n` digits in radix `r` encrypts to another numeral
//! string of `n` digits in radix `r`. The underlying block cipher must have a
//! 16 byte block, which in practice means AES.
//!
//! There are two layers:
//!
//! - [`FF1`] and [`FF3_1`] are bound to one radix, length and tweak, and
//!   transform digit slices in place.
//! - [`Ff1Engine`] and [`Ff31Engine`] implement [`FpeEngine`]: they own the
//!   block cipher, take their key, radix and tweak from [`FpeParameters`], and
//!   accept numeral strings of any permitted length as bytes or 16-bit digits.
//!
//! # Example
//!
//! ```rust
//! # use aes::{
//! #     cipher::{generic_array::GenericArray, KeyInit},
//! #     Aes256,
//! # };
//! # use radix_fpe::{Permutation, FF1};
//! #
//! const KEY: [u8; 32] = [0; 32];
//!
//! let cipher = Aes256::new(GenericArray::from_slice(&KEY));
//! let f = Permutation::new(&cipher, false);
//! let ff1 = FF1::new(&f, 10, 16, b"card").unwrap();
//!
//! let pan: [u8; 16] = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
//! let mut x = pan;
//! ff1.encrypt(&mut x).unwrap();
//! assert!(x.iter().all(|&d| d < 10));
//! ff1.decrypt(&mut x).unwrap();
//! assert_eq!(x, pan);
//! ```
//!
//! # Logging
//!
//! Engine initialization, processing and rejected inputs are reported through
//! [`tracing`] at `debug` level, and per-instance parameters at `trace` level.
//! Key, tweak and digit values are never logged.

#![deny(missing_docs)]

mod engine;
mod error;
mod ff1;
mod ff3_1;
pub mod numeral;
mod prf;
mod scratch;
#[cfg(test)]
mod testing;
pub mod validate;

pub use crate::{
    engine::{Direction, Ff1Engine, Ff31Engine, FpeEngine, FpeParameters},
    error::{ArgumentError, ConfigError, Error, Result},
    ff1::FF1,
    ff3_1::{Tweak64, FF3_1},
    numeral::Digit,
    prf::{Block, BlockFunction, Permutation},
    scratch::Scratch,
};

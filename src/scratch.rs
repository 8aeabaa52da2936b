use core::ops::{Deref, DerefMut};

use zeroize::{DefaultIsZeroes, Zeroize, ZeroizeOnDrop};

/// A heap buffer for intermediate numeral strings that is wiped when dropped.
///
/// Every copy of plaintext or ciphertext digits made while processing lives in
/// one of these, so no digit material outlives the call that produced it.
///
/// The integers NUM(A), y and c computed from those digits are `BigUint`
/// values. Their limbs are overwritten before they are dropped, but any buffer
/// `num-bigint` reallocates or frees inside an arithmetic operator is released
/// without being wiped.
pub struct Scratch<T: DefaultIsZeroes> {
    buf: Vec<T>,
}

impl<T: DefaultIsZeroes> Scratch<T> {
    /// Allocates a zero-filled buffer of `len` elements.
    pub fn zeroed(len: usize) -> Self {
        Self {
            buf: vec![T::default(); len],
        }
    }

    /// Allocates a buffer holding a copy of `src`.
    pub fn from_slice(src: &[T]) -> Self {
        Self { buf: src.to_vec() }
    }
}

impl<T: DefaultIsZeroes> Deref for Scratch<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T: DefaultIsZeroes> DerefMut for Scratch<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T: DefaultIsZeroes> Zeroize for Scratch<T> {
    /// Wipes the contents and spare capacity, leaving the buffer empty.
    fn zeroize(&mut self) {
        self.buf.zeroize();
    }
}

impl<T: DefaultIsZeroes> Drop for Scratch<T> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<T: DefaultIsZeroes> ZeroizeOnDrop for Scratch<T> {}

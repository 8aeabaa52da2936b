use core::cell::Cell;

use cipher::{consts::U16, BlockEncrypt, BlockSizeUser};

use crate::prf::{Block, BlockFunction};

/// Forward block cipher that counts its invocations.
pub struct CountingFunction<'a, C> {
    cipher: &'a C,
    calls: Cell<usize>,
}

impl<'a, C> CountingFunction<'a, C> {
    pub fn new(cipher: &'a C) -> Self {
        Self {
            cipher,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<'a, C> BlockFunction for CountingFunction<'a, C>
where
    C: BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    fn apply(&self, block: &mut Block) {
        self.calls.set(self.calls.get() + 1);
        self.cipher.encrypt_block(block);
    }
}

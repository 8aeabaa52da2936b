use cipher::{consts::U16, generic_array::GenericArray, BlockDecrypt, BlockEncrypt, BlockSizeUser};

pub const BLOCK_SIZE: usize = 16;

/// A single 16-byte cipher block.
pub type Block = GenericArray<u8, U16>;

/// A keyed permutation on 16-byte blocks: CIPH_K in SP 800-38G.
pub trait BlockFunction {
    /// Replaces `block` with its image under the permutation.
    fn apply(&self, block: &mut Block);
}

/// The block cipher in the direction selected at initialization.
///
/// Some deployments run the base cipher's decryption permutation while FPE
/// still encrypts; `inverse` selects that mode.
pub struct Permutation<'a, C> {
    cipher: &'a C,
    inverse: bool,
}

impl<'a, C> Permutation<'a, C> {
    /// Wraps `cipher`, using its decryption direction if `inverse` is set.
    pub fn new(cipher: &'a C, inverse: bool) -> Self {
        Self { cipher, inverse }
    }
}

impl<'a, C> BlockFunction for Permutation<'a, C>
where
    C: BlockSizeUser<BlockSize = U16> + BlockEncrypt + BlockDecrypt,
{
    fn apply(&self, block: &mut Block) {
        if self.inverse {
            self.cipher.decrypt_block(block);
        } else {
            self.cipher.encrypt_block(block);
        }
    }
}

/// Incremental CBC-MAC with a zero IV, the PRF of SP 800-38G Algorithm 6.
///
/// Writes may be split at arbitrary byte boundaries. Copying a [`Prf`] forks
/// the chaining state, so a common prefix only needs to be absorbed once.
pub struct Prf<'a, F: ?Sized> {
    f: &'a F,
    offset: usize,
    state: [u8; BLOCK_SIZE],
}

impl<'a, F: ?Sized> Copy for Prf<'a, F> {}

impl<'a, F: ?Sized> Clone for Prf<'a, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, F: BlockFunction + ?Sized> Prf<'a, F> {
    pub fn new(f: &'a F) -> Self {
        Self {
            f,
            offset: 0,
            state: [0; BLOCK_SIZE],
        }
    }

    fn ciph(&mut self) {
        self.f.apply(GenericArray::from_mut_slice(&mut self.state));
    }

    /// Absorbs `n` zero bytes.
    pub fn seek(&mut self, n: usize) {
        let offset = self.offset + n;
        for _ in 0..(offset / BLOCK_SIZE) {
            self.ciph();
        }
        self.offset = offset % BLOCK_SIZE;
    }

    pub fn write(&mut self, buf: &[u8]) {
        let offset = self.offset;
        let needed = BLOCK_SIZE - offset;

        if needed > buf.len() {
            xor_slice(&mut self.state[offset..offset + buf.len()], buf);
            self.offset += buf.len();
        } else {
            xor_slice(&mut self.state[offset..], &buf[..needed]);
            self.ciph();

            if buf.len() > needed {
                let mut chunks = buf[needed..].chunks_exact(BLOCK_SIZE);

                for block in chunks.by_ref() {
                    xor_slice(&mut self.state, block);
                    self.ciph();
                }

                let remainder = chunks.remainder();
                xor_slice(&mut self.state[..remainder.len()], remainder);
                self.offset = remainder.len();
            } else {
                self.offset = 0;
            }
        }
    }

    /// Fills `s` with the first `s.len()` bytes of
    /// `R || CIPH(R ⊕ [1]^16) || CIPH(R ⊕ [2]^16) || ...`.
    ///
    /// # Panics
    ///
    /// Panics if the input absorbed so far is not a whole number of blocks.
    /// Callers pad Q to the block size before generating S.
    pub fn generate_s(&self, s: &mut [u8]) {
        for (j, chunk) in s.chunks_mut(BLOCK_SIZE).enumerate() {
            let block = self.expand(j as u32);
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
    }

    pub fn expand(&self, j: u32) -> [u8; BLOCK_SIZE] {
        let mut state = self.output();
        if j > 0 {
            xor_slice(&mut state[BLOCK_SIZE - 4..], &j.to_be_bytes());
            self.f.apply(GenericArray::from_mut_slice(&mut state));
        }
        state
    }

    pub fn output(&self) -> [u8; BLOCK_SIZE] {
        assert_eq!(self.offset, 0, "incomplete block");
        self.state
    }
}

pub fn xor_slice(dst: &mut [u8], src: &[u8]) {
    assert_eq!(
        dst.len(),
        src.len(),
        "destination and source slices have different lengths"
    );
    for (lhs, &rhs) in dst.iter_mut().zip(src.iter()) {
        *lhs ^= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::{xor_slice, Block, BlockFunction, Permutation, Prf, BLOCK_SIZE};

    use aes::{
        cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit},
        Aes256,
    };

    use lazy_static::lazy_static;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;
    use rand::RngCore;

    const MAX_INPUT_SIZE: usize = 8192;

    lazy_static! {
        static ref CIPHER: Aes256 = {
            const KEY: [u8; 32] = [
                0xF9, 0xE8, 0x38, 0x9F, 0x5B, 0x80, 0x71, 0x2E, 0x38, 0x86, 0xCC, 0x1F, 0xA2, 0xD2,
                0x8A, 0x3B, 0x8C, 0x9C, 0xD8, 0x8A, 0x2D, 0x4A, 0x54, 0xC6, 0xAA, 0x86, 0xCE, 0x0F,
                0xEF, 0x94, 0x4B, 0xE0,
            ];
            Aes256::new(GenericArray::from_slice(&KEY))
        };
        static ref FORWARD: Permutation<'static, Aes256> = Permutation::new(&*CIPHER, false);
    }

    fn valid_input_size(args: &[usize]) -> bool {
        args.iter()
            .copied()
            .try_fold(0, usize::checked_add)
            .map_or(false, |n| n <= MAX_INPUT_SIZE && n % BLOCK_SIZE == 0)
    }

    fn random_bytes(n: usize) -> Vec<u8> {
        let mut buf = vec![0; n];
        rand::thread_rng().fill_bytes(&mut buf);
        buf
    }

    /// Straightforward CBC-MAC over a block-aligned message.
    fn cbc_mac(msg: &[u8]) -> [u8; BLOCK_SIZE] {
        let mut y = Block::default();
        for block in msg.chunks_exact(BLOCK_SIZE) {
            xor_slice(&mut y, block);
            CIPHER.encrypt_block(&mut y);
        }
        let mut out = [0; BLOCK_SIZE];
        out.copy_from_slice(&y);
        out
    }

    /// Test that seeking is equivalent to writing zeroes.
    #[quickcheck]
    fn seek_equivalent_to_write(i: usize, j: usize, k: usize) -> TestResult {
        if !valid_input_size(&[i, j, k]) {
            return TestResult::discard();
        }

        let random = random_bytes(j);

        let expected = {
            let mut buf = vec![0; i + j + k];
            buf[i..i + j].copy_from_slice(&random);
            let mut prf = Prf::new(&*FORWARD);
            prf.write(&buf);
            prf.output()
        };

        let output = {
            let mut prf = Prf::new(&*FORWARD);
            prf.seek(i);
            prf.write(&random);
            prf.seek(k);
            prf.output()
        };

        TestResult::from_bool(output == expected)
    }

    /// Test that writing four different-sized chunks separately is equivalent
    /// to concatenating them, and that both match a plain CBC-MAC.
    #[quickcheck]
    fn write_chunks_separately(i: usize, j: usize, k: usize, l: usize) -> TestResult {
        if !valid_input_size(&[i, j, k, l]) {
            return TestResult::discard();
        }

        let chunks = [
            random_bytes(i),
            random_bytes(j),
            random_bytes(k),
            random_bytes(l),
        ];

        let output = {
            let mut prf = Prf::new(&*FORWARD);
            for chunk in &chunks {
                prf.write(chunk);
            }
            prf.output()
        };

        TestResult::from_bool(output == cbc_mac(&chunks.concat()))
    }

    #[test]
    fn forked_prefix_matches_full_write() {
        let prefix = random_bytes(40);
        let suffix = random_bytes(24);

        let mut base = Prf::new(&*FORWARD);
        base.write(&prefix);

        let mut forked = base;
        forked.write(&suffix);

        let mut full = Prf::new(&*FORWARD);
        full.write(&[&prefix[..], &suffix[..]].concat());

        assert_eq!(forked.output(), full.output());

        // Writes to the copy must not leak into the original.
        base.seek(8);
        let mut zeros = Prf::new(&*FORWARD);
        zeros.write(&prefix);
        zeros.write(&[0; 8]);
        assert_eq!(base.output(), zeros.output());
    }

    #[test]
    fn s_extends_with_counter_blocks() {
        let mut prf = Prf::new(&*FORWARD);
        prf.write(&random_bytes(32));
        let r = prf.output();

        let mut s = [0_u8; 40];
        prf.generate_s(&mut s);

        assert_eq!(&s[..16], &r);
        for (j, chunk) in s.chunks(BLOCK_SIZE).enumerate().skip(1) {
            let mut block = r;
            let counter = (j as u32).to_be_bytes();
            for (b, c) in block[12..].iter_mut().zip(counter.iter()) {
                *b ^= c;
            }
            let mut block = Block::from(block);
            FORWARD.apply(&mut block);
            assert_eq!(chunk, &block[..chunk.len()]);
        }
    }

    #[test]
    fn inverse_uses_decryption() {
        use aes::cipher::BlockDecrypt;

        let inverse = Permutation::new(&*CIPHER, true);
        let mut block = Block::from([0x5A; 16]);
        inverse.apply(&mut block);

        let mut expected = Block::from([0x5A; 16]);
        CIPHER.decrypt_block(&mut expected);
        assert_eq!(block, expected);
    }

    #[test]
    #[should_panic(expected = "incomplete block")]
    fn output_requires_whole_blocks() {
        let mut prf = Prf::new(&*FORWARD);
        prf.write(&[1, 2, 3]);
        prf.output();
    }
}

use core::fmt;

use cipher::{consts::U16, BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit};
use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    ff1::FF1,
    ff3_1::{Tweak64, FF3_1},
    numeral::Digit,
    prf::Permutation,
    validate, ArgumentError, ConfigError, Error, Result, Scratch,
};

/// Whether an engine encrypts or decrypts.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

/// Key, radix and tweak for [`FpeEngine::init`].
///
/// # Examples
///
/// ```rust
/// # use radix_fpe::FpeParameters;
/// let params = FpeParameters::new(&[0; 16], 10, b"tweak")
///     .unwrap()
///     .use_inverse_function(true);
/// assert_eq!(params.radix(), 10);
///
/// assert!(FpeParameters::new(&[0; 16], 1, &[]).is_err());
/// ```
#[derive(Clone)]
pub struct FpeParameters {
    key: Zeroizing<Vec<u8>>,
    radix: u32,
    tweak: Vec<u8>,
    use_inverse_function: bool,
}

impl FpeParameters {
    /// Creates parameters for the given key, radix and tweak.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RadixOutOfRange`] if the radix is outside
    /// `[2, 65536]`.
    pub fn new(key: &[u8], radix: u32, tweak: &[u8]) -> Result<Self> {
        validate::check_radix(radix, validate::MAX_RADIX)?;
        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            radix,
            tweak: tweak.to_vec(),
            use_inverse_function: false,
        })
    }

    /// Runs the base block cipher's decryption permutation wherever the
    /// algorithm calls for CIPH_K.
    pub fn use_inverse_function(mut self, use_inverse_function: bool) -> Self {
        self.use_inverse_function = use_inverse_function;
        self
    }

    /// Key bytes, in the order given by the caller.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Numeral base.
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Tweak bytes.
    pub fn tweak(&self) -> &[u8] {
        &self.tweak
    }

    /// Whether the base cipher runs in its inverse direction.
    pub fn uses_inverse_function(&self) -> bool {
        self.use_inverse_function
    }
}

impl fmt::Debug for FpeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FpeParameters")
            .field("key", &"<redacted>")
            .field("radix", &self.radix)
            .field("tweak_len", &self.tweak.len())
            .field("use_inverse_function", &self.use_inverse_function)
            .finish()
    }
}

/// Common interface of the FF1 and FF3-1 engines.
///
/// An engine starts uninitialized. [`init`](FpeEngine::init) fixes the
/// direction and parameters; after that, either `process_*` method may be
/// called any number of times. Calling `init` again replaces the
/// configuration.
pub trait FpeEngine {
    /// Name of the algorithm, e.g. `"FF1"`.
    fn algorithm_name(&self) -> &'static str;

    /// Configures the engine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the block cipher rejects the
    /// key length or the algorithm rejects the tweak. The previous
    /// configuration, if any, is kept in that case.
    fn init(&mut self, direction: Direction, params: FpeParameters) -> Result<()>;

    /// Transforms a numeral string held in bytes and returns the number of
    /// bytes written.
    ///
    /// For radix up to 256 each byte is one digit. For larger radices the
    /// buffer holds big-endian 16-bit digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before [`init`](FpeEngine::init),
    /// [`Error::InvalidConfiguration`] if the numeral string length is not
    /// permitted for the radix, and [`Error::InvalidArgument`] if a digit is
    /// out of range or `output` is shorter than `input`. `output` is left
    /// untouched on error.
    fn process_bytes(&self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Transforms a numeral string of 16-bit digits and returns the number of
    /// digits written.
    ///
    /// # Errors
    ///
    /// Same as [`process_bytes`](FpeEngine::process_bytes).
    fn process_wide(&self, input: &[u16], output: &mut [u16]) -> Result<usize>;
}

/// One configured algorithm, applied to a numeral string of either width.
trait Transform {
    fn radix(&self) -> u32;

    fn transform<D: Digit>(&self, x: &mut [D]) -> Result<()>;
}

fn process_bytes<T: Transform>(t: &T, input: &[u8], output: &mut [u8]) -> Result<usize> {
    validate::check_buffers(input.len(), output.len())?;

    if t.radix() > <u8 as Digit>::MAX_RADIX {
        if input.len() % 2 != 0 {
            return Err(ArgumentError::OddByteLength { len: input.len() }.into());
        }

        let mut digits = Scratch::<u16>::zeroed(input.len() / 2);
        for (digit, pair) in digits.iter_mut().zip(input.chunks_exact(2)) {
            *digit = u16::from_be_bytes([pair[0], pair[1]]);
        }
        t.transform(&mut digits)?;
        for (pair, digit) in output.chunks_exact_mut(2).zip(digits.iter()) {
            pair.copy_from_slice(&digit.to_be_bytes());
        }
    } else {
        let mut digits = Scratch::from_slice(input);
        t.transform(&mut digits)?;
        output[..input.len()].copy_from_slice(&digits);
    }

    Ok(input.len())
}

fn process_wide<T: Transform>(t: &T, input: &[u16], output: &mut [u16]) -> Result<usize> {
    validate::check_buffers(input.len(), output.len())?;

    let mut digits = Scratch::from_slice(input);
    t.transform(&mut digits)?;
    output[..input.len()].copy_from_slice(&digits);

    Ok(input.len())
}

fn new_cipher<C: KeyInit>(key: &[u8]) -> Result<C> {
    C::new_from_slice(key).map_err(|_| ConfigError::KeyLength { len: key.len() }.into())
}

fn log_rejection<T>(algorithm: &'static str, result: Result<T>) -> Result<T> {
    if let Err(ref error) = result {
        debug!(algorithm, %error, "input rejected");
    }
    result
}

struct Ff1State<C> {
    cipher: C,
    direction: Direction,
    radix: u32,
    tweak: Vec<u8>,
    inverse: bool,
}

impl<C> Transform for Ff1State<C>
where
    C: BlockSizeUser<BlockSize = U16> + BlockEncrypt + BlockDecrypt,
{
    fn radix(&self) -> u32 {
        self.radix
    }

    fn transform<D: Digit>(&self, x: &mut [D]) -> Result<()> {
        // FF1::new already runs the block cipher over the header, so every input
        // check has to happen first.
        validate::check_input(x, self.radix)?;

        let f = Permutation::new(&self.cipher, self.inverse);
        let ff1 = FF1::new(&f, self.radix, x.len(), &self.tweak)?;
        match self.direction {
            Direction::Encrypt => ff1.encrypt(x),
            Direction::Decrypt => ff1.decrypt(x),
        }
    }
}

/// FF1 engine over a block cipher with a 16 byte block, such as AES.
///
/// # Examples
///
/// ```rust
/// # use aes::Aes128;
/// # use radix_fpe::{Direction, Ff1Engine, FpeEngine, FpeParameters};
/// const KEY: [u8; 16] = [
///     0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, 0xAB, 0xF7, 0x15, 0x88, 0x09, 0xCF, 0x4F,
///     0x3C,
/// ];
///
/// let mut engine = Ff1Engine::<Aes128>::new();
/// let params = FpeParameters::new(&KEY, 10, &[]).unwrap();
/// engine.init(Direction::Encrypt, params).unwrap();
///
/// let mut output = [0; 10];
/// engine.process_bytes(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], &mut output).unwrap();
/// assert_eq!(output, [2, 4, 3, 3, 4, 7, 7, 4, 8, 4]);
/// ```
pub struct Ff1Engine<C> {
    state: Option<Ff1State<C>>,
}

impl<C> Ff1Engine<C> {
    /// Creates an uninitialized engine.
    pub fn new() -> Self {
        Self { state: None }
    }
}

impl<C> Default for Ff1Engine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> FpeEngine for Ff1Engine<C>
where
    C: KeyInit + BlockSizeUser<BlockSize = U16> + BlockEncrypt + BlockDecrypt,
{
    fn algorithm_name(&self) -> &'static str {
        "FF1"
    }

    fn init(&mut self, direction: Direction, params: FpeParameters) -> Result<()> {
        validate::check_ff1_lengths(0, params.tweak().len())?;
        let cipher = new_cipher::<C>(params.key())?;

        debug!(
            algorithm = self.algorithm_name(),
            radix = params.radix(),
            ?direction,
            tweak_len = params.tweak().len(),
            inverse = params.uses_inverse_function(),
            "engine initialized"
        );

        self.state = Some(Ff1State {
            cipher,
            direction,
            radix: params.radix(),
            tweak: params.tweak().to_vec(),
            inverse: params.uses_inverse_function(),
        });
        Ok(())
    }

    fn process_bytes(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let state = self.state.as_ref().ok_or(Error::NotInitialized)?;
        debug!(algorithm = self.algorithm_name(), len = input.len(), "process");
        log_rejection(self.algorithm_name(), process_bytes(state, input, output))
    }

    fn process_wide(&self, input: &[u16], output: &mut [u16]) -> Result<usize> {
        let state = self.state.as_ref().ok_or(Error::NotInitialized)?;
        debug!(algorithm = self.algorithm_name(), len = input.len(), "process");
        log_rejection(self.algorithm_name(), process_wide(state, input, output))
    }
}

struct Ff31State<C> {
    cipher: C,
    direction: Direction,
    radix: u32,
    tweak: Tweak64,
    inverse: bool,
}

impl<C> Transform for Ff31State<C>
where
    C: BlockSizeUser<BlockSize = U16> + BlockEncrypt + BlockDecrypt,
{
    fn radix(&self) -> u32 {
        self.radix
    }

    fn transform<D: Digit>(&self, x: &mut [D]) -> Result<()> {
        validate::check_input(x, self.radix)?;

        let f = Permutation::new(&self.cipher, self.inverse);
        let ff3 = FF3_1::new(&f, self.radix, x.len(), self.tweak)?;
        match self.direction {
            Direction::Encrypt => ff3.encrypt(x),
            Direction::Decrypt => ff3.decrypt(x),
        }
    }
}

/// FF3-1 engine over a block cipher with a 16 byte block, such as AES.
///
/// The tweak must be 7 bytes (the 56-bit FF3-1 tweak) or 8 bytes (a raw
/// 64-bit tweak, as used by FF3 before its revision). The key is given in the
/// standard's byte order; the engine keys the cipher with `REVB(K)`.
///
/// # Examples
///
/// ```rust
/// # use aes::Aes128;
/// # use radix_fpe::{Direction, Ff31Engine, FpeEngine, FpeParameters};
/// let mut engine = Ff31Engine::<Aes128>::new();
/// let params = FpeParameters::new(&[0x42; 16], 10, &[1, 2, 3, 4, 5, 6, 7]).unwrap();
/// engine.init(Direction::Encrypt, params.clone()).unwrap();
///
/// let pan = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// let mut ct = [0; 16];
/// engine.process_bytes(&pan, &mut ct).unwrap();
///
/// engine.init(Direction::Decrypt, params).unwrap();
/// let mut pt = [0; 16];
/// engine.process_bytes(&ct, &mut pt).unwrap();
/// assert_eq!(pt, pan);
/// ```
pub struct Ff31Engine<C> {
    state: Option<Ff31State<C>>,
}

impl<C> Ff31Engine<C> {
    /// Creates an uninitialized engine.
    pub fn new() -> Self {
        Self { state: None }
    }
}

impl<C> Default for Ff31Engine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> FpeEngine for Ff31Engine<C>
where
    C: KeyInit + BlockSizeUser<BlockSize = U16> + BlockEncrypt + BlockDecrypt,
{
    fn algorithm_name(&self) -> &'static str {
        "FF3-1"
    }

    fn init(&mut self, direction: Direction, params: FpeParameters) -> Result<()> {
        let tweak = match params.tweak().len() {
            7 => Tweak64::compressed(params.tweak())?,
            8 => Tweak64::raw(params.tweak())?,
            len => {
                return Err(ConfigError::TweakLength {
                    len,
                    expected: "7 or 8 bytes",
                }
                .into())
            }
        };

        let mut key = Zeroizing::new(params.key().to_vec());
        key.reverse();
        let cipher = new_cipher::<C>(&key)?;

        debug!(
            algorithm = self.algorithm_name(),
            radix = params.radix(),
            ?direction,
            tweak_len = params.tweak().len(),
            inverse = params.uses_inverse_function(),
            "engine initialized"
        );

        self.state = Some(Ff31State {
            cipher,
            direction,
            radix: params.radix(),
            tweak,
            inverse: params.uses_inverse_function(),
        });
        Ok(())
    }

    fn process_bytes(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let state = self.state.as_ref().ok_or(Error::NotInitialized)?;
        debug!(algorithm = self.algorithm_name(), len = input.len(), "process");
        log_rejection(self.algorithm_name(), process_bytes(state, input, output))
    }

    fn process_wide(&self, input: &[u16], output: &mut [u16]) -> Result<usize> {
        let state = self.state.as_ref().ok_or(Error::NotInitialized)?;
        debug!(algorithm = self.algorithm_name(), len = input.len(), "process");
        log_rejection(self.algorithm_name(), process_wide(state, input, output))
    }
}

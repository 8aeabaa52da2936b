use aes::{Aes128, Aes192, Aes256};
use radix_fpe::{Direction, Ff1Engine, Ff31Engine, FpeEngine, FpeParameters};

const KEY_128: [u8; 16] = [
    0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, 0xAB, 0xF7, 0x15, 0x88, 0x09, 0xCF, 0x4F, 0x3C,
];
const KEY_192: [u8; 24] = [
    0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, 0xAB, 0xF7, 0x15, 0x88, 0x09, 0xCF, 0x4F, 0x3C,
    0xEF, 0x43, 0x59, 0xD8, 0xD5, 0x80, 0xAA, 0x4F,
];
const KEY_256: [u8; 32] = [
    0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, 0xAB, 0xF7, 0x15, 0x88, 0x09, 0xCF, 0x4F, 0x3C,
    0xEF, 0x43, 0x59, 0xD8, 0xD5, 0x80, 0xAA, 0x4F, 0x7F, 0x03, 0x6D, 0x6F, 0x04, 0xFC, 0x6A, 0x94,
];

const TWEAK_DECIMAL: [u8; 10] = [0x39, 0x38, 0x37, 0x36, 0x35, 0x34, 0x33, 0x32, 0x31, 0x30];
const TWEAK_RADIX36: [u8; 11] = [
    0x37, 0x37, 0x37, 0x37, 0x70, 0x71, 0x72, 0x73, 0x37, 0x37, 0x37,
];

/// Parses a numeral string written with the alphabet `0-9a-z`.
fn digits(s: &str) -> Vec<u16> {
    s.chars()
        .map(|c| c.to_digit(36).expect("alphanumeric numeral") as u16)
        .collect()
}

fn bytes(s: &str) -> Vec<u8> {
    digits(s).into_iter().map(|d| d as u8).collect()
}

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

/// Runs the vector through both digit widths in both directions.
fn check<E: FpeEngine + Default>(key: &[u8], radix: u32, tweak: &[u8], pt: &str, ct: &str) {
    let params = FpeParameters::new(key, radix, tweak).unwrap();

    let mut encrypt = E::default();
    encrypt.init(Direction::Encrypt, params.clone()).unwrap();
    let mut decrypt = E::default();
    decrypt.init(Direction::Decrypt, params).unwrap();

    let mut output = vec![0; pt.len()];
    assert_eq!(encrypt.process_wide(&digits(pt), &mut output).unwrap(), pt.len());
    assert_eq!(output, digits(ct), "{} encrypt {}", encrypt.algorithm_name(), pt);
    decrypt.process_wide(&digits(ct), &mut output).unwrap();
    assert_eq!(output, digits(pt), "{} decrypt {}", decrypt.algorithm_name(), ct);

    let mut output = vec![0; pt.len()];
    encrypt.process_bytes(&bytes(pt), &mut output).unwrap();
    assert_eq!(output, bytes(ct));
    decrypt.process_bytes(&bytes(ct), &mut output).unwrap();
    assert_eq!(output, bytes(pt));
}

#[test]
fn nist_ff1_aes128() {
    // Samples #1 to #3 of the NIST FF1 examples.
    check::<Ff1Engine<Aes128>>(&KEY_128, 10, &[], "0123456789", "2433477484");
    check::<Ff1Engine<Aes128>>(&KEY_128, 10, &TWEAK_DECIMAL, "0123456789", "6124200773");
    check::<Ff1Engine<Aes128>>(
        &KEY_128,
        36,
        &TWEAK_RADIX36,
        "0123456789abcdefghi",
        "a9tv40mll9kdu509eum",
    );
}

#[test]
fn nist_ff1_aes192() {
    // Samples #4 to #6.
    check::<Ff1Engine<Aes192>>(&KEY_192, 10, &[], "0123456789", "2830668132");
    check::<Ff1Engine<Aes192>>(&KEY_192, 10, &TWEAK_DECIMAL, "0123456789", "2496655549");
    check::<Ff1Engine<Aes192>>(
        &KEY_192,
        36,
        &TWEAK_RADIX36,
        "0123456789abcdefghi",
        "xbj3kv35jrawxv32ysr",
    );
}

#[test]
fn nist_ff1_aes256() {
    // Samples #7 to #9.
    check::<Ff1Engine<Aes256>>(&KEY_256, 10, &[], "0123456789", "6657667009");
    check::<Ff1Engine<Aes256>>(&KEY_256, 10, &TWEAK_DECIMAL, "0123456789", "1001623463");
    check::<Ff1Engine<Aes256>>(
        &KEY_256,
        36,
        &TWEAK_RADIX36,
        "0123456789abcdefghi",
        "xs8a0azh2avyalyzuwd",
    );
}

#[test]
fn zcash_ff1_binary() {
    let zero = "0".repeat(88);
    let once = "0000100100110101011101111111110011000001101100111110011101110101011010100100010011001111";
    let twice = "1101101011010001100011110000010011001111110110011101010110100001111001000101011111011000";

    check::<Ff1Engine<Aes256>>(&KEY_256, 2, &[], &zero, once);
    check::<Ff1Engine<Aes256>>(&KEY_256, 2, &[], once, twice);
}

const FF3_KEY_128: &str = "EF4359D8D580AA4F7F036D6F04FC6A94";
const FF3_KEY_192: &str = "EF4359D8D580AA4F7F036D6F04FC6A942B7E151628AED2A6";
const FF3_KEY_256: &str = "EF4359D8D580AA4F7F036D6F04FC6A942B7E151628AED2A6ABF7158809CF4F3C";

#[test]
fn nist_ff3_raw_tweak() {
    // The FF3 samples use a full 64-bit tweak.
    let key = hex(FF3_KEY_128);
    check::<Ff31Engine<Aes128>>(
        &key,
        10,
        &hex("D8E7920AFA330A73"),
        "890121234567890000",
        "750918814058654607",
    );
    check::<Ff31Engine<Aes128>>(
        &key,
        10,
        &hex("9A768A92F60E12D8"),
        "890121234567890000",
        "018989839189395384",
    );
    check::<Ff31Engine<Aes128>>(
        &key,
        10,
        &hex("D8E7920AFA330A73"),
        "89012123456789000000789000000",
        "48598367162252569629397416226",
    );
    check::<Ff31Engine<Aes128>>(
        &key,
        10,
        &hex("0000000000000000"),
        "89012123456789000000789000000",
        "34695224821734535122613701434",
    );
    check::<Ff31Engine<Aes128>>(
        &key,
        26,
        &hex("9A768A92F60E12D8"),
        "0123456789abcdefghi",
        "g2pk40i992fn20cjakb",
    );

    check::<Ff31Engine<Aes192>>(
        &hex(FF3_KEY_192),
        10,
        &hex("D8E7920AFA330A73"),
        "890121234567890000",
        "646965393875028755",
    );
    check::<Ff31Engine<Aes256>>(
        &hex(FF3_KEY_256),
        10,
        &hex("D8E7920AFA330A73"),
        "890121234567890000",
        "922011205562777495",
    );
}

#[test]
fn ff3_1_compressed_tweak() {
    check::<Ff31Engine<Aes128>>(
        &hex("2DE79D232DF5585D68CE47882AE256D6"),
        10,
        &hex("CBD09280979564"),
        "3992520240",
        "8901801106",
    );
}

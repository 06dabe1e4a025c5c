//! A library for base64 encoding and lenient base64 decoding.
//!
//! Encoding always produces canonical, padded output. Decoding never fails:
//! bytes outside the alphabet are skipped while looking for the start of a
//! group, and a padding or unknown symbol inside a group ends that group.

use std::borrow::Cow;
use std::fmt;

#[cfg(test)]
#[path = "base64_tests.rs"]
mod tests;

/// Standard base64 alphabet (RFC 4648).
pub const ALPHABET_STANDARD: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// URL-safe base64 alphabet (RFC 4648).
pub const ALPHABET_URL: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Padding symbol shared by both alphabets.
pub const PAD: u8 = b'=';

/// Decode table entry for bytes that are not alphabet symbols.
pub const INVALID: i8 = -1;

/// Reverse lookup from a byte value to its 6-bit value, or [`INVALID`].
pub type DecodeTable = [i8; 256];

/// Pre-computed decode table for the standard alphabet.
static DECODE_TABLE_STANDARD: DecodeTable = build_decode_table(ALPHABET_STANDARD);

/// Pre-computed decode table for the URL-safe alphabet.
static DECODE_TABLE_URL: DecodeTable = build_decode_table(ALPHABET_URL);

/// Builds a decode lookup table for the given alphabet at compile time.
///
/// The padding symbol maps to [`INVALID`]; padding is handled by the decoder's
/// group logic, not by the table.
const fn build_decode_table(alphabet: &[u8; 64]) -> DecodeTable {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 64 {
        table[alphabet[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// The two supported base64 alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// `A-Z a-z 0-9 + /`
    #[default]
    Standard,
    /// `A-Z a-z 0-9 - _`
    UrlSafe,
}

impl Alphabet {
    /// The 64 symbols of this alphabet, indexed by 6-bit value.
    #[inline]
    pub const fn symbols(self) -> &'static [u8; 64] {
        match self {
            Alphabet::Standard => ALPHABET_STANDARD,
            Alphabet::UrlSafe => ALPHABET_URL,
        }
    }

    /// The reverse lookup table of this alphabet.
    #[inline]
    pub fn decode_table(self) -> &'static DecodeTable {
        match self {
            Alphabet::Standard => &DECODE_TABLE_STANDARD,
            Alphabet::UrlSafe => &DECODE_TABLE_URL,
        }
    }
}

/// Error type for the slice-based encode and decode operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The caller-provided output buffer cannot hold the result.
    OutputBufferTooSmall {
        /// Minimum buffer length required.
        needed: usize,
        /// Length of the buffer that was provided.
        available: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutputBufferTooSmall { needed, available } => write!(
                f,
                "output buffer too small: need {} bytes, got {}",
                needed, available
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Calculates the encoded length for a given input length.
///
/// Output is always padded, so this is `ceil(len / 3) * 4`.
///
/// # Example
///
/// ```
/// use base64_lenient::encoded_len;
///
/// assert_eq!(encoded_len(0), 0);
/// assert_eq!(encoded_len(1), 4);
/// assert_eq!(encoded_len(3), 4);
/// assert_eq!(encoded_len(4), 8);
/// ```
#[inline]
pub const fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

/// Upper bound on the number of bytes produced by decoding `len` input bytes.
///
/// Every complete group turns 4 input bytes into at most 3 output bytes, and
/// a truncated final group yields at most one byte more than three quarters
/// of its length. The bound never exceeds `len`.
///
/// # Example
///
/// ```
/// use base64_lenient::decoded_len_estimate;
///
/// assert_eq!(decoded_len_estimate(0), 0);
/// assert_eq!(decoded_len_estimate(1), 1);
/// assert_eq!(decoded_len_estimate(8), 7);
/// ```
#[inline]
pub const fn decoded_len_estimate(len: usize) -> usize {
    let bound = (len / 4) * 3 + (len % 4) * 3 / 4 + 1;
    if bound < len {
        bound
    } else {
        len
    }
}

/// Encodes binary data to a base64 string using the given alphabet.
///
/// # Arguments
///
/// * `data` - The binary data to encode.
/// * `alphabet` - The alphabet whose symbols are emitted.
///
/// # Returns
///
/// The padded base64 text, `encoded_len(data.len())` characters long.
///
/// # Example
///
/// ```
/// use base64_lenient::{encode_with, Alphabet};
///
/// assert_eq!(encode_with(b"Hello", Alphabet::Standard), "SGVsbG8=");
/// assert_eq!(encode_with(&[0xfb, 0xff], Alphabet::UrlSafe), "-_8=");
/// ```
pub fn encode_with(data: &[u8], alphabet: Alphabet) -> String {
    if data.is_empty() {
        return String::new();
    }

    let mut buffer = vec![0u8; encoded_len(data.len())];
    let written = encode_unchecked(&mut buffer, data, alphabet.symbols());

    let mut output = String::with_capacity(written);
    output.extend(buffer[..written].iter().map(|&b| char::from(b)));
    output
}

/// Encodes data into a caller-provided buffer.
///
/// # Arguments
///
/// * `output` - Destination buffer, at least `encoded_len(data.len())` long.
/// * `data` - The binary data to encode.
/// * `alphabet` - The alphabet whose symbols are emitted.
///
/// # Returns
///
/// The number of bytes written, or [`Error::OutputBufferTooSmall`] if `output`
/// is too short. Nothing is written on error.
///
/// # Example
///
/// ```
/// use base64_lenient::{encode_to_slice, Alphabet};
///
/// let mut buf = [0u8; 8];
/// let n = encode_to_slice(&mut buf, b"Man", Alphabet::Standard).unwrap();
/// assert_eq!(&buf[..n], b"TWFu");
/// ```
pub fn encode_to_slice(
    output: &mut [u8],
    data: &[u8],
    alphabet: Alphabet,
) -> Result<usize, Error> {
    let needed = encoded_len(data.len());
    if output.len() < needed {
        return Err(Error::OutputBufferTooSmall {
            needed,
            available: output.len(),
        });
    }

    Ok(encode_unchecked(output, data, alphabet.symbols()))
}

/// Encoder core. `output` must hold at least `encoded_len(data.len())` bytes.
fn encode_unchecked(output: &mut [u8], data: &[u8], symbols: &[u8; 64]) -> usize {
    let chunks = data.chunks_exact(3);
    let remainder = chunks.remainder();
    let mut out_idx = 0;

    for chunk in chunks {
        let n = ((chunk[0] as u32) << 16) | ((chunk[1] as u32) << 8) | (chunk[2] as u32);

        output[out_idx] = symbols[((n >> 18) & 0x3F) as usize];
        output[out_idx + 1] = symbols[((n >> 12) & 0x3F) as usize];
        output[out_idx + 2] = symbols[((n >> 6) & 0x3F) as usize];
        output[out_idx + 3] = symbols[(n & 0x3F) as usize];
        out_idx += 4;
    }

    match *remainder {
        [b0] => {
            output[out_idx] = symbols[(b0 >> 2) as usize];
            output[out_idx + 1] = symbols[((b0 << 4) & 0x3F) as usize];
            output[out_idx + 2] = PAD;
            output[out_idx + 3] = PAD;
            out_idx += 4;
        }
        [b0, b1] => {
            let n = ((b0 as u16) << 8) | (b1 as u16);
            output[out_idx] = symbols[(n >> 10) as usize];
            output[out_idx + 1] = symbols[((n >> 4) & 0x3F) as usize];
            output[out_idx + 2] = symbols[((n << 2) & 0x3F) as usize];
            output[out_idx + 3] = PAD;
            out_idx += 4;
        }
        _ => {}
    }

    out_idx
}

/// Decodes base64 text to binary data using the given alphabet.
///
/// Decoding is lenient and never fails:
///
/// * a byte that is not an alphabet symbol (including `=`) is skipped while
///   searching for the start of the next group;
/// * once a group starts, exactly four input positions are consumed, and a
///   non-symbol in the third or fourth position ends that group early;
/// * a truncated final group decodes whatever it holds.
///
/// Accepts anything that views as bytes, so both `&str` and `&[u8]` work.
///
/// # Example
///
/// ```
/// use base64_lenient::{decode_with, Alphabet};
///
/// assert_eq!(decode_with("SGVsbG8=", Alphabet::Standard), b"Hello");
/// assert_eq!(decode_with("!TWFu!", Alphabet::Standard), b"Man");
/// ```
pub fn decode_with<T: AsRef<[u8]> + ?Sized>(input: &T, alphabet: Alphabet) -> Vec<u8> {
    let input = input.as_ref();
    if input.is_empty() {
        return Vec::new();
    }

    let mut output = vec![0u8; decoded_len_estimate(input.len())];
    let written = decode_unchecked(&mut output, input, alphabet.decode_table());
    output.truncate(written);
    output
}

/// Decodes base64 input into a caller-provided buffer.
///
/// Same decoding rules as [`decode_with`].
///
/// # Arguments
///
/// * `output` - Destination buffer, at least `decoded_len_estimate(input.len())`
///   long.
/// * `input` - The base64 input bytes.
/// * `alphabet` - The alphabet to decode with.
///
/// # Returns
///
/// The number of bytes written, or [`Error::OutputBufferTooSmall`]. Nothing is
/// written on error.
pub fn decode_to_slice(
    output: &mut [u8],
    input: &[u8],
    alphabet: Alphabet,
) -> Result<usize, Error> {
    let needed = decoded_len_estimate(input.len());
    if output.len() < needed {
        return Err(Error::OutputBufferTooSmall {
            needed,
            available: output.len(),
        });
    }

    Ok(decode_unchecked(output, input, alphabet.decode_table()))
}

/// Looks up the symbol at `pos`. Positions past the end read as [`INVALID`].
#[inline]
fn sextet(table: &DecodeTable, input: &[u8], pos: usize) -> i8 {
    match input.get(pos) {
        Some(&c) => table[c as usize],
        None => INVALID,
    }
}

/// Decoder core. `output` must hold at least `decoded_len_estimate(input.len())`
/// bytes.
fn decode_unchecked(output: &mut [u8], input: &[u8], table: &DecodeTable) -> usize {
    let mut out_idx = 0;
    let mut in_idx = 0;

    while in_idx < input.len() {
        let v0 = table[input[in_idx] as usize];
        if v0 < 0 {
            in_idx += 1;
            continue;
        }

        // A second symbol past the end of input contributes no bits; an
        // in-bounds invalid one keeps the sign-extended sentinel.
        let v1 = input.get(in_idx + 1).map_or(0, |&c| table[c as usize] as i32);
        let v2 = sextet(table, input, in_idx + 2);
        let v3 = sextet(table, input, in_idx + 3);
        in_idx += 4;

        let v0 = v0 as i32;
        output[out_idx] = ((v0 << 2) | (v1 >> 4)) as u8;
        out_idx += 1;

        if v2 >= 0 {
            let v2 = v2 as i32;
            output[out_idx] = ((v1 << 4) | (v2 >> 2)) as u8;
            out_idx += 1;

            if v3 >= 0 {
                output[out_idx] = ((v2 << 6) | v3 as i32) as u8;
                out_idx += 1;
            }
        }
    }

    out_idx
}

/// Returns true for the bytes removed by [`strip_spaces`]: space, `\n`, `\r`.
#[inline]
pub const fn is_ignored_space(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r')
}

/// Removes spaces, line feeds and carriage returns. Tabs are kept.
///
/// Borrows the input when there is nothing to remove.
///
/// # Example
///
/// ```
/// use base64_lenient::strip_spaces;
///
/// assert_eq!(strip_spaces("SGVs bG8=\r\n"), "SGVsbG8=");
/// assert_eq!(strip_spaces("a\tb"), "a\tb");
/// ```
pub fn strip_spaces(input: &str) -> Cow<'_, str> {
    if !input.bytes().any(is_ignored_space) {
        return Cow::Borrowed(input);
    }

    Cow::Owned(
        input
            .chars()
            .filter(|&c| !(c.is_ascii() && is_ignored_space(c as u8)))
            .collect(),
    )
}

/// Encodes with the standard alphabet.
///
/// ```
/// assert_eq!(base64_lenient::encode(b"Man"), "TWFu");
/// ```
#[inline]
pub fn encode(data: &[u8]) -> String {
    encode_with(data, Alphabet::Standard)
}

/// Encodes with the URL-safe alphabet.
#[inline]
pub fn encode_url_safe(data: &[u8]) -> String {
    encode_with(data, Alphabet::UrlSafe)
}

/// Decodes with the standard alphabet, without stripping whitespace first.
///
/// ```
/// assert_eq!(base64_lenient::decode("TWFu"), b"Man");
/// ```
#[inline]
pub fn decode(input: &str) -> Vec<u8> {
    decode_with(input, Alphabet::Standard)
}

/// Decodes with the URL-safe alphabet, without stripping whitespace first.
#[inline]
pub fn decode_url_safe(input: &str) -> Vec<u8> {
    decode_with(input, Alphabet::UrlSafe)
}

/// Strips spaces and line breaks, then decodes with the standard alphabet.
///
/// ```
/// assert_eq!(base64_lenient::decode_ignoring_spaces("SGVs bG8="), b"Hello");
/// ```
#[inline]
pub fn decode_ignoring_spaces(input: &str) -> Vec<u8> {
    decode_with(strip_spaces(input).as_bytes(), Alphabet::Standard)
}

/// Strips spaces and line breaks, then decodes with the URL-safe alphabet.
#[inline]
pub fn decode_url_safe_ignoring_spaces(input: &str) -> Vec<u8> {
    decode_with(strip_spaces(input).as_bytes(), Alphabet::UrlSafe)
}

/// Base64 encoding as a method on byte slices.
pub trait ToBase64 {
    /// Encodes with the standard alphabet.
    fn to_base64(&self) -> String;

    /// Encodes with the URL-safe alphabet.
    fn to_base64_url_safe(&self) -> String;
}

impl ToBase64 for [u8] {
    fn to_base64(&self) -> String {
        encode(self)
    }

    fn to_base64_url_safe(&self) -> String {
        encode_url_safe(self)
    }
}

/// Lenient base64 decoding as a method on strings.
///
/// ```
/// use base64_lenient::FromBase64;
///
/// assert_eq!("SGVs\nbG8=".from_base64(true), b"Hello");
/// assert_eq!("LT8-".from_base64_url_safe(false), b"-?>");
/// ```
pub trait FromBase64 {
    /// Decodes with the standard alphabet, optionally stripping whitespace.
    fn from_base64(&self, ignore_spaces: bool) -> Vec<u8>;

    /// Decodes with the URL-safe alphabet, optionally stripping whitespace.
    fn from_base64_url_safe(&self, ignore_spaces: bool) -> Vec<u8>;
}

impl FromBase64 for str {
    fn from_base64(&self, ignore_spaces: bool) -> Vec<u8> {
        if ignore_spaces {
            decode_ignoring_spaces(self)
        } else {
            decode(self)
        }
    }

    fn from_base64_url_safe(&self, ignore_spaces: bool) -> Vec<u8> {
        if ignore_spaces {
            decode_url_safe_ignoring_spaces(self)
        } else {
            decode_url_safe(self)
        }
    }
}

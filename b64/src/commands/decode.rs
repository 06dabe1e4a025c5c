//! Decode command implementation

use anyhow::{Context, Result};
use base64_lenient::{decode_to_slice, decoded_len_estimate, is_ignored_space, Alphabet};
use std::borrow::Cow;
use std::io::Write;
use tracing::debug;

/// Decodes `input` and writes the raw bytes to `out`.
///
/// Input does not have to be UTF-8: bytes outside the alphabet are skipped by
/// the decoder like any other noise.
pub fn decode<W: Write>(
    input: &[u8],
    alphabet: Alphabet,
    ignore_spaces: bool,
    out: &mut W,
) -> Result<()> {
    let mut input = Cow::Borrowed(input);
    if ignore_spaces {
        input.to_mut().retain(|&b| !is_ignored_space(b));
    }

    let mut buffer = vec![0u8; decoded_len_estimate(input.len())];
    let written = decode_to_slice(&mut buffer, &input, alphabet)?;
    debug!(
        input_bytes = input.len(),
        output_bytes = written,
        ?alphabet,
        ignore_spaces,
        "decoded"
    );

    out.write_all(&buffer[..written])
        .context("failed to write decoded output")?;

    Ok(())
}

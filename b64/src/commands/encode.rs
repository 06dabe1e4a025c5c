//! Encode command implementation

use anyhow::{Context, Result};
use base64_lenient::{encode_to_slice, encoded_len, Alphabet};
use std::io::Write;
use tracing::debug;

/// Encodes `input` and writes the text to `out`, optionally newline-terminated.
pub fn encode<W: Write>(
    input: &[u8],
    alphabet: Alphabet,
    newline: bool,
    out: &mut W,
) -> Result<()> {
    let mut buffer = vec![0u8; encoded_len(input.len())];
    let written = encode_to_slice(&mut buffer, input, alphabet)?;
    debug!(input_bytes = input.len(), output_bytes = written, ?alphabet, "encoded");

    out.write_all(&buffer[..written])
        .context("failed to write encoded output")?;
    if newline {
        out.write_all(b"\n").context("failed to write encoded output")?;
    }

    Ok(())
}

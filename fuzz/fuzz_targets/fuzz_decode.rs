#![no_main]

use arbitrary::Arbitrary;
use base64_lenient::{decode_to_slice, decode_with, decoded_len_estimate, strip_spaces, Alphabet};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct DecodeInput {
    url_safe: bool,
    ignore_spaces: bool,
    text: String,
}

fuzz_target!(|input: DecodeInput| {
    let alphabet = if input.url_safe {
        Alphabet::UrlSafe
    } else {
        Alphabet::Standard
    };
    let text = if input.ignore_spaces {
        strip_spaces(&input.text)
    } else {
        input.text.as_str().into()
    };

    // Arbitrary text must decode without panicking and within the estimate
    let decoded = decode_with(text.as_bytes(), alphabet);
    assert!(decoded.len() <= decoded_len_estimate(text.len()));

    let mut buf = vec![0u8; decoded_len_estimate(text.len())];
    let written = decode_to_slice(&mut buf, text.as_bytes(), alphabet).unwrap();
    assert_eq!(&buf[..written], &decoded[..], "decode_to_slice mismatch");
});

#![no_main]

use base64_external::{
    engine::general_purpose::{STANDARD, URL_SAFE},
    Engine,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Test encode roundtrip
    let encoded = base64_lenient::encode(data);
    let decoded = base64_lenient::decode(&encoded);
    assert_eq!(data, &decoded[..], "Roundtrip failed");

    let encoded_url = base64_lenient::encode_url_safe(data);
    let decoded_url = base64_lenient::decode_url_safe(&encoded_url);
    assert_eq!(data, &decoded_url[..], "URL-safe roundtrip failed");

    // Conformance with external crate
    assert_eq!(encoded, STANDARD.encode(data), "External crate encode mismatch");
    assert_eq!(encoded_url, URL_SAFE.encode(data), "External crate URL-safe encode mismatch");
});

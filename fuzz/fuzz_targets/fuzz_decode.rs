#![no_main]
use libfuzzer_sys::fuzz_target;
use uptimey::{Decoder, GzipBase64};

// Arbitrary payload text must decode or fail, never panic
fuzz_target!(|payload: &str| {
    if let Ok(bytes) = GzipBase64.decode(payload) {
        let again = GzipBase64.decode(payload).expect("decode is deterministic");
        assert_eq!(bytes, again);
    }
});

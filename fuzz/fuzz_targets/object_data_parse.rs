//! Fuzz target for decoding a single `object_data` record.

#![no_main]

use libfuzzer_sys::fuzz_target;
use raillabel::format::fuzz_decode_object_data;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = fuzz_decode_object_data(data);
});

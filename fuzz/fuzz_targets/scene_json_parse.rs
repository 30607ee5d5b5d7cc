//! Fuzz target for OpenLABEL scene decoding.
//!
//! Feeds arbitrary bytes to the scene decoder and, for inputs that decode,
//! checks that the scene encodes again without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use raillabel::format::io_json::{from_scene_slice, to_scene_string};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok((scene, _warnings)) = from_scene_slice(data) {
        let _ = to_scene_string(&scene);
    }
});

//! Fuzz target for packaged archive reading.
//!
//! Archives may come from anywhere, so opening and verifying one must
//! only ever return errors.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sg_bundle::ArchiveReader;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut reader) = ArchiveReader::from_bytes(data.to_vec()) {
        let _ = reader.verify_all();
        let _ = reader.read_package();
    }
});

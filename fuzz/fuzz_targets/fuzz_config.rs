//! Fuzz target for config.json parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sg_cli::config::SitegenConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<SitegenConfig>(data) {
        let _ = config.validate();
    }
});

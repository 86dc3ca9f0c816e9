//! Fuzz target for website document decoding.
//!
//! Tests that bundle, generated website and project JSON parsing handles
//! arbitrary input without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sg_common::{GeneratedWebsite, Project, WebsiteBundle};

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<WebsiteBundle>(data);
    let _ = serde_json::from_slice::<GeneratedWebsite>(data);
    if let Ok(project) = serde_json::from_slice::<Project>(data) {
        let _ = project.validate();
    }
});

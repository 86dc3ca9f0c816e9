//! Fuzz target for fragment normalization.
//!
//! Normalizing arbitrary markup must never panic, never grow the text, and
//! leave no wrapper tags behind. Only one head block is removed per pass, so
//! a second pass may change the output only when a further head block
//! survived the first.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sg_compose::normalize;

fuzz_target!(|data: &str| {
    let once = normalize(data);
    assert!(once.len() <= data.len());

    let twice = normalize(&once);
    if twice != once {
        let lower = once.to_ascii_lowercase();
        let open = lower.find("<head");
        let close = lower.rfind("</head");
        assert!(
            matches!((open, close), (Some(o), Some(c)) if o < c),
            "unstable output without a head block: {once:?} -> {twice:?}"
        );
        assert!(twice.len() < once.len());
    }
});

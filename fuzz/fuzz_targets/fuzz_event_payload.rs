#![no_main]

use libfuzzer_sys::fuzz_target;
use regcheck_core::PullRequestContext;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    // Malformed payloads must surface as errors
    let _ = PullRequestContext::from_event_json(json, None);
});

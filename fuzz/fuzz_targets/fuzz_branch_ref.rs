#![no_main]

use libfuzzer_sys::fuzz_target;
use regcheck_core::{extract_issue_number_from_ref, BRANCH_NAME_PREFIX};

fuzz_target!(|data: &[u8]| {
    let Ok(reference) = std::str::from_utf8(data) else {
        return;
    };

    if let Some(number) = extract_issue_number_from_ref(reference, BRANCH_NAME_PREFIX) {
        let bare = reference.strip_prefix("refs/heads/").unwrap_or(reference);
        let digits = bare.strip_prefix(BRANCH_NAME_PREFIX).unwrap();
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(digits.parse::<u64>().ok(), Some(number.get()));
    }
});

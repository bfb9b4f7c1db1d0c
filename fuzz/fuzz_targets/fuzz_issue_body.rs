#![no_main]

use libfuzzer_sys::fuzz_target;
use regcheck_core::extract::{parse_tags, IssueSections};
use regcheck_core::{extract_info, ExtensionType};

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };

    for ty in ExtensionType::ALL {
        let record = extract_info(ty, body, "fuzzer");
        assert_eq!(record.extension_type(), ty);
    }

    let sections = IssueSections::parse(body);
    for section in sections.iter() {
        let _ = sections.line(section.heading);
        let _ = sections.fenced(section.heading);
    }

    let _ = parse_tags(body);
});

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let once = html::sanitize(input);
    let twice = html::sanitize(&once);
    assert_eq!(once, twice, "sanitize must be idempotent");
    let _ = html::scan::text_ranges(input);
});

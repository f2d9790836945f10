#![no_main]

use input_core::caret::{flatten_offset, resolve_offset, text_len};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let root = html::parse(input);
    let len = text_len(&root);
    for offset in 0..=len.min(256) {
        if let Some(point) = resolve_offset(&root, offset) {
            assert_eq!(flatten_offset(&root, point), Some(offset));
        }
    }
    assert!(resolve_offset(&root, len + 1).is_none());
});

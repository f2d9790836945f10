//! Byte-level scanning of a markup string without building a tree.
//!
//! Pattern substitution works on the markup string itself, so it needs to know which byte
//! ranges are text content and which belong to tags, comments or doctypes. The classification
//! follows the tokenizer: a `<` only opens markup when the tokenizer would treat it that way.

use crate::tokenizer::{opens_markup, tag_end};
use memchr::memchr;
use std::ops::Range;

const COMMENT_START: &[u8] = b"<!--";
const COMMENT_END: &str = "-->";

/// Byte ranges of `markup` that are text content (outside tags and comments), in order.
///
/// Empty ranges are never returned. Every range starts and ends on a UTF-8 char boundary.
pub fn text_ranges(markup: &str) -> Vec<Range<usize>> {
    let bytes = markup.as_bytes();
    let mut ranges = Vec::new();
    let mut text_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let Some(rel) = memchr(b'<', &bytes[i..]) else {
            break;
        };
        i += rel;
        if !opens_markup(bytes, i) {
            i += 1;
            continue;
        }
        if text_start < i {
            ranges.push(text_start..i);
        }
        i = markup_end(markup, i);
        text_start = i;
    }
    if text_start < bytes.len() {
        ranges.push(text_start..bytes.len());
    }
    ranges
}

fn markup_end(markup: &str, start: usize) -> usize {
    let bytes = markup.as_bytes();
    if bytes[start..].starts_with(COMMENT_START) {
        let body = start + COMMENT_START.len();
        return markup[body..]
            .find(COMMENT_END)
            .map_or(bytes.len(), |end| body + end + COMMENT_END.len());
    }
    tag_end(bytes, start)
}
